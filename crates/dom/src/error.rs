//! Error types for document access.

use thiserror::Error;

/// Errors raised while describing or querying a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// A selector string uses syntax outside the supported subset.
	#[error("invalid selector `{selector}`: {reason}")]
	Selector {
		/// The selector as written.
		selector: String,
		/// What the parser rejected.
		reason: String,
	},
}

impl DomError {
	pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
		Self::Selector {
			selector: selector.to_string(),
			reason: reason.into(),
		}
	}
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DomError>;
