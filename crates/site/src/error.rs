//! Error types for site configuration and setup.

use std::path::PathBuf;

use thiserror::Error;
use vitrine_dom::DomError;

/// Errors that can occur while loading configuration or wiring a page.
///
/// Missing page elements are not errors; the affected component is simply
/// not installed.
#[derive(Debug, Error)]
pub enum SiteError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A configured selector could not be parsed.
	#[error("invalid selector for {field}: {source}")]
	Selector {
		/// Dotted config key, e.g. `menu.trigger`.
		field: &'static str,
		source: DomError,
	},

	/// A value is outside its accepted range.
	#[error("invalid {field}: {reason}")]
	Invalid {
		field: &'static str,
		reason: String,
	},
}

/// Result type for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;
