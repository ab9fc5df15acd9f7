//! Input and listener vocabulary shared by hosts and behaviors.

use std::sync::atomic::{AtomicU64, Ordering};

/// Document-level event streams a behavior can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
	Click,
	KeyDown,
}

/// Identity of a bound handler.
///
/// Minted once per handler and reused for every registration, so that
/// removal always targets exactly what was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
	/// Mints an identity no other handler in this process shares.
	pub fn fresh() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}

	pub fn get(self) -> u64 {
		self.0
	}
}

/// Keyboard key, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	Escape,
	Enter,
	Space,
	Tab,
	Other(String),
}

impl Key {
	/// Maps a DOM `key` string. `"Esc"` is the legacy Edge spelling.
	pub fn from_dom(name: &str) -> Self {
		match name {
			"Escape" | "Esc" => Self::Escape,
			"Enter" => Self::Enter,
			" " | "Space" | "Spacebar" => Self::Space,
			"Tab" => Self::Tab,
			other => Self::Other(other.to_string()),
		}
	}
}

/// Options for moving keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOptions {
	/// Keep the page where it is instead of scrolling the element into view.
	pub prevent_scroll: bool,
}

impl FocusOptions {
	pub const PREVENT_SCROLL: Self = Self {
		prevent_scroll: true,
	};
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
	#[default]
	Auto,
	Smooth,
}

/// Window metrics as the page sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
	/// `window.innerWidth`, including any vertical scrollbar.
	pub inner_width: u32,
	/// `window.innerHeight`.
	pub inner_height: u32,
	/// `document.documentElement.clientWidth`, excluding the scrollbar.
	pub client_width: u32,
	/// `window.scrollY`.
	pub scroll_y: f64,
}

impl Viewport {
	pub fn new(inner_width: u32, inner_height: u32) -> Self {
		Self {
			inner_width,
			inner_height,
			client_width: inner_width,
			scroll_y: 0.0,
		}
	}

	/// Width taken by the vertical scrollbar, zero for overlay scrollbars.
	pub fn scrollbar_width(&self) -> u32 {
		self.inner_width.saturating_sub(self.client_width)
	}
}
