//! Accessible toggleable overlays.
//!
//! An [`OverlayController`] owns the open/closed state of one trigger/panel
//! pair. Opening marks the pair open, flips `aria-expanded`, moves keyboard
//! focus into the panel, optionally takes the page [`ScrollLock`], and
//! registers document-level dismissal listeners. Closing undoes each of
//! those steps and hands focus back to the trigger.
//!
//! Variants differ only in their [`OverlaySpec`]; the navigation menu and
//! the floating action button are [`OverlaySpec::nav_menu`] and
//! [`OverlaySpec::fab`].

pub mod controller;
pub mod dismiss;
pub mod focus;
#[cfg(test)]
mod invariants;
pub mod scroll_lock;
pub mod spec;

pub use controller::{OverlayController, OverlayParts, OverlayState};
pub use dismiss::DismissListeners;
pub use focus::InitialFocus;
pub use scroll_lock::{ScrollGuard, ScrollLock, SharedScrollGuard};
pub use spec::{OpenMarker, OverlaySpec};

/// Why an overlay was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
	/// The trigger was activated while open.
	Toggle,
	Escape,
	/// A click landed outside both trigger and panel.
	OutsideClick,
	/// Keyboard focus moved out of the focus scope.
	FocusEscape,
	/// The viewport grew past the variant's breakpoint.
	Resize,
	/// An in-page anchor inside the panel was followed.
	AnchorNavigation,
}

impl CloseReason {
	/// Whether closing should hand focus back to the trigger.
	///
	/// A focus escape already put focus where the user wanted it.
	pub fn restores_focus(self) -> bool {
		!matches!(self, Self::FocusEscape)
	}
}
