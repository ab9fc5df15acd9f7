use vitrine_dom::Selector;

use crate::focus::InitialFocus;

/// Where the rendered open state lives.
///
/// The rendered state is authoritative: [`OverlayController::toggle`]
/// reads it rather than a cached flag, so markup changed behind the
/// controller's back cannot desynchronize the two.
///
/// [`OverlayController::toggle`]: crate::OverlayController::toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenMarker {
	/// A class set on both panel and trigger.
	Class(String),
	/// `aria-expanded="true"` on the panel itself.
	Expanded,
}

/// Declarative description of an overlay variant.
#[derive(Debug, Clone)]
pub struct OverlaySpec {
	/// Short name used in logs.
	pub name: &'static str,
	pub open_marker: OpenMarker,
	pub initial_focus: InitialFocus,
	/// Elements eligible for initial focus.
	pub focusable: Selector,
	/// Whether the overlay holds the page scroll lock while open.
	pub uses_scroll_lock: bool,
	/// Close when the viewport grows wider than this many pixels.
	pub close_above_width: Option<u32>,
	/// Close when an in-page (`#...`) link inside the panel is clicked.
	pub close_on_anchor_click: bool,
	/// Close when focus leaves the focus scope.
	pub close_on_focus_escape: bool,
	/// `aria-label` written on the trigger at bind time.
	pub trigger_label: Option<String>,
	/// Id assigned to the focus scope when the markup has none.
	pub fallback_scope_id: String,
}

impl OverlaySpec {
	/// Breakpoint above which the mobile navigation overlay has no business
	/// staying open.
	pub const DESKTOP_WIDTH: u32 = 900;

	/// Collapsible navigation menu: class-marked, scroll locking, always
	/// focuses its first link, closes on desktop resize and in-page
	/// navigation.
	pub fn nav_menu() -> Self {
		Self {
			name: "nav-menu",
			open_marker: OpenMarker::Class("active".into()),
			initial_focus: InitialFocus::Always,
			focusable: Selector::tags(&["a", "button"]),
			uses_scroll_lock: true,
			close_above_width: Some(Self::DESKTOP_WIDTH),
			close_on_anchor_click: true,
			close_on_focus_escape: false,
			trigger_label: Some("Open navigation menu".into()),
			fallback_scope_id: "site-menu".into(),
		}
	}

	/// Floating action button: `aria-expanded` marked, no scroll lock,
	/// focuses its first action only for keyboard opens, closes when focus
	/// tabs out of the action list.
	pub fn fab() -> Self {
		Self {
			name: "fab",
			open_marker: OpenMarker::Expanded,
			initial_focus: InitialFocus::WhenTriggerFocused,
			focusable: Selector::tags(&["a", "button"]),
			uses_scroll_lock: false,
			close_above_width: None,
			close_on_anchor_click: false,
			close_on_focus_escape: true,
			trigger_label: None,
			fallback_scope_id: "fab-actions".into(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.trigger_label = Some(label.into());
		self
	}

	pub fn with_breakpoint(mut self, width: Option<u32>) -> Self {
		self.close_above_width = width;
		self
	}

	pub fn with_fallback_id(mut self, id: impl Into<String>) -> Self {
		self.fallback_scope_id = id.into();
		self
	}
}
