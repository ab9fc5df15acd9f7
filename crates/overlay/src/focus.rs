//! Keyboard focus helpers.

use vitrine_dom::{Document, FocusOptions, NodeId, Selector};

/// When opening moves focus into the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialFocus {
	/// Always focus the first focusable element.
	Always,
	/// Only when the trigger held focus, i.e. the open came from the
	/// keyboard. Pointer opens leave focus where the pointer put it.
	WhenTriggerFocused,
}

impl InitialFocus {
	pub fn should_move(self, focused: Option<NodeId>, trigger: NodeId) -> bool {
		match self {
			Self::Always => true,
			Self::WhenTriggerFocused => focused == Some(trigger),
		}
	}
}

pub fn first_focusable(doc: &dyn Document, scope: NodeId, focusable: &Selector) -> Option<NodeId> {
	doc.query(Some(scope), focusable)
}

/// Focuses `node` without scrolling the page to it.
pub fn focus_in_place(doc: &mut dyn Document, node: NodeId) {
	doc.focus(node, FocusOptions::PREVENT_SCROLL);
}

/// Whether focus moving to `next` leaves `scope`.
///
/// `None` means focus left the document (browser chrome, another window),
/// which counts as leaving.
pub fn escapes_scope(doc: &dyn Document, scope: NodeId, next: Option<NodeId>) -> bool {
	!next.is_some_and(|node| doc.contains(scope, node))
}
