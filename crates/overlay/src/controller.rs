use tracing::debug;
use vitrine_dom::{Document, Key, ListenerId, ListenerKind, NodeId, Selector};

use crate::CloseReason;
use crate::dismiss::DismissListeners;
use crate::focus;
use crate::scroll_lock::SharedScrollGuard;
use crate::spec::{OpenMarker, OverlaySpec};

/// The elements one overlay works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayParts {
	/// Control that toggles the panel.
	pub trigger: NodeId,
	/// Container whose open state is toggled. Clicks inside it are never
	/// outside clicks.
	pub panel: NodeId,
	/// Region referenced by `aria-controls`, searched for initial focus and
	/// watched for focus escape. Defaults to the panel.
	pub focus_scope: NodeId,
}

impl OverlayParts {
	pub fn new(trigger: NodeId, panel: NodeId) -> Self {
		Self {
			trigger,
			panel,
			focus_scope: panel,
		}
	}

	pub fn with_focus_scope(mut self, focus_scope: NodeId) -> Self {
		self.focus_scope = focus_scope;
		self
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayState {
	#[default]
	Closed,
	Open,
}

/// Open/closed state machine for one trigger/panel pair.
///
/// Every transition is total. Entering `Open` and entering `Closed` each
/// apply their full set of effects, while the listener pair and the scroll
/// lock are only touched when the controller actually holds (or lacks)
/// them, so the two can never drift apart from the rendered state.
pub struct OverlayController {
	spec: OverlaySpec,
	parts: OverlayParts,
	state: OverlayState,
	last_focused: Option<NodeId>,
	scroll: Option<SharedScrollGuard>,
	holds_lock: bool,
	dismiss: DismissListeners,
	anchor: Selector,
}

impl OverlayController {
	/// Binds a controller to resolved elements and writes the initial ARIA
	/// contract.
	///
	/// `scroll` is dropped unless `spec.uses_scroll_lock` is set.
	pub fn bind(
		doc: &mut dyn Document,
		spec: OverlaySpec,
		parts: OverlayParts,
		scroll: Option<SharedScrollGuard>,
	) -> Self {
		let scope_id = match doc.attribute(parts.focus_scope, "id") {
			Some(id) if !id.is_empty() => id,
			_ => {
				doc.set_attribute(parts.focus_scope, "id", &spec.fallback_scope_id);
				spec.fallback_scope_id.clone()
			}
		};
		doc.set_attribute(parts.trigger, "aria-controls", &scope_id);
		doc.set_attribute(parts.trigger, "aria-expanded", "false");
		if spec.open_marker == OpenMarker::Expanded {
			doc.set_attribute(parts.panel, "aria-expanded", "false");
		}
		if let Some(label) = &spec.trigger_label {
			doc.set_attribute(parts.trigger, "aria-label", label);
		}

		let scroll = if spec.uses_scroll_lock { scroll } else { None };
		debug!(
			overlay = spec.name,
			controls = %scope_id,
			scroll_lock = scroll.is_some(),
			"overlay bound"
		);

		Self {
			spec,
			parts,
			state: OverlayState::Closed,
			last_focused: None,
			scroll,
			holds_lock: false,
			dismiss: DismissListeners::new(),
			anchor: Selector::tags(&["a"]),
		}
	}

	pub fn name(&self) -> &'static str {
		self.spec.name
	}

	pub fn parts(&self) -> OverlayParts {
		self.parts
	}

	/// State as of the last transition this controller performed.
	pub fn state(&self) -> OverlayState {
		self.state
	}

	/// Element focused just before the most recent open.
	pub fn last_focused(&self) -> Option<NodeId> {
		self.last_focused
	}

	pub fn uses_scroll_lock(&self) -> bool {
		self.scroll.is_some()
	}

	pub fn listeners_active(&self) -> bool {
		self.dismiss.is_active()
	}

	/// Whether `(kind, id)` is one of this overlay's dismissal handlers.
	pub fn handles(&self, kind: ListenerKind, id: ListenerId) -> bool {
		self.dismiss.owns(kind, id)
	}

	/// Rendered open state, read from the document.
	pub fn is_open(&self, doc: &dyn Document) -> bool {
		match &self.spec.open_marker {
			OpenMarker::Class(class) => doc.has_class(self.parts.panel, class),
			OpenMarker::Expanded => {
				doc.attribute(self.parts.panel, "aria-expanded").as_deref() == Some("true")
			}
		}
	}

	/// Single entry point for trigger activation.
	pub fn toggle(&mut self, doc: &mut dyn Document) {
		if self.is_open(doc) {
			self.close(doc, CloseReason::Toggle);
		} else {
			self.open(doc);
		}
	}

	pub fn open(&mut self, doc: &mut dyn Document) {
		let OverlayParts {
			trigger,
			focus_scope,
			..
		} = self.parts;

		self.set_marker(doc, true);
		doc.set_attribute(trigger, "aria-expanded", "true");

		let focused = doc.active_element();
		self.last_focused = focused;
		if self.spec.initial_focus.should_move(focused, trigger)
			&& let Some(first) = focus::first_focusable(doc, focus_scope, &self.spec.focusable)
		{
			focus::focus_in_place(doc, first);
		}

		if let Some(scroll) = &self.scroll
			&& !self.holds_lock
		{
			scroll.borrow_mut().lock(doc);
			self.holds_lock = true;
		}

		self.dismiss.register(doc);
		self.state = OverlayState::Open;
		debug!(overlay = self.spec.name, "overlay opened");
	}

	pub fn close(&mut self, doc: &mut dyn Document, reason: CloseReason) {
		let trigger = self.parts.trigger;

		self.set_marker(doc, false);
		doc.set_attribute(trigger, "aria-expanded", "false");

		if self.holds_lock
			&& let Some(scroll) = &self.scroll
		{
			scroll.borrow_mut().unlock(doc);
			self.holds_lock = false;
		}

		self.dismiss.deregister(doc);
		self.state = OverlayState::Closed;

		if reason.restores_focus() {
			focus::focus_in_place(doc, trigger);
		}
		debug!(overlay = self.spec.name, ?reason, "overlay closed");
	}

	/// Document click handler. Returns whether the click dismissed the
	/// overlay.
	///
	/// Clicks on the trigger belong to the trigger's own handler and clicks
	/// inside the panel are interactions with it; neither dismisses.
	pub fn on_document_click(&mut self, doc: &mut dyn Document, target: NodeId) -> bool {
		if !self.dismiss.is_active() {
			return false;
		}
		if doc.contains(self.parts.trigger, target) || doc.contains(self.parts.panel, target) {
			return false;
		}
		self.close(doc, CloseReason::OutsideClick);
		true
	}

	/// Document keydown handler. Escape dismisses.
	pub fn on_document_key(&mut self, doc: &mut dyn Document, key: &Key) -> bool {
		if !self.dismiss.is_active() || *key != Key::Escape {
			return false;
		}
		self.close(doc, CloseReason::Escape);
		true
	}

	/// Click bubbling through the panel. An in-page anchor closes the
	/// overlay immediately, without waiting for any transition.
	pub fn on_panel_click(&mut self, doc: &mut dyn Document, target: NodeId) -> bool {
		if !self.spec.close_on_anchor_click
			|| !doc.contains(self.parts.panel, target)
			|| !self.is_open(doc)
		{
			return false;
		}
		let Some(link) = doc.closest(target, &self.anchor) else {
			return false;
		};
		let in_page = doc
			.attribute(link, "href")
			.is_some_and(|href| href.starts_with('#'));
		if !in_page {
			return false;
		}
		self.close(doc, CloseReason::AnchorNavigation);
		true
	}

	/// Focus leaving the focus scope. `next` is the element about to
	/// receive focus, `None` when focus leaves the document.
	pub fn on_focus_out(&mut self, doc: &mut dyn Document, next: Option<NodeId>) -> bool {
		if !self.spec.close_on_focus_escape || !self.is_open(doc) {
			return false;
		}
		if !focus::escapes_scope(doc, self.parts.focus_scope, next) {
			return false;
		}
		self.close(doc, CloseReason::FocusEscape);
		true
	}

	/// Viewport resize. Closes when the width crosses above the breakpoint.
	pub fn on_resize(&mut self, doc: &mut dyn Document) -> bool {
		let Some(limit) = self.spec.close_above_width else {
			return false;
		};
		if doc.viewport().inner_width <= limit || !self.is_open(doc) {
			return false;
		}
		self.close(doc, CloseReason::Resize);
		true
	}

	fn set_marker(&self, doc: &mut dyn Document, open: bool) {
		let OverlayParts { trigger, panel, .. } = self.parts;
		match &self.spec.open_marker {
			OpenMarker::Class(class) if open => {
				doc.add_class(panel, class);
				doc.add_class(trigger, class);
			}
			OpenMarker::Class(class) => {
				doc.remove_class(panel, class);
				doc.remove_class(trigger, class);
			}
			OpenMarker::Expanded => {
				doc.set_attribute(panel, "aria-expanded", if open { "true" } else { "false" });
			}
		}
	}
}

#[cfg(test)]
mod tests;
