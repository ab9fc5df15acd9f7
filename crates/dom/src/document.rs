use crate::event::{FocusOptions, ListenerId, ListenerKind, ScrollBehavior, Viewport};
use crate::node::NodeId;
use crate::selector::Selector;

/// The page as seen by behaviors.
///
/// Single threaded and synchronous: every call completes before the next
/// event is dispatched, so implementations need no interior locking.
/// Reads of unknown handles answer with empty values rather than failing.
pub trait Document {
	/// The `<body>` element, owner of page-level scroll styling.
	fn body(&self) -> NodeId;

	fn parent(&self, node: NodeId) -> Option<NodeId>;

	fn matches(&self, node: NodeId, selector: &Selector) -> bool;

	/// Elements matching `selector` in document order.
	///
	/// With a scope, only strict descendants of the scope are considered.
	fn query_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId>;

	fn query(&self, scope: Option<NodeId>, selector: &Selector) -> Option<NodeId> {
		self.query_all(scope, selector).into_iter().next()
	}

	/// Inclusive containment, like DOM `Node.contains`.
	fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut cursor = Some(node);
		while let Some(current) = cursor {
			if current == ancestor {
				return true;
			}
			cursor = self.parent(current);
		}
		false
	}

	/// Nearest inclusive ancestor matching `selector`.
	fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
		let mut cursor = Some(node);
		while let Some(current) = cursor {
			if self.matches(current, selector) {
				return Some(current);
			}
			cursor = self.parent(current);
		}
		None
	}

	fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
	fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

	fn has_class(&self, node: NodeId, class: &str) -> bool;
	fn add_class(&mut self, node: NodeId, class: &str);
	fn remove_class(&mut self, node: NodeId, class: &str);

	fn set_text(&mut self, node: NodeId, text: &str);

	/// Inline style property, empty when unset.
	fn style(&self, node: NodeId, property: &str) -> String;
	/// Sets an inline style property; an empty value removes it.
	fn set_style(&mut self, node: NodeId, property: &str, value: &str);

	fn active_element(&self) -> Option<NodeId>;
	/// Moves keyboard focus. Non-focusable targets are ignored.
	fn focus(&mut self, node: NodeId, options: FocusOptions);
	fn blur(&mut self);

	fn viewport(&self) -> Viewport;
	/// Distance from the viewport top to the element's border box.
	fn bounding_top(&self, node: NodeId) -> f64;
	fn offset_height(&self, node: NodeId) -> f64;
	fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

	/// Whether the host can report element/viewport intersections.
	fn supports_intersection_observer(&self) -> bool;

	/// Registers a document-level handler. Returns `false` when the pair was
	/// already registered.
	fn add_listener(&mut self, kind: ListenerKind, id: ListenerId) -> bool;
	/// Deregisters a document-level handler. Returns `false` when the pair
	/// was not registered.
	fn remove_listener(&mut self, kind: ListenerKind, id: ListenerId) -> bool;
	fn has_listener(&self, kind: ListenerKind, id: ListenerId) -> bool;
	/// Registered handlers of `kind`, in registration order.
	fn listeners(&self, kind: ListenerKind) -> Vec<ListenerId>;
}
