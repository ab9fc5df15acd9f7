//! Arena-backed in-memory page.
//!
//! [`MemoryDocument`] models just enough of a browser page for behaviors to
//! run unmodified: an element tree with attributes, classes and inline
//! styles, keyboard focus, viewport metrics, static layout boxes and
//! document-level listener registration. It additionally records what the
//! behaviors did (listener churn, focus moves, scroll requests) so tests can
//! assert on it.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::document::Document;
use crate::event::{FocusOptions, ListenerId, ListenerKind, ScrollBehavior, Viewport};
use crate::node::NodeId;
use crate::selector::{Matchable, Selector};

const FOCUSABLE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

#[derive(Debug, Clone)]
struct Element {
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	tag: String,
	attrs: BTreeMap<String, String>,
	classes: SmallVec<[String; 4]>,
	class_attr: String,
	style: BTreeMap<String, String>,
	text: String,
	top: f64,
	height: f64,
}

impl Element {
	fn new(parent: Option<NodeId>, tag: &str) -> Self {
		Self {
			parent,
			children: Vec::new(),
			tag: tag.to_ascii_lowercase(),
			attrs: BTreeMap::new(),
			classes: SmallVec::new(),
			class_attr: String::new(),
			style: BTreeMap::new(),
			text: String::new(),
			top: 0.0,
			height: 0.0,
		}
	}

	fn sync_class_attr(&mut self) {
		self.class_attr = self.classes.join(" ");
	}

	fn is_focusable(&self) -> bool {
		if self.attrs.contains_key("disabled") {
			return false;
		}
		FOCUSABLE_TAGS.contains(&self.tag.as_str()) || self.attrs.contains_key("tabindex")
	}
}

impl Matchable for Element {
	fn tag(&self) -> &str {
		&self.tag
	}

	fn attribute(&self, name: &str) -> Option<&str> {
		if name == "class" {
			return (!self.classes.is_empty()).then_some(self.class_attr.as_str());
		}
		self.attrs.get(name).map(String::as_str)
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes.iter().any(|c| c == class)
	}
}

/// Counters of document-level listener churn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
	/// Registrations that changed the listener set.
	pub added: usize,
	/// Deregistrations that changed the listener set.
	pub removed: usize,
}

impl ListenerStats {
	/// Registrations currently outstanding.
	pub fn outstanding(&self) -> usize {
		self.added - self.removed
	}
}

/// In-memory [`Document`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
	nodes: Vec<Element>,
	root: NodeId,
	body: NodeId,
	active: Option<NodeId>,
	viewport: Viewport,
	intersection_observer: bool,
	listeners: Vec<(ListenerKind, ListenerId)>,
	stats: ListenerStats,
	focus_log: Vec<(NodeId, FocusOptions)>,
	scroll_log: Vec<(f64, ScrollBehavior)>,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new(Viewport::new(1280, 800))
	}
}

impl MemoryDocument {
	/// Creates an empty `<html><body></body></html>` page.
	pub fn new(viewport: Viewport) -> Self {
		let root = NodeId(0);
		let body = NodeId(1);
		let mut html = Element::new(None, "html");
		html.children.push(body);
		Self {
			nodes: vec![html, Element::new(Some(root), "body")],
			root,
			body,
			active: None,
			viewport,
			intersection_observer: true,
			listeners: Vec::new(),
			stats: ListenerStats::default(),
			focus_log: Vec::new(),
			scroll_log: Vec::new(),
		}
	}

	/// Appends a new element under `parent` and returns a builder for it.
	pub fn append(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
		let node = NodeId(self.nodes.len());
		self.nodes.push(Element::new(Some(parent), tag));
		if let Some(parent) = self.nodes.get_mut(parent.0) {
			parent.children.push(node);
		}
		ElementBuilder { doc: self, node }
	}

	pub fn text(&self, node: NodeId) -> &str {
		self.nodes.get(node.0).map_or("", |el| el.text.as_str())
	}

	/// Resizes the window, keeping the current scrollbar width.
	pub fn resize(&mut self, inner_width: u32, inner_height: u32) {
		let scrollbar = self.viewport.scrollbar_width();
		self.viewport.inner_width = inner_width;
		self.viewport.inner_height = inner_height;
		self.viewport.client_width = inner_width.saturating_sub(scrollbar);
	}

	pub fn set_scroll_y(&mut self, scroll_y: f64) {
		self.viewport.scroll_y = scroll_y.max(0.0);
	}

	pub fn set_intersection_observer(&mut self, supported: bool) {
		self.intersection_observer = supported;
	}

	/// Document-absolute top edge of an element's layout box.
	pub fn layout_top(&self, node: NodeId) -> f64 {
		self.nodes.get(node.0).map_or(0.0, |el| el.top)
	}

	pub fn listener_stats(&self) -> ListenerStats {
		self.stats
	}

	/// Every focus move requested through [`Document::focus`], in order.
	pub fn focus_log(&self) -> &[(NodeId, FocusOptions)] {
		&self.focus_log
	}

	pub fn scroll_requests(&self) -> &[(f64, ScrollBehavior)] {
		&self.scroll_log
	}

	/// Short human-readable description, e.g. `a#home.nav-link`.
	pub fn describe(&self, node: NodeId) -> String {
		let Some(el) = self.nodes.get(node.0) else {
			return String::from("?");
		};
		let mut out = el.tag.clone();
		if let Some(id) = el.attrs.get("id") {
			out.push('#');
			out.push_str(id);
		}
		for class in &el.classes {
			out.push('.');
			out.push_str(class);
		}
		out
	}

	fn element(&self, node: NodeId) -> Option<&Element> {
		self.nodes.get(node.0)
	}

	fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
		self.nodes.get_mut(node.0)
	}

	fn collect_matches(&self, node: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
		let Some(el) = self.element(node) else {
			return;
		};
		for &child in &el.children {
			if self.element(child).is_some_and(|c| selector.matches(c)) {
				out.push(child);
			}
			self.collect_matches(child, selector, out);
		}
	}
}

impl Document for MemoryDocument {
	fn body(&self) -> NodeId {
		self.body
	}

	fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.element(node)?.parent
	}

	fn matches(&self, node: NodeId, selector: &Selector) -> bool {
		self.element(node).is_some_and(|el| selector.matches(el))
	}

	fn query_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
		let mut out = Vec::new();
		match scope {
			Some(scope) => self.collect_matches(scope, selector, &mut out),
			None => {
				if self.matches(self.root, selector) {
					out.push(self.root);
				}
				self.collect_matches(self.root, selector, &mut out);
			}
		}
		out
	}

	fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
		self.element(node)?.attribute(name).map(str::to_string)
	}

	fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
		let Some(el) = self.element_mut(node) else {
			return;
		};
		if name == "class" {
			el.classes = value.split_whitespace().map(str::to_string).collect();
			el.sync_class_attr();
		} else {
			el.attrs.insert(name.to_string(), value.to_string());
		}
	}

	fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.element(node).is_some_and(|el| el.has_class(class))
	}

	fn add_class(&mut self, node: NodeId, class: &str) {
		if let Some(el) = self.element_mut(node)
			&& !el.has_class(class)
		{
			el.classes.push(class.to_string());
			el.sync_class_attr();
		}
	}

	fn remove_class(&mut self, node: NodeId, class: &str) {
		if let Some(el) = self.element_mut(node) {
			el.classes.retain(|c| c != class);
			el.sync_class_attr();
		}
	}

	fn set_text(&mut self, node: NodeId, text: &str) {
		if let Some(el) = self.element_mut(node) {
			el.text = text.to_string();
		}
	}

	fn style(&self, node: NodeId, property: &str) -> String {
		self.element(node)
			.and_then(|el| el.style.get(property).cloned())
			.unwrap_or_default()
	}

	fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
		let Some(el) = self.element_mut(node) else {
			return;
		};
		if value.is_empty() {
			el.style.remove(property);
		} else {
			el.style.insert(property.to_string(), value.to_string());
		}
	}

	fn active_element(&self) -> Option<NodeId> {
		self.active
	}

	fn focus(&mut self, node: NodeId, options: FocusOptions) {
		if self.element(node).is_some_and(Element::is_focusable) {
			self.active = Some(node);
			self.focus_log.push((node, options));
		}
	}

	fn blur(&mut self) {
		self.active = None;
	}

	fn viewport(&self) -> Viewport {
		self.viewport
	}

	fn bounding_top(&self, node: NodeId) -> f64 {
		self.layout_top(node) - self.viewport.scroll_y
	}

	fn offset_height(&self, node: NodeId) -> f64 {
		self.element(node).map_or(0.0, |el| el.height)
	}

	fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
		self.scroll_log.push((top, behavior));
		self.set_scroll_y(top);
	}

	fn supports_intersection_observer(&self) -> bool {
		self.intersection_observer
	}

	fn add_listener(&mut self, kind: ListenerKind, id: ListenerId) -> bool {
		if self.has_listener(kind, id) {
			return false;
		}
		self.listeners.push((kind, id));
		self.stats.added += 1;
		true
	}

	fn remove_listener(&mut self, kind: ListenerKind, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|entry| *entry != (kind, id));
		let removed = self.listeners.len() != before;
		if removed {
			self.stats.removed += 1;
		}
		removed
	}

	fn has_listener(&self, kind: ListenerKind, id: ListenerId) -> bool {
		self.listeners.contains(&(kind, id))
	}

	fn listeners(&self, kind: ListenerKind) -> Vec<ListenerId> {
		self.listeners
			.iter()
			.filter(|(k, _)| *k == kind)
			.map(|(_, id)| *id)
			.collect()
	}
}

/// Fluent construction of a freshly appended element.
pub struct ElementBuilder<'a> {
	doc: &'a mut MemoryDocument,
	node: NodeId,
}

impl ElementBuilder<'_> {
	pub fn id(self, id: &str) -> Self {
		self.attr("id", id)
	}

	pub fn class(self, class: &str) -> Self {
		self.doc.add_class(self.node, class);
		self
	}

	pub fn attr(self, name: &str, value: &str) -> Self {
		self.doc.set_attribute(self.node, name, value);
		self
	}

	pub fn text(self, text: &str) -> Self {
		self.doc.set_text(self.node, text);
		self
	}

	/// Sets the document-absolute top edge and height of the layout box.
	pub fn layout(self, top: f64, height: f64) -> Self {
		if let Some(el) = self.doc.element_mut(self.node) {
			el.top = top;
			el.height = height;
		}
		self
	}

	pub fn build(self) -> NodeId {
		self.node
	}
}
