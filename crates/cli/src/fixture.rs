//! JSON page fixtures.
//!
//! ```json
//! {
//!   "viewport": { "width": 500, "height": 800, "scrollbar": 15 },
//!   "body": [
//!     { "tag": "button", "classes": ["hamburger-menu"] },
//!     { "tag": "nav", "classes": ["main-nav"], "children": [
//!       { "tag": "a", "attributes": { "href": "#contact" }, "text": "Contact" }
//!     ] },
//!     { "tag": "section", "id": "contact", "top": 2000, "height": 600 }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use vitrine_dom::{Document, MemoryDocument, NodeId, Viewport};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFixture {
	#[serde(default)]
	pub viewport: ViewportFixture,
	/// Whether the host reports intersections.
	#[serde(default = "yes")]
	pub intersection_observer: bool,
	/// Inline styles on `<body>`.
	#[serde(default)]
	pub body_style: BTreeMap<String, String>,
	#[serde(default)]
	pub body: Vec<ElementFixture>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportFixture {
	pub width: u32,
	pub height: u32,
	/// Classic scrollbar width. Zero models overlay scrollbars.
	pub scrollbar: u32,
	pub scroll_y: f64,
}

impl Default for ViewportFixture {
	fn default() -> Self {
		Self {
			width: 1280,
			height: 800,
			scrollbar: 0,
			scroll_y: 0.0,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementFixture {
	pub tag: String,
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub classes: Vec<String>,
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
	#[serde(default)]
	pub text: Option<String>,
	/// Document-absolute top of the layout box.
	#[serde(default)]
	pub top: f64,
	#[serde(default)]
	pub height: f64,
	#[serde(default)]
	pub children: Vec<ElementFixture>,
}

fn yes() -> bool {
	true
}

impl PageFixture {
	pub fn from_json(source: &str) -> serde_json::Result<Self> {
		serde_json::from_str(source)
	}

	pub fn build(&self) -> MemoryDocument {
		let ViewportFixture {
			width,
			height,
			scrollbar,
			scroll_y,
		} = self.viewport;
		let mut doc = MemoryDocument::new(Viewport {
			inner_width: width,
			inner_height: height,
			client_width: width.saturating_sub(scrollbar),
			scroll_y,
		});
		doc.set_intersection_observer(self.intersection_observer);
		let body = doc.body();
		for (property, value) in &self.body_style {
			doc.set_style(body, property, value);
		}
		for element in &self.body {
			element.append_to(&mut doc, body);
		}
		doc
	}
}

impl ElementFixture {
	fn append_to(&self, doc: &mut MemoryDocument, parent: NodeId) -> NodeId {
		let mut builder = doc.append(parent, &self.tag).layout(self.top, self.height);
		if let Some(id) = &self.id {
			builder = builder.id(id);
		}
		for class in &self.classes {
			builder = builder.class(class);
		}
		for (name, value) in &self.attributes {
			builder = builder.attr(name, value);
		}
		if let Some(text) = &self.text {
			builder = builder.text(text);
		}
		let node = builder.build();
		for child in &self.children {
			child.append_to(doc, node);
		}
		node
	}
}
