//! In-page anchor scrolling that keeps targets clear of the fixed header.

use tracing::trace;
use vitrine_dom::{Document, NodeId, ScrollBehavior, Selector};

pub struct SmoothScroll {
	links: Selector,
	header: Option<NodeId>,
	gap: f64,
}

impl SmoothScroll {
	pub fn new(links: Selector, header: Option<NodeId>, gap: f64) -> Self {
		Self { links, header, gap }
	}

	/// Handles a click on or inside an in-page link. Returns `true` when the
	/// page was scrolled and default navigation should be suppressed.
	///
	/// A bare `#`, an id that does not resolve, or a fragment that is not a
	/// valid id selector falls through to default navigation.
	pub fn on_click(&self, doc: &mut dyn Document, target: NodeId) -> bool {
		let Some(link) = doc.closest(target, &self.links) else {
			return false;
		};
		let Some(href) = doc.attribute(link, "href") else {
			return false;
		};
		if href.len() <= 1 || !href.starts_with('#') {
			return false;
		}
		let Ok(selector) = Selector::parse(&href) else {
			return false;
		};
		let Some(section) = doc.query(None, &selector) else {
			return false;
		};

		let header_height = self.header.map_or(0.0, |header| doc.offset_height(header));
		let viewport = doc.viewport();
		let top = target_offset(
			doc.bounding_top(section),
			viewport.scroll_y,
			header_height,
			self.gap,
		);
		trace!(%href, top, "smooth scroll");
		doc.scroll_to(top, ScrollBehavior::Smooth);
		true
	}
}

/// Document offset to scroll to so a section sits `gap` pixels below the
/// header. Never negative.
pub fn target_offset(bounding_top: f64, scroll_y: f64, header_height: f64, gap: f64) -> f64 {
	(bounding_top + scroll_y - header_height - gap).max(0.0)
}
