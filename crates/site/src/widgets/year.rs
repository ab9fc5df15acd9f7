use chrono::Datelike;
use vitrine_dom::{Document, NodeId};

/// Current year in local time.
pub fn current_year() -> i32 {
	chrono::Local::now().year()
}

/// Writes `year` as the element's text.
pub fn stamp(doc: &mut dyn Document, node: NodeId, year: i32) {
	doc.set_text(node, &year.to_string());
}
