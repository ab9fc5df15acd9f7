//! Interaction scripts and per-step snapshots.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrine_dom::{Document, Key, MemoryDocument, NodeId, Selector};
use vitrine_overlay::ScrollGuard;
use vitrine_site::Site;

/// One user or host action. Targets are selectors resolved against the
/// page when the step runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Step {
	Click { target: String },
	/// DOM `KeyboardEvent.key` value, e.g. `"Escape"` or `" "`.
	Key { key: String },
	Focus { target: String },
	Blur,
	Resize { width: u32, height: u32 },
	Scroll { y: f64 },
	Hover { target: String },
	Leave { target: String },
	Tick { ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
	pub step: usize,
	pub action: String,
	/// Whether a click suppressed default navigation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_prevented: Option<bool>,
	pub overlays: Vec<OverlaySnapshot>,
	pub scroll_locked: bool,
	pub body_overflow: String,
	pub body_padding_right: String,
	pub focused: Option<String>,
	pub scroll_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
	pub name: &'static str,
	pub open: bool,
	pub aria_expanded: Option<String>,
}

pub fn parse(source: &str) -> serde_json::Result<Vec<Step>> {
	serde_json::from_str(source)
}

/// Applies each step in order, snapshotting the page after every one.
pub fn replay(doc: &mut MemoryDocument, site: &mut Site, steps: &[Step]) -> Result<Vec<Snapshot>> {
	steps
		.iter()
		.enumerate()
		.map(|(index, step)| {
			let default_prevented = apply(doc, site, step)
				.with_context(|| format!("step {} ({step:?})", index + 1))?;
			debug!(step = index + 1, ?step, "step applied");
			Ok(snapshot(doc, site, index + 1, step, default_prevented))
		})
		.collect()
}

fn apply(doc: &mut MemoryDocument, site: &mut Site, step: &Step) -> Result<Option<bool>> {
	match step {
		Step::Click { target } => {
			let node = resolve(doc, target)?;
			return Ok(Some(site.click(doc, node)));
		}
		Step::Key { key } => {
			site.key(doc, &Key::from_dom(key));
		}
		Step::Focus { target } => {
			let node = resolve(doc, target)?;
			site.focus(doc, Some(node));
		}
		Step::Blur => site.focus(doc, None),
		Step::Resize { width, height } => {
			doc.resize(*width, *height);
			site.resize(doc);
		}
		Step::Scroll { y } => {
			doc.set_scroll_y(*y);
			site.scrolled(doc);
		}
		Step::Hover { target } => {
			let node = resolve(doc, target)?;
			site.pointer_enter(doc, node);
		}
		Step::Leave { target } => {
			let node = resolve(doc, target)?;
			site.pointer_leave(doc, node);
		}
		Step::Tick { ms } => {
			site.tick(doc, Duration::from_millis(*ms));
		}
	}
	Ok(None)
}

fn resolve(doc: &MemoryDocument, target: &str) -> Result<NodeId> {
	let selector = Selector::parse(target).with_context(|| format!("target `{target}`"))?;
	doc.query(None, &selector)
		.ok_or_else(|| anyhow!("no element matches `{target}`"))
}

fn snapshot(
	doc: &MemoryDocument,
	site: &Site,
	step: usize,
	action: &Step,
	default_prevented: Option<bool>,
) -> Snapshot {
	let body = doc.body();
	Snapshot {
		step,
		action: describe(action),
		default_prevented,
		overlays: site
			.overlays()
			.iter()
			.map(|overlay| OverlaySnapshot {
				name: overlay.name(),
				open: overlay.is_open(doc),
				aria_expanded: doc.attribute(overlay.parts().trigger, "aria-expanded"),
			})
			.collect(),
		scroll_locked: site.scroll_lock().borrow().is_locked(),
		body_overflow: doc.style(body, "overflow"),
		body_padding_right: doc.style(body, "padding-right"),
		focused: doc.active_element().map(|node| doc.describe(node)),
		scroll_y: doc.viewport().scroll_y,
	}
}

fn describe(step: &Step) -> String {
	match step {
		Step::Click { target } => format!("click {target}"),
		Step::Key { key } => format!("key {key:?}"),
		Step::Focus { target } => format!("focus {target}"),
		Step::Blur => "blur".into(),
		Step::Resize { width, height } => format!("resize {width}x{height}"),
		Step::Scroll { y } => format!("scroll {y}"),
		Step::Hover { target } => format!("hover {target}"),
		Step::Leave { target } => format!("leave {target}"),
		Step::Tick { ms } => format!("tick {ms}ms"),
	}
}
