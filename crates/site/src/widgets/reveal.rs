//! Scroll-triggered reveal of `.fade-in` sections.

use tracing::debug;
use vitrine_dom::{Document, NodeId};

/// Observation parameters handed to the host's intersection observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
	/// Visible fraction of a target required to reveal it.
	pub threshold: f64,
	/// Fraction of the viewport height excluded at the bottom, like a
	/// negative bottom root margin.
	pub bottom_margin: f64,
}

impl Default for RevealOptions {
	fn default() -> Self {
		Self {
			threshold: 0.15,
			bottom_margin: 0.10,
		}
	}
}

/// One intersection report from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
	pub target: NodeId,
	pub is_intersecting: bool,
}

/// Reveals each target the first time it intersects, then stops watching
/// it.
pub struct Reveal {
	observed: Vec<NodeId>,
	visible_class: String,
	options: RevealOptions,
}

impl Reveal {
	/// Starts observing `targets`. Hosts without intersection support get
	/// every target revealed immediately.
	pub fn init(
		doc: &mut dyn Document,
		targets: Vec<NodeId>,
		visible_class: impl Into<String>,
		options: RevealOptions,
	) -> Self {
		let visible_class = visible_class.into();
		let observed = if doc.supports_intersection_observer() {
			targets
		} else {
			debug!(count = targets.len(), "no intersection support, revealing all");
			for &target in &targets {
				doc.add_class(target, &visible_class);
			}
			Vec::new()
		};
		Self {
			observed,
			visible_class,
			options,
		}
	}

	/// Targets still waiting to be revealed.
	pub fn observed(&self) -> &[NodeId] {
		&self.observed
	}

	/// Applies host intersection reports. Returns how many targets were
	/// revealed.
	pub fn on_intersections(&mut self, doc: &mut dyn Document, entries: &[Intersection]) -> usize {
		let mut revealed = 0;
		for entry in entries.iter().filter(|e| e.is_intersecting) {
			let Some(pos) = self.observed.iter().position(|&n| n == entry.target) else {
				continue;
			};
			self.observed.swap_remove(pos);
			doc.add_class(entry.target, &self.visible_class);
			revealed += 1;
		}
		revealed
	}

	/// Computes intersections from layout for hosts that report scroll
	/// position but run no observer of their own.
	pub fn sweep(&mut self, doc: &mut dyn Document) -> usize {
		let viewport_height = f64::from(doc.viewport().inner_height);
		let entries: Vec<Intersection> = self
			.observed
			.iter()
			.map(|&target| Intersection {
				target,
				is_intersecting: intersects(
					doc.bounding_top(target),
					doc.offset_height(target),
					viewport_height,
					self.options,
				),
			})
			.collect();
		self.on_intersections(doc, &entries)
	}
}

/// Whether a box at viewport offset `top` with `height` is visible enough.
pub fn intersects(top: f64, height: f64, viewport_height: f64, options: RevealOptions) -> bool {
	let root_bottom = viewport_height * (1.0 - options.bottom_margin);
	let visible = (top + height).min(root_bottom) - top.max(0.0);
	if height <= 0.0 {
		return (0.0..=root_bottom).contains(&top);
	}
	visible > 0.0 && visible / height >= options.threshold
}
