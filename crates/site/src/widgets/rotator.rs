//! Testimonial carousel.
//!
//! Time is fed in through [`Rotator::tick`] instead of a wall-clock timer,
//! so the host owns the clock and tests advance it explicitly.

use std::time::Duration;

use tracing::trace;
use vitrine_dom::{Document, NodeId};

pub struct Rotator {
	root: NodeId,
	items: Vec<NodeId>,
	active_class: String,
	index: usize,
	interval: Duration,
	elapsed: Duration,
	running: bool,
}

impl Rotator {
	/// Starts rotating from the item already marked active, or the first.
	pub fn init(
		doc: &dyn Document,
		root: NodeId,
		items: Vec<NodeId>,
		active_class: impl Into<String>,
		interval: Duration,
	) -> Self {
		let active_class = active_class.into();
		let index = items
			.iter()
			.position(|&item| doc.has_class(item, &active_class))
			.unwrap_or(0);
		let mut rotator = Self {
			root,
			items,
			active_class,
			index,
			interval,
			elapsed: Duration::ZERO,
			running: false,
		};
		rotator.start();
		rotator
	}

	pub fn root(&self) -> NodeId {
		self.root
	}

	pub fn current(&self) -> Option<NodeId> {
		self.items.get(self.index).copied()
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Restarts the interval from zero. A rotator without items never runs.
	pub fn start(&mut self) {
		self.elapsed = Duration::ZERO;
		self.running = !self.items.is_empty();
	}

	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Advances the clock. Returns how many rotations happened.
	pub fn tick(&mut self, doc: &mut dyn Document, elapsed: Duration) -> usize {
		if !self.running || self.interval.is_zero() {
			return 0;
		}
		self.elapsed += elapsed;
		let mut steps = 0;
		while self.elapsed >= self.interval {
			self.elapsed -= self.interval;
			self.index = (self.index + 1) % self.items.len();
			steps += 1;
		}
		if steps > 0 {
			self.show(doc, self.index);
			trace!(index = self.index, steps, "testimonial rotated");
		}
		steps
	}

	/// Marks item `index` active and every other item inactive.
	pub fn show(&mut self, doc: &mut dyn Document, index: usize) {
		for (k, &item) in self.items.iter().enumerate() {
			if k == index {
				doc.add_class(item, &self.active_class);
			} else {
				doc.remove_class(item, &self.active_class);
			}
		}
	}
}
