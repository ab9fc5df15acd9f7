//! Page-level event routing.

use std::time::Duration;

use tracing::{debug, info, trace};
use vitrine_dom::{Document, FocusOptions, Key, ListenerKind, NodeId, Selector};
use vitrine_overlay::{OverlayController, ScrollLock, SharedScrollGuard};

use crate::config::{SiteConfig, selector};
use crate::discovery::discover;
use crate::error::Result;
use crate::widgets::year::{current_year, stamp};
use crate::widgets::{Intersection, Reveal, RevealOptions, Rotator, SmoothScroll};

/// Every behavior installed on one page, plus the routing that feeds them
/// events in DOM dispatch order.
///
/// The host forwards raw input here. Handlers attached to an element run
/// before handlers on its ancestors, and document listeners run last, only
/// if they are still registered when their turn comes.
pub struct Site {
	overlays: Vec<OverlayController>,
	scroll_lock: SharedScrollGuard,
	smooth_scroll: Option<SmoothScroll>,
	reveal: Option<Reveal>,
	rotator: Option<Rotator>,
	links: Selector,
	buttons: Selector,
}

impl Site {
	/// Wires every configured behavior, stamping the current local year.
	pub fn init(doc: &mut dyn Document, config: &SiteConfig) -> Result<Self> {
		Self::init_with_year(doc, config, current_year())
	}

	pub fn init_with_year(doc: &mut dyn Document, config: &SiteConfig, year: i32) -> Result<Self> {
		config.validate()?;

		let scroll_lock = ScrollLock::shared();
		let overlays = discover(doc, config, &scroll_lock)?;

		let smooth_scroll = if config.smooth_scroll.enabled {
			let links = selector("smooth-scroll.links", &config.smooth_scroll.links)?;
			let header = selector("smooth-scroll.header", &config.smooth_scroll.header)?;
			let header = doc.query(None, &header);
			Some(SmoothScroll::new(links, header, config.smooth_scroll.gap))
		} else {
			None
		};

		let reveal = if config.reveal.enabled {
			let targets = selector("reveal.targets", &config.reveal.targets)?;
			let targets = doc.query_all(None, &targets);
			if targets.is_empty() {
				debug!("no reveal targets");
				None
			} else {
				let options = RevealOptions {
					threshold: config.reveal.threshold,
					bottom_margin: config.reveal.bottom_margin,
				};
				Some(Reveal::init(doc, targets, config.reveal.visible_class.clone(), options))
			}
		} else {
			None
		};

		let rotator = if config.rotator.enabled {
			match doc.query(None, &selector("rotator.root", &config.rotator.root)?) {
				Some(root) => {
					let items = selector("rotator.items", &config.rotator.items)?;
					let items = doc.query_all(Some(root), &items);
					Some(Rotator::init(
						doc,
						root,
						items,
						config.rotator.active_class.clone(),
						Duration::from_millis(config.rotator.interval_ms),
					))
				}
				None => {
					debug!("no testimonial rotator");
					None
				}
			}
		} else {
			None
		};

		if config.year.enabled {
			if let Some(target) = doc.query(None, &selector("year.target", &config.year.target)?) {
				stamp(doc, target, year);
			}
		}

		info!(
			overlays = overlays.len(),
			smooth_scroll = smooth_scroll.is_some(),
			reveal = reveal.is_some(),
			rotator = rotator.is_some(),
			"site initialized"
		);

		Ok(Self {
			overlays,
			scroll_lock,
			smooth_scroll,
			reveal,
			rotator,
			links: Selector::tags(&["a"]),
			buttons: Selector::tags(&["button"]),
		})
	}

	pub fn overlays(&self) -> &[OverlayController] {
		&self.overlays
	}

	pub fn overlay(&self, name: &str) -> Option<&OverlayController> {
		self.overlays.iter().find(|o| o.name() == name)
	}

	pub fn scroll_lock(&self) -> &SharedScrollGuard {
		&self.scroll_lock
	}

	pub fn reveal(&self) -> Option<&Reveal> {
		self.reveal.as_ref()
	}

	pub fn rotator(&self) -> Option<&Rotator> {
		self.rotator.as_ref()
	}

	/// Dispatches a click on `target`. Returns `true` when default
	/// navigation was prevented.
	pub fn click(&mut self, doc: &mut dyn Document, target: NodeId) -> bool {
		trace!(node = target.index(), "click");
		let before = doc.active_element();
		let prevented = self
			.smooth_scroll
			.as_ref()
			.is_some_and(|scroll| scroll.on_click(doc, target));
		self.dispatch_click(doc, target);
		self.focus_moved(doc, before);
		prevented
	}

	fn dispatch_click(&mut self, doc: &mut dyn Document, target: NodeId) {
		// Trigger handlers stop propagation.
		if let Some(overlay) = self
			.overlays
			.iter_mut()
			.find(|o| doc.contains(o.parts().trigger, target))
		{
			overlay.toggle(doc);
			return;
		}

		for overlay in &mut self.overlays {
			overlay.on_panel_click(doc, target);
		}
		self.dispatch_document(doc, ListenerKind::Click, |overlay, doc| {
			overlay.on_document_click(doc, target);
		});
	}

	/// Dispatches a keydown to the document, then applies the browser's
	/// activation behavior for the focused control. Returns whether the key
	/// activated it.
	pub fn key(&mut self, doc: &mut dyn Document, key: &Key) -> bool {
		trace!(?key, "keydown");
		let before = doc.active_element();
		self.dispatch_document(doc, ListenerKind::KeyDown, |overlay, doc| {
			overlay.on_document_key(doc, key);
		});
		self.focus_moved(doc, before);

		let Some(focused) = doc.active_element() else {
			return false;
		};
		let activates = match key {
			Key::Enter => doc.matches(focused, &self.buttons) || doc.matches(focused, &self.links),
			Key::Space => doc.matches(focused, &self.buttons),
			_ => false,
		};
		if activates {
			self.click(doc, focused);
		}
		activates
	}

	/// Moves focus to `next`, or out of the document, and delivers the
	/// resulting focusout to overlays and the rotator.
	pub fn focus(&mut self, doc: &mut dyn Document, next: Option<NodeId>) {
		let previous = doc.active_element();
		match next {
			Some(node) => doc.focus(node, FocusOptions::default()),
			None => doc.blur(),
		}
		self.focus_moved(doc, previous);
	}

	/// Delivers focusout for a move from `previous` to the current active
	/// element, whoever moved it.
	fn focus_moved(&mut self, doc: &mut dyn Document, previous: Option<NodeId>) {
		let current = doc.active_element();
		if previous == current {
			return;
		}
		trace!(?previous, ?current, "focus moved");

		if let Some(previous) = previous {
			for overlay in &mut self.overlays {
				if doc.contains(overlay.parts().focus_scope, previous) {
					overlay.on_focus_out(doc, current);
				}
			}
		}

		if let Some(rotator) = &mut self.rotator {
			let root = rotator.root();
			let was_inside = previous.is_some_and(|n| doc.contains(root, n));
			let is_inside = current.is_some_and(|n| doc.contains(root, n));
			match (was_inside, is_inside) {
				(false, true) => rotator.stop(),
				(true, false) => rotator.start(),
				_ => {}
			}
		}
	}

	pub fn resize(&mut self, doc: &mut dyn Document) {
		let before = doc.active_element();
		for overlay in &mut self.overlays {
			overlay.on_resize(doc);
		}
		self.focus_moved(doc, before);
	}

	pub fn pointer_enter(&mut self, doc: &dyn Document, target: NodeId) {
		if let Some(rotator) = &mut self.rotator
			&& doc.contains(rotator.root(), target)
		{
			rotator.stop();
		}
	}

	pub fn pointer_leave(&mut self, doc: &dyn Document, target: NodeId) {
		if let Some(rotator) = &mut self.rotator
			&& doc.contains(rotator.root(), target)
		{
			rotator.start();
		}
	}

	/// Applies intersection reports from a host observer.
	pub fn intersections(&mut self, doc: &mut dyn Document, entries: &[Intersection]) -> usize {
		self.reveal
			.as_mut()
			.map_or(0, |reveal| reveal.on_intersections(doc, entries))
	}

	/// Recomputes reveal intersections after the page scrolled.
	pub fn scrolled(&mut self, doc: &mut dyn Document) -> usize {
		self.reveal.as_mut().map_or(0, |reveal| reveal.sweep(doc))
	}

	pub fn tick(&mut self, doc: &mut dyn Document, elapsed: Duration) -> usize {
		self.rotator
			.as_mut()
			.map_or(0, |rotator| rotator.tick(doc, elapsed))
	}

	/// Runs the document listeners of `kind` registered at dispatch time,
	/// skipping any removed by an earlier handler in the same dispatch.
	fn dispatch_document(
		&mut self,
		doc: &mut dyn Document,
		kind: ListenerKind,
		mut handler: impl FnMut(&mut OverlayController, &mut dyn Document),
	) {
		for id in doc.listeners(kind) {
			if !doc.has_listener(kind, id) {
				continue;
			}
			if let Some(overlay) = self.overlays.iter_mut().find(|o| o.handles(kind, id)) {
				handler(overlay, &mut *doc);
			}
		}
	}
}
