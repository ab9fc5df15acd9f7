//! Overlay discovery.
//!
//! The page's overlays come from a fixed registration list. Each kind knows
//! how to build its [`OverlaySpec`] from configuration and how to find its
//! elements. A kind whose elements are absent is skipped, never an error.

use tracing::{debug, warn};
use vitrine_dom::Document;
use vitrine_overlay::{OverlayController, OverlayParts, OverlaySpec, SharedScrollGuard};

use crate::config::{SiteConfig, selector};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
	NavMenu,
	Fab,
}

impl OverlayKind {
	/// Registration order, which is also dispatch order.
	pub const ALL: [Self; 2] = [Self::NavMenu, Self::Fab];

	pub fn is_enabled(self, config: &SiteConfig) -> bool {
		match self {
			Self::NavMenu => config.menu.enabled,
			Self::Fab => config.fab.enabled,
		}
	}

	pub fn spec(self, config: &SiteConfig) -> OverlaySpec {
		match self {
			Self::NavMenu => OverlaySpec::nav_menu()
				.with_label(config.menu.label.clone())
				.with_breakpoint(config.menu.breakpoint)
				.with_fallback_id(config.menu.panel_id.clone()),
			Self::Fab => OverlaySpec::fab().with_fallback_id(config.fab.actions_id.clone()),
		}
	}

	/// Locates this kind's elements. `Ok(None)` means the page lacks them.
	///
	/// The FAB's trigger and action list are searched inside its root, which
	/// acts as the panel so clicks anywhere in the widget stay inside.
	pub fn resolve(self, doc: &dyn Document, config: &SiteConfig) -> Result<Option<OverlayParts>> {
		match self {
			Self::NavMenu => {
				let trigger = doc.query(None, &selector("menu.trigger", &config.menu.trigger)?);
				let panel = doc.query(None, &selector("menu.panel", &config.menu.panel)?);
				if trigger.is_some() != panel.is_some() {
					warn!(
						trigger = trigger.is_some(),
						panel = panel.is_some(),
						"menu markup is incomplete"
					);
				}
				Ok(trigger.zip(panel).map(|(trigger, panel)| OverlayParts::new(trigger, panel)))
			}
			Self::Fab => {
				let Some(root) = doc.query(None, &selector("fab.root", &config.fab.root)?) else {
					return Ok(None);
				};
				let trigger = doc.query(Some(root), &selector("fab.trigger", &config.fab.trigger)?);
				let actions = doc.query(Some(root), &selector("fab.actions", &config.fab.actions)?);
				if trigger.is_none() || actions.is_none() {
					warn!(
						trigger = trigger.is_some(),
						actions = actions.is_some(),
						"fab root found without its trigger or actions"
					);
				}
				Ok(trigger.zip(actions).map(|(trigger, actions)| {
					OverlayParts::new(trigger, root).with_focus_scope(actions)
				}))
			}
		}
	}
}

/// Binds a controller for every enabled kind whose elements are present.
pub fn discover(
	doc: &mut dyn Document,
	config: &SiteConfig,
	scroll: &SharedScrollGuard,
) -> Result<Vec<OverlayController>> {
	let mut overlays = Vec::with_capacity(OverlayKind::ALL.len());
	for kind in OverlayKind::ALL {
		if !kind.is_enabled(config) {
			debug!(?kind, "overlay disabled");
			continue;
		}
		let Some(parts) = kind.resolve(doc, config)? else {
			debug!(?kind, "overlay elements not found, skipping");
			continue;
		};
		let spec = kind.spec(config);
		overlays.push(OverlayController::bind(doc, spec, parts, Some(scroll.clone())));
	}
	Ok(overlays)
}
