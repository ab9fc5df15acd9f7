//! Site configuration.
//!
//! Every component is described by the selectors that locate it and a few
//! constants. All fields default to the stock landing-page markup, so an
//! empty file (or no file) is a valid configuration:
//!
//! ```toml
//! [menu]
//! trigger = ".hamburger-menu"
//! panel = ".main-nav"
//! label = "Open navigation menu"
//! breakpoint = 900
//!
//! [fab]
//! enabled = false
//!
//! [rotator]
//! interval-ms = 8000
//!
//! [smooth-scroll]
//! gap = 12.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use vitrine_dom::Selector;

use crate::error::{Result, SiteError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SiteConfig {
	pub menu: MenuConfig,
	pub fab: FabConfig,
	pub smooth_scroll: SmoothScrollConfig,
	pub reveal: RevealConfig,
	pub rotator: RotatorConfig,
	pub year: YearConfig,
}

/// Collapsible navigation menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct MenuConfig {
	pub enabled: bool,
	pub trigger: String,
	pub panel: String,
	/// `aria-label` for the trigger.
	pub label: String,
	/// Id given to the panel when the markup has none.
	pub panel_id: String,
	/// Viewport width above which an open menu closes itself.
	pub breakpoint: Option<u32>,
}

impl Default for MenuConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			trigger: ".hamburger-menu".into(),
			panel: ".main-nav".into(),
			label: "Open navigation menu".into(),
			panel_id: "site-menu".into(),
			breakpoint: Some(900),
		}
	}
}

/// Floating action button. `trigger` and `actions` are looked up inside
/// `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FabConfig {
	pub enabled: bool,
	pub root: String,
	pub trigger: String,
	pub actions: String,
	pub actions_id: String,
}

impl Default for FabConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			root: "[data-fab]".into(),
			trigger: ".fab-btn".into(),
			actions: ".fab-actions".into(),
			actions_id: "fab-actions".into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SmoothScrollConfig {
	pub enabled: bool,
	pub links: String,
	/// Fixed header whose height is kept clear above the target.
	pub header: String,
	/// Extra gap in pixels between header and target.
	pub gap: f64,
}

impl Default for SmoothScrollConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			links: "a[href^=\"#\"]".into(),
			header: ".main-header".into(),
			gap: 8.0,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RevealConfig {
	pub enabled: bool,
	pub targets: String,
	pub visible_class: String,
	/// Fraction of the target that must be visible, in `0.0..=1.0`.
	pub threshold: f64,
	/// Fraction of the viewport height trimmed from the bottom edge.
	pub bottom_margin: f64,
}

impl Default for RevealConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			targets: ".fade-in".into(),
			visible_class: "visible".into(),
			threshold: 0.15,
			bottom_margin: 0.10,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RotatorConfig {
	pub enabled: bool,
	pub root: String,
	pub items: String,
	pub active_class: String,
	pub interval_ms: u64,
}

impl Default for RotatorConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			root: ".testimonial-rotator".into(),
			items: ".testimonial-item".into(),
			active_class: "active".into(),
			interval_ms: 6000,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct YearConfig {
	pub enabled: bool,
	pub target: String,
}

impl Default for YearConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			target: "[data-year]".into(),
		}
	}
}

impl SiteConfig {
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let source = std::fs::read_to_string(path).map_err(|error| SiteError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// Checks numeric ranges and that every selector parses.
	pub fn validate(&self) -> Result<()> {
		if !(0.0..=1.0).contains(&self.reveal.threshold) {
			return Err(SiteError::Invalid {
				field: "reveal.threshold",
				reason: format!("{} is outside 0.0..=1.0", self.reveal.threshold),
			});
		}
		if !(0.0..1.0).contains(&self.reveal.bottom_margin) {
			return Err(SiteError::Invalid {
				field: "reveal.bottom-margin",
				reason: format!("{} is outside 0.0..1.0", self.reveal.bottom_margin),
			});
		}
		if self.rotator.interval_ms == 0 {
			return Err(SiteError::Invalid {
				field: "rotator.interval-ms",
				reason: "must be positive".into(),
			});
		}
		for (field, class) in [
			("reveal.visible-class", &self.reveal.visible_class),
			("rotator.active-class", &self.rotator.active_class),
		] {
			if class.is_empty() || class.contains(char::is_whitespace) {
				return Err(SiteError::Invalid {
					field,
					reason: format!("`{class}` is not a single class name"),
				});
			}
		}
		for (field, source) in self.selectors() {
			selector(field, source)?;
		}
		Ok(())
	}

	fn selectors(&self) -> [(&'static str, &str); 11] {
		[
			("menu.trigger", self.menu.trigger.as_str()),
			("menu.panel", self.menu.panel.as_str()),
			("fab.root", self.fab.root.as_str()),
			("fab.trigger", self.fab.trigger.as_str()),
			("fab.actions", self.fab.actions.as_str()),
			("smooth-scroll.links", self.smooth_scroll.links.as_str()),
			("smooth-scroll.header", self.smooth_scroll.header.as_str()),
			("reveal.targets", self.reveal.targets.as_str()),
			("rotator.root", self.rotator.root.as_str()),
			("rotator.items", self.rotator.items.as_str()),
			("year.target", self.year.target.as_str()),
		]
	}
}

/// Parses a configured selector, tagging failures with their config key.
pub(crate) fn selector(field: &'static str, source: &str) -> Result<Selector> {
	Selector::parse(source).map_err(|source| SiteError::Selector { field, source })
}
