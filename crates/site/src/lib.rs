//! Site behavior wiring.
//!
//! [`Site::init`] reads a [`SiteConfig`], binds the page's overlays and
//! widgets, and from then on routes host input to them:
//!
//! ```
//! use vitrine_dom::{Document, MemoryDocument};
//! use vitrine_site::{Site, SiteConfig};
//!
//! let mut doc = MemoryDocument::default();
//! let body = doc.body();
//! let header = doc.append(body, "header").build();
//! let trigger = doc.append(header, "button").class("hamburger-menu").build();
//! let nav = doc.append(header, "nav").class("main-nav").build();
//! doc.append(nav, "a").attr("href", "#about");
//!
//! let mut site = Site::init(&mut doc, &SiteConfig::default()).unwrap();
//! site.click(&mut doc, trigger);
//! assert!(doc.has_class(nav, "active"));
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod site;
pub mod widgets;

pub use config::SiteConfig;
pub use discovery::{OverlayKind, discover};
pub use error::{Result, SiteError};
pub use site::Site;
