//! Document boundary for Vitrine's page behaviors.
//!
//! Behaviors never talk to a browser directly. They receive a
//! [`Document`] and work in terms of [`NodeId`] handles, parsed
//! [`Selector`]s and identity-keyed document listeners. Hosts implement the
//! trait over their real page; [`MemoryDocument`] is the arena-backed
//! implementation used by tests and the replay harness.

pub mod document;
pub mod error;
pub mod event;
pub mod memory;
pub mod node;
pub mod selector;

pub use document::Document;
pub use error::{DomError, Result};
pub use event::{FocusOptions, Key, ListenerId, ListenerKind, ScrollBehavior, Viewport};
pub use memory::{ElementBuilder, ListenerStats, MemoryDocument};
pub use node::NodeId;
pub use selector::{Matchable, Selector};
