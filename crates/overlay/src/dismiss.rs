//! Document-level dismissal listeners.

use tracing::trace;
use vitrine_dom::{Document, ListenerId, ListenerKind};

/// The click and keydown handlers one overlay installs while open.
///
/// Identities are minted once at construction, so every registration is
/// undone by a deregistration of the very same pair. `active` tracks whether
/// the pair is currently installed; registering while active or
/// deregistering while inactive does nothing.
#[derive(Debug)]
pub struct DismissListeners {
	click: ListenerId,
	keydown: ListenerId,
	active: bool,
}

impl Default for DismissListeners {
	fn default() -> Self {
		Self::new()
	}
}

impl DismissListeners {
	pub fn new() -> Self {
		Self {
			click: ListenerId::fresh(),
			keydown: ListenerId::fresh(),
			active: false,
		}
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Whether `(kind, id)` is one of this pair's handlers.
	pub fn owns(&self, kind: ListenerKind, id: ListenerId) -> bool {
		match kind {
			ListenerKind::Click => id == self.click,
			ListenerKind::KeyDown => id == self.keydown,
		}
	}

	/// Installs both handlers. Returns `false` if they were already active.
	pub fn register(&mut self, doc: &mut dyn Document) -> bool {
		if self.active {
			return false;
		}
		doc.add_listener(ListenerKind::Click, self.click);
		doc.add_listener(ListenerKind::KeyDown, self.keydown);
		self.active = true;
		trace!(
			click = self.click.get(),
			keydown = self.keydown.get(),
			"dismiss listeners registered"
		);
		true
	}

	/// Removes both handlers. Returns `false` if they were not active.
	pub fn deregister(&mut self, doc: &mut dyn Document) -> bool {
		if !self.active {
			return false;
		}
		doc.remove_listener(ListenerKind::Click, self.click);
		doc.remove_listener(ListenerKind::KeyDown, self.keydown);
		self.active = false;
		trace!(
			click = self.click.get(),
			keydown = self.keydown.get(),
			"dismiss listeners removed"
		);
		true
	}
}
