//! Page scroll locking.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;
use vitrine_dom::Document;

const OVERFLOW: &str = "overflow";
const PADDING_RIGHT: &str = "padding-right";

/// Guard over page-level scrolling.
///
/// `lock` and `unlock` are idempotent: repeating either while already in
/// the target state changes nothing. The guard has at most one logical
/// holder; it does not count acquisitions.
pub trait ScrollGuard {
	fn lock(&mut self, doc: &mut dyn Document);
	fn unlock(&mut self, doc: &mut dyn Document);
	fn is_locked(&self) -> bool;
}

/// A scroll guard shared by every overlay that needs it.
pub type SharedScrollGuard = Rc<RefCell<dyn ScrollGuard>>;

/// Freezes body scrolling and compensates for the vanishing scrollbar.
///
/// Body `overflow` and `padding-right` are captured on lock and written
/// back verbatim on unlock. Nothing else may touch those two properties
/// while the lock is held.
#[derive(Debug, Default)]
pub struct ScrollLock {
	locked: bool,
	saved_overflow: String,
	saved_padding_right: String,
}

impl ScrollLock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps a fresh lock for injection into controllers.
	pub fn shared() -> SharedScrollGuard {
		Rc::new(RefCell::new(Self::new()))
	}
}

impl ScrollGuard for ScrollLock {
	fn lock(&mut self, doc: &mut dyn Document) {
		if self.locked {
			return;
		}
		let body = doc.body();
		self.saved_overflow = doc.style(body, OVERFLOW);
		self.saved_padding_right = doc.style(body, PADDING_RIGHT);

		let scrollbar = doc.viewport().scrollbar_width();
		if scrollbar > 0 {
			doc.set_style(body, PADDING_RIGHT, &format!("{scrollbar}px"));
		}
		doc.set_style(body, OVERFLOW, "hidden");
		self.locked = true;
		trace!(scrollbar, "page scroll locked");
	}

	fn unlock(&mut self, doc: &mut dyn Document) {
		if !self.locked {
			return;
		}
		let body = doc.body();
		doc.set_style(body, OVERFLOW, &std::mem::take(&mut self.saved_overflow));
		doc.set_style(body, PADDING_RIGHT, &std::mem::take(&mut self.saved_padding_right));
		self.locked = false;
		trace!("page scroll unlocked");
	}

	fn is_locked(&self) -> bool {
		self.locked
	}
}
