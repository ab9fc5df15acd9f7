//! Page widgets that live alongside the overlays.
//!
//! Each works on its own subtree and never touches overlay state.

pub mod reveal;
pub mod rotator;
pub mod smooth_scroll;
pub mod year;

pub use reveal::{Intersection, Reveal, RevealOptions};
pub use rotator::Rotator;
pub use smooth_scroll::SmoothScroll;
