/// Handle to an element in a [`Document`](crate::Document).
///
/// Handles are relations, not ownership: holding one keeps nothing alive and
/// only means something to the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Returns the raw arena index.
	pub fn index(self) -> usize {
		self.0
	}
}
