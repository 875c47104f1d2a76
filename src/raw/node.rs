use super::handle::Handle;

/// A single AVL node: one distinct value plus its duplicate count.
#[derive(Clone)]
pub(crate) struct AvlNode<T> {
    pub(crate) value: T,
    // Number of equal insertions collapsed into this node, always >= 1.
    pub(crate) multiplicity: usize,
    // Logical elements in this subtree, duplicates included.
    pub(crate) size: usize,
    // Longest path to a leaf; a leaf is 0 and a missing child is -1.
    pub(crate) height: i32,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<T> AvlNode<T> {
    /// Creates a detached leaf holding a single copy of `value`.
    pub(crate) const fn leaf(value: T) -> Self {
        Self {
            value,
            multiplicity: 1,
            size: 1,
            height: 0,
            left: None,
            right: None,
        }
    }
}
