//! The read-only node contract the query engine is written against.

/// A borrowed node of an augmented, value-ordered binary search tree.
///
/// Implementors are cheap `Copy` handles (a reference, or an arena plus index)
/// that stay valid for `'a`. The query engine only ever reads through this
/// trait, so any balancing scheme can sit behind it as long as it maintains
/// the augmentations below between mutations.
///
/// # Contract
///
/// For every node `n` reachable from a root:
///
/// - every value in `n.left()` is less than `n.value()`, which is less than
///   every value in `n.right()`; no two nodes hold equal values;
/// - `n.multiplicity() >= 1`;
/// - `n.size() == n.multiplicity() + size(n.left()) + size(n.right())`, with
///   `size(None) == 0`;
/// - `n.height() == 1 + max(height(n.left()), height(n.right()))`, with
///   `height(None) == -1`.
///
/// These values are trusted. A node that breaks the contract produces wrong
/// answers, never undefined behavior.
///
/// # Examples
///
/// A plain boxed tree can take part without any balancing:
///
/// ```
/// use rank_tree::{NodeRef, TreeView};
///
/// struct Leaf(i32);
///
/// impl<'a> NodeRef<'a> for &'a Leaf {
///     type Value = i32;
///
///     fn value(self) -> &'a i32 { &self.0 }
///     fn left(self) -> Option<Self> { None }
///     fn right(self) -> Option<Self> { None }
///     fn size(self) -> usize { 1 }
///     fn height(self) -> i32 { 0 }
///     fn multiplicity(self) -> usize { 1 }
/// }
///
/// let leaf = Leaf(7);
/// let view = TreeView::new(Some(&leaf));
/// assert_eq!(view.rank(&8), 1);
/// ```
pub trait NodeRef<'a>: Copy {
    /// The ordered value stored in each node.
    type Value: Ord + 'a;

    /// The value held by this node.
    fn value(self) -> &'a Self::Value;

    /// The root of the left subtree, if any.
    fn left(self) -> Option<Self>;

    /// The root of the right subtree, if any.
    fn right(self) -> Option<Self>;

    /// Logical elements in this subtree, duplicates included.
    fn size(self) -> usize;

    /// Longest downward path to a leaf; a leaf has height 0.
    fn height(self) -> i32;

    /// Number of equal values collapsed into this node.
    fn multiplicity(self) -> usize;
}

/// Size of an optional subtree.
#[inline]
pub(crate) fn size_of<'a, N: NodeRef<'a>>(node: Option<N>) -> usize {
    node.map_or(0, NodeRef::size)
}

/// Height of an optional subtree, `-1` when absent.
#[inline]
pub(crate) fn height_of<'a, N: NodeRef<'a>>(node: Option<N>) -> i32 {
    node.map_or(-1, NodeRef::height)
}
