use core::cmp::Ordering::{Equal, Greater, Less};
use core::fmt;
use core::marker::PhantomData;

use log::debug;

use crate::node::{height_of, size_of};
use crate::traversal::{Cursor, Range, TraversalOrder};
use crate::{Error, NodeRef, Result};

mod order_statistic;

/// A read-only query engine over an augmented binary search tree.
///
/// A `TreeView` is a `Copy` wrapper around an optional root [`NodeRef`]. Every
/// query is a pure function of the tree it borrows; none allocate nodes or
/// change shape. Queries that descend the tree run in O(height), and none of
/// them recurse, so even a degenerate tree is safe to query.
///
/// Values are counted *logically*: a node with multiplicity `m` contributes
/// `m` equal elements to sizes, ranks and traversals.
///
/// # Examples
///
/// ```
/// use rank_tree::AvlTree;
///
/// let tree = AvlTree::from([1, 2, 3, 3, 4, 5]);
/// let view = tree.view();
///
/// assert_eq!(view.len(), 6);
/// assert_eq!(view.rank(&3), 2);
/// assert_eq!(view.rank(&4), 4);
/// assert_eq!(view.select(3), Ok(&3));
/// assert_eq!(view.floor(&0), Ok(None));
/// assert_eq!(view.values_between(&2, &4).count(), 4);
/// ```
pub struct TreeView<'a, N> {
    root: Option<N>,
    marker: PhantomData<&'a ()>,
}

impl<N: Copy> Clone for TreeView<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Copy> Copy for TreeView<'_, N> {}

impl<'a, N: NodeRef<'a>> TreeView<'a, N> {
    /// Creates a view over the tree rooted at `root`; `None` is the empty tree.
    pub const fn new(root: Option<N>) -> Self {
        Self {
            root,
            marker: PhantomData,
        }
    }

    /// Returns the root node, if any.
    #[must_use]
    pub fn root(&self) -> Option<N> {
        self.root
    }

    /// Returns `true` if the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of logical elements, duplicates included.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        size_of(self.root)
    }

    /// Returns the number of logical elements in `lo..=hi`.
    ///
    /// Computed as `rank(hi) - rank(lo)`, plus the copies of `hi` when `hi` is
    /// present. Returns 0 when `lo > hi` or the tree is empty. Always equals
    /// `values_between(lo, hi).count()`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2, 3, 4, 5]);
    /// assert_eq!(tree.view().len_between(&2, &4), 3);
    /// assert_eq!(tree.view().len_between(&4, &2), 0);
    /// ```
    #[must_use]
    pub fn len_between(&self, lo: &N::Value, hi: &N::Value) -> usize {
        if lo > hi {
            return 0;
        }
        // `count(hi)` is 0 when `hi` is absent.
        self.rank(hi).saturating_sub(self.rank(lo)) + self.count(hi)
    }

    /// Returns the height of the tree: 0 for a single node, -1 when empty.
    #[must_use]
    pub fn height(&self) -> i32 {
        height_of(self.root)
    }

    /// Returns the smallest value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty.
    pub fn min(&self) -> Result<&'a N::Value> {
        let mut node = self.root.ok_or_else(|| empty("min"))?;
        while let Some(left) = node.left() {
            node = left;
        }
        Ok(node.value())
    }

    /// Returns the largest value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty.
    pub fn max(&self) -> Result<&'a N::Value> {
        let mut node = self.root.ok_or_else(|| empty("max"))?;
        while let Some(right) = node.right() {
            node = right;
        }
        Ok(node.value())
    }

    /// Returns `true` if some node holds `value`.
    #[must_use]
    pub fn contains(&self, value: &N::Value) -> bool {
        self.find(value).is_some()
    }

    /// Returns how many copies of `value` the tree holds.
    #[must_use]
    pub fn count(&self, value: &N::Value) -> usize {
        self.find(value).map_or(0, NodeRef::multiplicity)
    }

    /// Returns the node holding `value`.
    pub(crate) fn find(&self, value: &N::Value) -> Option<N> {
        let mut node = self.root;
        while let Some(current) = node {
            node = match value.cmp(current.value()) {
                Less => current.left(),
                Greater => current.right(),
                Equal => return Some(current),
            };
        }
        None
    }

    /// Returns every element in ascending order. Same as
    /// [`values_in_order`](Self::values_in_order).
    pub fn values(&self) -> Cursor<'a, N> {
        self.values_in_order()
    }

    /// Returns every element `v` with `lo <= v <= hi` in ascending order.
    ///
    /// Empty when `lo > hi`.
    pub fn values_between(&self, lo: &N::Value, hi: &N::Value) -> Range<'a, N> {
        Range::new(*self, lo, hi)
    }

    /// Left subtree, node, right subtree.
    pub fn values_in_order(&self) -> Cursor<'a, N> {
        self.iter(TraversalOrder::InOrder)
    }

    /// Node, left subtree, right subtree.
    pub fn values_pre_order(&self) -> Cursor<'a, N> {
        self.iter(TraversalOrder::PreOrder)
    }

    /// Left subtree, right subtree, node.
    pub fn values_post_order(&self) -> Cursor<'a, N> {
        self.iter(TraversalOrder::PostOrder)
    }

    /// Breadth first, left to right.
    pub fn values_level_order(&self) -> Cursor<'a, N> {
        self.iter(TraversalOrder::LevelOrder)
    }

    /// Returns a fresh cursor over the tree in `order`.
    pub fn iter(&self, order: TraversalOrder) -> Cursor<'a, N> {
        Cursor::new(*self, order)
    }
}

fn empty(operation: &'static str) -> Error {
    debug!("rejected `{operation}()` on an empty tree");
    Error::EmptyTree { operation }
}

impl<'a, N: NodeRef<'a>> IntoIterator for TreeView<'a, N> {
    type Item = &'a N::Value;
    type IntoIter = Cursor<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

impl<'a, N: NodeRef<'a>> fmt::Debug for TreeView<'a, N>
where
    N::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
