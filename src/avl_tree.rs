use core::fmt;

use crate::raw::{AvlNodeRef, RawAvlTree};
use crate::traversal::{Cursor, TraversalOrder};
use crate::TreeView;

mod capacity;

/// An ordered multiset backed by an AVL tree with size and height
/// augmentation.
///
/// Equal values are collapsed into one node with a multiplicity count. All
/// order-statistic queries (rank, select, floor, ceiling, ranges and the four
/// traversals) live on the read-only [`TreeView`] returned by
/// [`view`](AvlTree::view); this type only owns the nodes and keeps them
/// balanced.
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value changes while it is in the tree.
///
/// # Examples
///
/// ```
/// use rank_tree::AvlTree;
///
/// let mut scores = AvlTree::new();
/// for score in [72, 85, 85, 91, 64] {
///     scores.insert(score);
/// }
///
/// let view = scores.view();
/// assert_eq!(view.len(), 5);
/// assert_eq!(view.rank(&85), 2); // two scores below 85
/// assert_eq!(view.select(4), Ok(&91)); // the best score
/// assert_eq!(view.len_between(&80, &90), 2);
///
/// assert_eq!(scores.remove_min(), Some(64));
/// assert_eq!(scores.view().min(), Ok(&72));
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    raw: RawAvlTree<T>,
}

/// An ascending iterator over the values of an [`AvlTree`], duplicates repeated.
pub type Iter<'a, T> = Cursor<'a, AvlNodeRef<'a, T>>;

impl<T> AvlTree<T> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawAvlTree::new() }
    }

    /// Returns the number of elements, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of distinct values, i.e. the number of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from(["a", "b", "b"]);
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.distinct_len(), 2);
    /// ```
    #[must_use]
    pub const fn distinct_len(&self) -> usize {
        self.raw.distinct_len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts one copy of `value` and returns how many copies the tree holds
    /// afterwards.
    ///
    /// A value equal to one already present does not create a node; the
    /// existing node's multiplicity grows and the new value is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(3), 1);
    /// assert_eq!(tree.insert(3), 2);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> usize {
        self.raw.insert(value)
    }

    /// Returns `true` if at least one copy of `value` is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([4, 8]);
    /// assert!(tree.contains(&8));
    /// assert!(!tree.contains(&5));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.contains(value)
    }

    /// Returns the height of the tree: 0 for a single node, -1 when empty.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.view().height()
    }

    /// Returns a read-only query view over the tree.
    ///
    /// The view borrows the tree, so it cannot outlive a structural change.
    pub fn view(&self) -> TreeView<'_, AvlNodeRef<'_, T>> {
        TreeView::new(self.raw.root_ref())
    }

    /// Returns an ascending iterator over every element.
    pub fn iter(&self) -> Iter<'_, T> {
        self.view().values()
    }

    /// Returns an iterator over every element in `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{AvlTree, TraversalOrder};
    ///
    /// let tree = AvlTree::from([1, 2, 3]);
    /// let level: Vec<_> = tree.iter_with(TraversalOrder::LevelOrder).collect();
    /// assert_eq!(level, [&2, &1, &3]);
    /// ```
    pub fn iter_with(&self, order: TraversalOrder) -> Iter<'_, T> {
        self.view().iter(order)
    }
}

impl<T: Clone> AvlTree<T> {
    /// Removes one copy of the smallest value and returns it, or `None` if the
    /// tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([2, 1, 1]);
    /// assert_eq!(tree.remove_min(), Some(1));
    /// assert_eq!(tree.remove_min(), Some(1));
    /// assert_eq!(tree.remove_min(), Some(2));
    /// assert_eq!(tree.remove_min(), None);
    /// ```
    pub fn remove_min(&mut self) -> Option<T> {
        self.raw.remove_min()
    }

    /// Removes one copy of the largest value and returns it, or `None` if the
    /// tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_max(&mut self) -> Option<T> {
        self.raw.remove_max()
    }
}

impl<T> Default for AvlTree<T> {
    /// Creates an empty `AvlTree`.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTree<T> {
    /// Inserts the values in array order.
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// assert_eq!(tree.view().values_pre_order().collect::<Vec<_>>(), [&2, &1, &3]);
    /// ```
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T: Ord> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
