use super::AvlTree;
use crate::raw::RawAvlTree;

impl<T> AvlTree<T> {
    /// Creates an empty tree with room for at least `capacity` distinct values.
    ///
    /// Duplicates never take a new node, so only distinct values count
    /// against the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = AvlTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns how many distinct values the tree can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::with_capacity(4);
    /// for _ in 0..100 {
    ///     tree.insert('x');
    /// }
    /// assert_eq!(tree.distinct_len(), 1);
    /// assert!(tree.capacity() >= 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
