use core::cmp::Ordering::{Equal, Greater, Less};

use log::debug;

use super::{TreeView, empty};
use crate::node::size_of;
use crate::{Error, NodeRef, Result};

impl<'a, N: NodeRef<'a>> TreeView<'a, N> {
    /// Returns the number of elements strictly less than `value`.
    ///
    /// Copies of `value` itself are not counted, so inserting another copy of
    /// a present value leaves its rank unchanged.
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
    /// let tree = AvlTree::from([1, 2, 3, 3, 4, 5]);
    /// assert_eq!(tree.view().rank(&3), 2);
    /// assert_eq!(tree.view().rank(&4), 4);
    /// assert_eq!(tree.view().rank(&9), 6);
    /// ```
    #[must_use]
    pub fn rank(&self, value: &N::Value) -> usize {
        let mut rank = 0;
        let mut node = self.root;
        while let Some(current) = node {
            match value.cmp(current.value()) {
                Less => node = current.left(),
                Greater => {
                    // Everything on the left, and every copy held here, is smaller.
                    rank += current.multiplicity() + size_of(current.left());
                    node = current.right();
                }
                Equal => return rank + size_of(current.left()),
            }
        }
        rank
    }

    /// Returns the number of elements strictly less than `value` by scanning
    /// the in-order sequence.
    ///
    /// Always agrees with [`rank`](Self::rank); useful as a reference when
    /// checking a tree builder.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn rank_from_values(&self, value: &N::Value) -> usize {
        self.values().filter(|element| *element < value).count()
    }

    /// Returns the element at zero-based position `rank` in ascending order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty, [`Error::RankOutOfRange`] if
    /// `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{AvlTree, Error};
    ///
    /// let tree = AvlTree::from([10, 20, 20, 30]);
    /// assert_eq!(tree.view().select(2), Ok(&20));
    /// assert_eq!(tree.view().select(4), Err(Error::RankOutOfRange { rank: 4, len: 4 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&'a N::Value> {
        let len = self.check_rank("select", rank)?;
        let mut remaining = rank;
        let mut node = self.root;

        while let Some(current) = node {
            let left = size_of(current.left());
            if remaining < left {
                node = current.left();
                continue;
            }
            let through_here = left + current.multiplicity();
            if remaining < through_here {
                return Ok(current.value());
            }
            remaining -= through_here;
            node = current.right();
        }

        // Only reachable when the sizes stored in the tree are inconsistent.
        Err(Error::RankOutOfRange { rank, len })
    }

    /// Returns the element at zero-based position `rank` by walking the
    /// in-order sequence.
    ///
    /// Always agrees with [`select`](Self::select), including its errors.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty, [`Error::RankOutOfRange`] if
    /// `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn select_from_values(&self, rank: usize) -> Result<&'a N::Value> {
        let len = self.check_rank("select_from_values", rank)?;
        self.values().nth(rank).ok_or(Error::RankOutOfRange { rank, len })
    }

    fn check_rank(&self, operation: &'static str, rank: usize) -> Result<usize> {
        let root = self.root.ok_or_else(|| empty(operation))?;
        let len = root.size();
        if rank >= len {
            debug!("rejected `{operation}({rank})` on a tree of {len} elements");
            return Err(Error::RankOutOfRange { rank, len });
        }
        Ok(len)
    }

    /// Returns the largest element `<= value`, or `Ok(None)` if every element
    /// is greater.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.view().floor(&25), Ok(Some(&20)));
    /// assert_eq!(tree.view().floor(&20), Ok(Some(&20)));
    /// assert_eq!(tree.view().floor(&5), Ok(None));
    /// ```
    pub fn floor(&self, value: &N::Value) -> Result<Option<&'a N::Value>> {
        if self.is_empty() {
            return Err(empty("floor"));
        }
        Ok(self.floor_node(value).map(NodeRef::value))
    }

    /// Returns the smallest element `>= value`, or `Ok(None)` if every element
    /// is smaller.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.view().ceiling(&25), Ok(Some(&30)));
    /// assert_eq!(tree.view().ceiling(&35), Ok(None));
    /// ```
    pub fn ceiling(&self, value: &N::Value) -> Result<Option<&'a N::Value>> {
        if self.is_empty() {
            return Err(empty("ceiling"));
        }
        Ok(self.ceiling_node(value).map(NodeRef::value))
    }

    /// The node holding the largest value `<= value`.
    ///
    /// Every right turn passes a node that is still `<= value`; the last one
    /// taken is the answer when no exact match turns up below it.
    pub(crate) fn floor_node(&self, value: &N::Value) -> Option<N> {
        let mut best = None;
        let mut node = self.root;
        while let Some(current) = node {
            match value.cmp(current.value()) {
                Equal => return Some(current),
                Less => node = current.left(),
                Greater => {
                    best = Some(current);
                    node = current.right();
                }
            }
        }
        best
    }

    /// The node holding the smallest value `>= value`.
    pub(crate) fn ceiling_node(&self, value: &N::Value) -> Option<N> {
        let mut best = None;
        let mut node = self.root;
        while let Some(current) = node {
            match value.cmp(current.value()) {
                Equal => return Some(current),
                Greater => node = current.right(),
                Less => {
                    best = Some(current);
                    node = current.left();
                }
            }
        }
        best
    }
}
