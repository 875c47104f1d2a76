use alloc::vec::Vec;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use super::push_left_spine;
use crate::{NodeRef, TreeView};

/// An ascending iterator over every element `v` with `lo <= v <= hi`.
///
/// This `struct` is created by [`TreeView::values_between`]. See its
/// documentation for more.
///
/// Subtrees entirely below `lo` or above `hi` are never entered, so a narrow
/// range costs O(height + k) for `k` produced elements.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, N> {
    stack: Vec<N>,
    // Largest node whose value is <= hi; iteration stops after it.
    last: Option<N>,
    current: Option<(N, usize)>,
    marker: PhantomData<&'a ()>,
}

impl<'a, N: NodeRef<'a>> Range<'a, N> {
    pub(crate) fn new(view: TreeView<'a, N>, lo: &N::Value, hi: &N::Value) -> Self {
        let mut range = Self {
            stack: Vec::new(),
            last: None,
            current: None,
            marker: PhantomData,
        };
        if lo > hi {
            return range;
        }

        range.last = view.floor_node(hi);
        if range.last.is_some() {
            range.seek(view.root(), lo);
        }
        range
    }

    /// Stacks the ancestors of the first node `>= lo`, skipping left subtrees
    /// that lie wholly below `lo`.
    fn seek(&mut self, mut node: Option<N>, lo: &N::Value) {
        while let Some(current) = node {
            match lo.cmp(current.value()) {
                Less => {
                    self.stack.push(current);
                    node = current.left();
                }
                Equal => {
                    self.stack.push(current);
                    return;
                }
                Greater => node = current.right(),
            }
        }
    }

    fn finish(&mut self) {
        self.stack.clear();
        self.last = None;
    }
}

impl<'a, N: NodeRef<'a>> Iterator for Range<'a, N> {
    type Item = &'a N::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((node, copies)) = self.current.take() {
            if copies > 1 {
                self.current = Some((node, copies - 1));
            }
            return Some(node.value());
        }

        let last = self.last?;
        let Some(node) = self.stack.pop() else {
            self.finish();
            return None;
        };

        match node.value().cmp(last.value()) {
            Greater => {
                // Nothing in the tree falls between `lo` and `hi`.
                self.finish();
                return None;
            }
            Equal => self.finish(),
            Less => push_left_spine(&mut self.stack, node.right()),
        }

        if node.multiplicity() > 1 {
            self.current = Some((node, node.multiplicity() - 1));
        }
        Some(node.value())
    }
}

impl<'a, N: NodeRef<'a>> FusedIterator for Range<'a, N> {}

impl<N> fmt::Debug for Range<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("pending_nodes", &self.stack.len())
            .field("exhausted", &(self.last.is_none() && self.current.is_none()))
            .finish()
    }
}
