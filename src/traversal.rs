//! Lazy, multiplicity-aware walks over a [`TreeView`].

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::{NodeRef, TreeView};

mod range;

pub use range::Range;

/// The order in which a [`Cursor`] visits nodes.
///
/// Whatever the order, a node with multiplicity `m` yields its value `m`
/// times in a row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree: ascending values.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
    /// Breadth first, left to right within each level.
    LevelOrder,
}

/// Nodes still to be visited, in the shape each order needs.
enum Frontier<N> {
    /// Left spine of the unvisited part of the tree.
    InOrder(Vec<N>),
    PreOrder(Vec<N>),
    /// `true` once a node's children have been pushed above it.
    PostOrder(Vec<(N, bool)>),
    LevelOrder(VecDeque<N>),
}

/// A forward-only, single-pass walk over a tree in a chosen [`TraversalOrder`].
///
/// The cursor holds only an explicit stack (a queue for level order) plus the
/// node currently being repeated, so nothing is materialized up front and
/// degenerate trees do not recurse. It borrows the tree, which keeps the
/// structure stable for as long as the cursor lives.
///
/// Besides [`Iterator`], it exposes the peek/advance protocol directly.
///
/// # Examples
///
/// ```
/// use rank_tree::{AvlTree, Cursor, TraversalOrder};
///
/// let tree = AvlTree::from([2, 1, 3, 3]);
/// let mut cursor = Cursor::new(tree.view(), TraversalOrder::PostOrder);
///
/// assert_eq!(cursor.peek(), Some(&1));
/// cursor.advance();
/// assert_eq!(cursor.peek(), Some(&3));
/// assert_eq!(cursor.by_ref().copied().collect::<Vec<_>>(), [3, 3, 2]);
/// assert!(cursor.is_done());
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Cursor<'a, N> {
    order: TraversalOrder,
    frontier: Frontier<N>,
    // Node being emitted and how many copies of its value are left.
    current: Option<(N, usize)>,
    remaining: usize,
    marker: PhantomData<&'a ()>,
}

impl<'a, N: NodeRef<'a>> Cursor<'a, N> {
    /// Positions a new cursor on the first element of `view` in `order`.
    pub fn new(view: TreeView<'a, N>, order: TraversalOrder) -> Self {
        let root = view.root();
        let frontier = match order {
            TraversalOrder::InOrder => {
                let mut stack = Vec::new();
                push_left_spine(&mut stack, root);
                Frontier::InOrder(stack)
            }
            TraversalOrder::PreOrder => Frontier::PreOrder(root.into_iter().collect()),
            TraversalOrder::PostOrder => Frontier::PostOrder(root.map(|node| (node, false)).into_iter().collect()),
            TraversalOrder::LevelOrder => Frontier::LevelOrder(root.into_iter().collect()),
        };

        let mut cursor = Self {
            order,
            frontier,
            current: None,
            remaining: view.len(),
            marker: PhantomData,
        };
        cursor.current = cursor.next_node();
        cursor
    }

    /// The order this cursor walks in.
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// The element the cursor is positioned on, or `None` once it is done.
    #[must_use]
    pub fn peek(&self) -> Option<&'a N::Value> {
        self.current.map(|(node, _)| node.value())
    }

    /// Returns `true` once every element has been produced.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next element. Does nothing once the cursor is done.
    pub fn advance(&mut self) {
        match self.current {
            Some((node, copies)) if copies > 1 => self.current = Some((node, copies - 1)),
            Some(_) => self.current = self.next_node(),
            None => return,
        }
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Pulls the next node in order, paired with its multiplicity.
    fn next_node(&mut self) -> Option<(N, usize)> {
        let node = match &mut self.frontier {
            Frontier::InOrder(stack) => {
                let node = stack.pop()?;
                push_left_spine(stack, node.right());
                node
            }
            Frontier::PreOrder(stack) => {
                let node = stack.pop()?;
                stack.extend(node.right());
                stack.extend(node.left());
                node
            }
            Frontier::PostOrder(stack) => loop {
                let (node, expanded) = stack.pop()?;
                if expanded {
                    break node;
                }
                stack.push((node, true));
                stack.extend(node.right().map(|right| (right, false)));
                stack.extend(node.left().map(|left| (left, false)));
            },
            Frontier::LevelOrder(queue) => {
                let node = queue.pop_front()?;
                queue.extend(node.left());
                queue.extend(node.right());
                node
            }
        };
        Some((node, node.multiplicity()))
    }
}

/// Pushes `node` and all of its left descendants.
pub(crate) fn push_left_spine<'a, N: NodeRef<'a>>(stack: &mut Vec<N>, mut node: Option<N>) {
    while let Some(current) = node {
        stack.push(current);
        node = current.left();
    }
}

impl<'a, N: NodeRef<'a>> Iterator for Cursor<'a, N> {
    type Item = &'a N::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.peek()?;
        self.advance();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N: NodeRef<'a>> ExactSizeIterator for Cursor<'a, N> {}

impl<'a, N: NodeRef<'a>> FusedIterator for Cursor<'a, N> {}

impl<N> fmt::Debug for Cursor<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("order", &self.order)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
