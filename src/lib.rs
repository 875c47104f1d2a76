//! Order-statistic queries over augmented binary search trees.
//!
//! Every node of the tree carries its value, a multiplicity (how many equal
//! values were collapsed into it), the size of its subtree counting
//! duplicates, and its height. With those augmentations, [`TreeView`] answers
//! rank, selection, floor/ceiling and range queries in time proportional to
//! the tree's height, and walks it lazily in four orders.
//!
//! - [`rank`](TreeView::rank) - number of elements strictly less than a value
//! - [`select`](TreeView::select) - the element at a sorted position
//! - [`floor`](TreeView::floor) / [`ceiling`](TreeView::ceiling) - nearest
//!   element at or below / at or above a value
//! - [`values_between`](TreeView::values_between) /
//!   [`len_between`](TreeView::len_between) - inclusive range queries
//! - [`Cursor`] - in-, pre-, post- and level-order traversal
//!
//! The query layer is written against the [`NodeRef`] trait and never
//! mutates, so any tree that maintains the augmentations can use it.
//! [`AvlTree`] is the builder that ships with the crate.
//!
//! # Example
//!
//! ```
//! use rank_tree::{AvlTree, Error};
//!
//! let tree = AvlTree::from([1, 2, 3, 4, 5, 3]);
//! let view = tree.view();
//!
//! assert_eq!(view.len(), 6);
//! assert_eq!(view.rank(&3), 2); // copies of 3 are not "less than" 3
//! assert_eq!(view.rank(&4), 4); // ... but both count below 4
//! assert_eq!(view.select(0), Ok(&1));
//! assert_eq!(view.ceiling(&6), Ok(None));
//! assert_eq!(view.values().copied().collect::<Vec<_>>(), [1, 2, 3, 3, 4, 5]);
//!
//! let empty: AvlTree<i32> = AvlTree::new();
//! assert_eq!(empty.view().min(), Err(Error::EmptyTree { operation: "min" }));
//! assert_eq!(empty.view().len_between(&0, &10), 0);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Duplicate-aware** - Equal values share one node and are counted by multiplicity
//! - **Builder-agnostic** - Queries only read [`NodeRef`] accessors
//! - **No recursion on the read side** - Degenerate trees cannot overflow the stack
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: rotations and node churn in the
//! AVL builder at `trace`, rejected queries at `debug`. No logger is installed.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod node;
mod raw;
mod view;

pub mod avl_tree;
pub mod traversal;

pub use avl_tree::AvlTree;
pub use error::{Error, Result};
pub use node::NodeRef;
pub use raw::AvlNodeRef;
pub use traversal::{Cursor, Range, TraversalOrder};
pub use view::TreeView;
