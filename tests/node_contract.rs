//! The query engine against a tree it did not build: a plain, unbalanced,
//! boxed binary search tree with duplicate counts.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rank_tree::{Error, NodeRef, TreeView};

struct Plain {
    value: i32,
    multiplicity: usize,
    size: usize,
    height: i32,
    left: Option<Box<Plain>>,
    right: Option<Box<Plain>>,
}

impl<'a> NodeRef<'a> for &'a Plain {
    type Value = i32;

    fn value(self) -> &'a i32 {
        &self.value
    }

    fn left(self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right(self) -> Option<Self> {
        self.right.as_deref()
    }

    fn size(self) -> usize {
        self.size
    }

    fn height(self) -> i32 {
        self.height
    }

    fn multiplicity(self) -> usize {
        self.multiplicity
    }
}

/// Unbalanced insert that keeps every augmentation exact.
fn insert(slot: &mut Option<Box<Plain>>, value: i32) {
    match slot {
        None => {
            *slot = Some(Box::new(Plain {
                value,
                multiplicity: 1,
                size: 1,
                height: 0,
                left: None,
                right: None,
            }));
        }
        Some(node) => {
            match value.cmp(&node.value) {
                std::cmp::Ordering::Less => insert(&mut node.left, value),
                std::cmp::Ordering::Greater => insert(&mut node.right, value),
                std::cmp::Ordering::Equal => node.multiplicity += 1,
            }
            let height = |child: &Option<Box<Plain>>| child.as_ref().map_or(-1, |c| c.height);
            let size = |child: &Option<Box<Plain>>| child.as_ref().map_or(0, |c| c.size);
            node.size = node.multiplicity + size(&node.left) + size(&node.right);
            node.height = 1 + height(&node.left).max(height(&node.right));
        }
    }
}

fn build(values: impl IntoIterator<Item = i32>) -> Option<Box<Plain>> {
    let mut root = None;
    for value in values {
        insert(&mut root, value);
    }
    root
}

/// A tree where every node is the left child of the next larger value,
/// built bottom-up so that construction does not recurse either.
fn left_chain(len: i32) -> Option<Box<Plain>> {
    let mut root: Option<Box<Plain>> = None;
    for value in 0..len {
        let below = root.take();
        let (size, height) = below.as_ref().map_or((0, -1), |node| (node.size, node.height));
        root = Some(Box::new(Plain {
            value,
            multiplicity: 1,
            size: size + 1,
            height: height + 1,
            left: below,
            right: None,
        }));
    }
    root
}

fn view(root: &Option<Box<Plain>>) -> TreeView<'_, &Plain> {
    TreeView::new(root.as_deref())
}

#[test]
fn degenerate_chain_has_linear_height() {
    let root = build(1..=100);
    let view = view(&root);

    assert_eq!(view.height(), 99);
    assert_eq!(view.len(), 100);
    assert_eq!(view.rank(&50), 49);
    assert_eq!(view.select(99), Ok(&100));
    assert_eq!(view.min(), Ok(&1));
    assert_eq!(view.max(), Ok(&100));
    assert_eq!(view.values_between(&98, &1_000).copied().collect::<Vec<_>>(), [98, 99, 100]);
}

#[test]
fn deep_chain_does_not_recurse() {
    // Deep enough that a recursive walk over the default test thread stack would overflow.
    let root = left_chain(200_000);
    let view = view(&root);

    assert_eq!(view.len(), 200_000);
    assert_eq!(view.rank(&150_000), 150_000);
    assert_eq!(view.floor(&-1), Ok(None));
    assert_eq!(view.ceiling(&0), Ok(Some(&0)));
    assert_eq!(view.values_post_order().count(), 200_000);
    assert_eq!(view.values_level_order().last(), Some(&0));

    // Nested boxes drop recursively; unlink them one level at a time instead.
    let mut next = root;
    while let Some(mut node) = next {
        next = node.left.take();
    }
}

#[test]
fn hand_built_shape() {
    //        4 (x2)
    //       /      \
    //      2        6
    //       \
    //        3 (x3)
    let root = build([4, 2, 6, 3, 3, 4, 3]);
    let view = view(&root);

    assert_eq!(view.values().copied().collect::<Vec<_>>(), [2, 3, 3, 3, 4, 4, 6]);
    assert_eq!(view.values_pre_order().copied().collect::<Vec<_>>(), [4, 4, 2, 3, 3, 3, 6]);
    assert_eq!(view.values_post_order().copied().collect::<Vec<_>>(), [3, 3, 3, 2, 6, 4, 4]);
    assert_eq!(view.values_level_order().copied().collect::<Vec<_>>(), [4, 4, 2, 6, 3, 3, 3]);

    assert_eq!(view.rank(&4), 4);
    assert_eq!(view.rank(&5), 6);
    assert_eq!(view.count(&3), 3);
    assert_eq!(view.len_between(&3, &4), 5);
    assert_eq!(view.select(5), Ok(&4));
    assert_eq!(view.floor(&5), Ok(Some(&4)));
    assert_eq!(view.ceiling(&5), Ok(Some(&6)));
    assert_eq!(view.height(), 2);
}

#[test]
fn empty_plain_tree() {
    let root: Option<Box<Plain>> = None;
    let view = view(&root);

    assert!(view.is_empty());
    assert_eq!(view.height(), -1);
    assert_eq!(view.select(0), Err(Error::EmptyTree { operation: "select" }));
    assert_eq!(view.floor(&1), Err(Error::EmptyTree { operation: "floor" }));
    assert_eq!(view.max(), Err(Error::EmptyTree { operation: "max" }));
    assert_eq!(view.values_between(&0, &9).count(), 0);
}

proptest! {
    #[test]
    fn unbalanced_trees_answer_like_a_sorted_vec(
        values in prop::collection::vec(-60i32..60, 0..150),
        probe in -70i32..70,
    ) {
        let root = build(values.iter().copied());
        let view = view(&root);
        let mut sorted = values.clone();
        sorted.sort_unstable();

        prop_assert_eq!(view.values().copied().collect::<Vec<_>>(), sorted.clone());
        prop_assert_eq!(view.rank(&probe), sorted.partition_point(|v| *v < probe));
        prop_assert_eq!(view.rank(&probe), view.rank_from_values(&probe));
        for (k, expected) in sorted.iter().enumerate() {
            prop_assert_eq!(view.select(k), Ok(expected));
        }
        prop_assert_eq!(view.len_between(&probe, &(probe + 10)), view.values_between(&probe, &(probe + 10)).count());
    }
}
