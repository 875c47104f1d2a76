use core::cmp::Ordering::{Equal, Greater, Less};

use log::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::AvlNode;
use crate::NodeRef;

/// The arena-backed AVL tree behind `AvlTree`.
///
/// Equal values collapse into one node whose multiplicity is bumped, so the
/// arena holds exactly one node per distinct value.
#[derive(Clone)]
pub(crate) struct RawAvlTree<T> {
    /// Arena storing every node of the tree.
    nodes: Arena<AvlNode<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// A borrowed node of an [`AvlTree`](crate::AvlTree).
///
/// This is the [`NodeRef`] implementation handed to [`TreeView`](crate::TreeView)
/// by [`AvlTree::view`](crate::AvlTree::view).
pub struct AvlNodeRef<'a, T> {
    nodes: &'a Arena<AvlNode<T>>,
    handle: Handle,
}

impl<T> Clone for AvlNodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AvlNodeRef<'_, T> {}

impl<T> core::fmt::Debug for AvlNodeRef<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let node = self.nodes.get(self.handle);
        f.debug_struct("AvlNodeRef")
            .field("handle", &self.handle)
            .field("multiplicity", &node.multiplicity)
            .field("size", &node.size)
            .field("height", &node.height)
            .finish_non_exhaustive()
    }
}

impl<'a, T> AvlNodeRef<'a, T> {
    #[inline]
    fn node(self) -> &'a AvlNode<T> {
        self.nodes.get(self.handle)
    }

    #[inline]
    fn at(self, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| Self {
            nodes: self.nodes,
            handle,
        })
    }
}

impl<'a, T: Ord + 'a> NodeRef<'a> for AvlNodeRef<'a, T> {
    type Value = T;

    #[inline]
    fn value(self) -> &'a T {
        &self.node().value
    }

    #[inline]
    fn left(self) -> Option<Self> {
        self.at(self.node().left)
    }

    #[inline]
    fn right(self) -> Option<Self> {
        self.at(self.node().right)
    }

    #[inline]
    fn size(self) -> usize {
        self.node().size
    }

    #[inline]
    fn height(self) -> i32 {
        self.node().height
    }

    #[inline]
    fn multiplicity(self) -> usize {
        self.node().multiplicity
    }
}

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` distinct values.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of distinct values the arena can hold without growing.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of logical elements, duplicates included.
    pub(crate) fn len(&self) -> usize {
        self.size(self.root)
    }

    /// Returns the number of distinct values (one per node).
    pub(crate) const fn distinct_len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns a borrowed view of the root node, if any.
    pub(crate) fn root_ref(&self) -> Option<AvlNodeRef<'_, T>> {
        self.root.map(|handle| AvlNodeRef {
            nodes: &self.nodes,
            handle,
        })
    }

    fn size(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.nodes.get(h).size)
    }

    fn height(&self, handle: Option<Handle>) -> i32 {
        handle.map_or(-1, |h| self.nodes.get(h).height)
    }

    /// Recomputes size and height of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = node.multiplicity + self.size(node.left) + self.size(node.right);
        let height = 1 + self.height(node.left).max(self.height(node.right));
        let node = self.nodes.get_mut(handle);
        node.size = size;
        node.height = height;
    }

    /// Left height minus right height.
    fn balance_factor(&self, handle: Handle) -> i32 {
        let node = self.nodes.get(handle);
        self.height(node.left) - self.height(node.right)
    }

    /// Clockwise rotation around `handle`; returns the new subtree root.
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let Some(pivot) = self.nodes.get(handle).left else {
            return handle;
        };
        trace!("rotate right at {handle:?}, pivot {pivot:?}");
        let inner = self.nodes.get(pivot).right;
        self.nodes.get_mut(handle).left = inner;
        self.nodes.get_mut(pivot).right = Some(handle);
        self.update(handle);
        self.update(pivot);
        pivot
    }

    /// Counter-clockwise rotation around `handle`; returns the new subtree root.
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let Some(pivot) = self.nodes.get(handle).right else {
            return handle;
        };
        trace!("rotate left at {handle:?}, pivot {pivot:?}");
        let inner = self.nodes.get(pivot).left;
        self.nodes.get_mut(handle).right = inner;
        self.nodes.get_mut(pivot).left = Some(handle);
        self.update(handle);
        self.update(pivot);
        pivot
    }

    /// Restores the AVL balance of `handle`, whose children are already balanced
    /// and augmented. Returns the new subtree root.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.update(handle);
        let balance = self.balance_factor(handle);

        if balance > 1 {
            if let Some(left) = self.nodes.get(handle).left
                && self.balance_factor(left) < 0
            {
                let left = self.rotate_left(left);
                self.nodes.get_mut(handle).left = Some(left);
            }
            return self.rotate_right(handle);
        }

        if balance < -1 {
            if let Some(right) = self.nodes.get(handle).right
                && self.balance_factor(right) > 0
            {
                let right = self.rotate_right(right);
                self.nodes.get_mut(handle).right = Some(right);
            }
            return self.rotate_left(handle);
        }

        handle
    }
}

impl<T: Ord> RawAvlTree<T> {
    /// Inserts one copy of `value` and returns its multiplicity afterwards.
    pub(crate) fn insert(&mut self, value: T) -> usize {
        let (root, multiplicity) = self.insert_at(self.root, value);
        self.root = Some(root);
        multiplicity
    }

    fn insert_at(&mut self, handle: Option<Handle>, value: T) -> (Handle, usize) {
        let Some(handle) = handle else {
            let handle = self.nodes.alloc(AvlNode::leaf(value));
            trace!("allocated node {handle:?}");
            return (handle, 1);
        };

        let node = self.nodes.get(handle);
        let (ordering, left, right) = (value.cmp(&node.value), node.left, node.right);
        match ordering {
            Less => {
                let (left, multiplicity) = self.insert_at(left, value);
                self.nodes.get_mut(handle).left = Some(left);
                (self.rebalance(handle), multiplicity)
            }
            Greater => {
                let (right, multiplicity) = self.insert_at(right, value);
                self.nodes.get_mut(handle).right = Some(right);
                (self.rebalance(handle), multiplicity)
            }
            Equal => {
                // Shape is unchanged; only the counts on this path grow.
                let node = self.nodes.get_mut(handle);
                node.multiplicity += 1;
                node.size += 1;
                (handle, node.multiplicity)
            }
        }
    }

    /// Returns `true` if a node holds `value`.
    pub(crate) fn contains(&self, value: &T) -> bool {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match value.cmp(&node.value) {
                Less => node.left,
                Greater => node.right,
                Equal => return true,
            };
        }
        false
    }
}

impl<T: Clone> RawAvlTree<T> {
    /// Removes one copy of the smallest value.
    pub(crate) fn remove_min(&mut self) -> Option<T> {
        let root = self.root?;
        let (root, value) = self.remove_edge(root, Side::Left);
        self.root = root;
        Some(value)
    }

    /// Removes one copy of the largest value.
    pub(crate) fn remove_max(&mut self) -> Option<T> {
        let root = self.root?;
        let (root, value) = self.remove_edge(root, Side::Right);
        self.root = root;
        Some(value)
    }

    /// Removes one copy of the extreme value on `side` of the subtree at
    /// `handle`. Returns the new subtree root and the removed value.
    fn remove_edge(&mut self, handle: Handle, side: Side) -> (Option<Handle>, T) {
        let node = self.nodes.get(handle);
        let next = match side {
            Side::Left => node.left,
            Side::Right => node.right,
        };

        if let Some(child) = next {
            let (child, value) = self.remove_edge(child, side);
            let node = self.nodes.get_mut(handle);
            match side {
                Side::Left => node.left = child,
                Side::Right => node.right = child,
            }
            return (Some(self.rebalance(handle)), value);
        }

        let node = self.nodes.get_mut(handle);
        if node.multiplicity > 1 {
            node.multiplicity -= 1;
            node.size -= 1;
            return (Some(handle), node.value.clone());
        }

        // The extreme node has at most one child, on the opposite side, and
        // that child is a leaf by the AVL balance rule.
        let removed = self.nodes.take(handle);
        trace!("unlinked node {handle:?}");
        let survivor = match side {
            Side::Left => removed.right,
            Side::Right => removed.left,
        };
        (survivor, removed.value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_sign_loss)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<T: Ord> RawAvlTree<T> {
        /// Checks order, augmentation and balance at every node. Panics with every
        /// violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let mut visited = 0;
            if let Some(root) = self.root {
                self.validate_node(root, None, None, &mut visited, &mut errors);
            }
            if visited != self.nodes.len() {
                errors.push(format!("reachable nodes {visited} != arena nodes {}", self.nodes.len()));
            }
            assert!(errors.is_empty(), "AVL invariants violated:\n{}", errors.join("\n"));
        }

        fn validate_node(
            &self,
            handle: Handle,
            lower: Option<&T>,
            upper: Option<&T>,
            visited: &mut usize,
            errors: &mut Vec<String>,
        ) {
            *visited += 1;
            let node = self.nodes.get(handle);

            if lower.is_some_and(|lower| node.value <= *lower) || upper.is_some_and(|upper| node.value >= *upper) {
                errors.push(format!("{handle:?}: value out of order"));
            }
            if node.multiplicity == 0 {
                errors.push(format!("{handle:?}: zero multiplicity"));
            }
            let size = node.multiplicity + self.size(node.left) + self.size(node.right);
            if node.size != size {
                errors.push(format!("{handle:?}: size {} != {size}", node.size));
            }
            let height = 1 + self.height(node.left).max(self.height(node.right));
            if node.height != height {
                errors.push(format!("{handle:?}: height {} != {height}", node.height));
            }
            if self.balance_factor(handle).abs() > 1 {
                errors.push(format!("{handle:?}: balance factor {}", self.balance_factor(handle)));
            }

            if let Some(left) = node.left {
                self.validate_node(left, lower, Some(&node.value), visited, errors);
            }
            if let Some(right) = node.right {
                self.validate_node(right, Some(&node.value), upper, visited, errors);
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        RemoveMin,
        RemoveMax,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i32..200).prop_map(Op::Insert),
            1 => Just(Op::RemoveMin),
            1 => Just(Op::RemoveMax),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            // value -> multiplicity
            let mut model: BTreeMap<i32, usize> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(value) => {
                        let multiplicity = tree.insert(value);
                        let expected = model.entry(value).or_insert(0);
                        *expected += 1;
                        prop_assert_eq!(multiplicity, *expected);
                    }
                    Op::RemoveMin => {
                        let expected = model.first_entry().map(|mut entry| {
                            *entry.get_mut() -= 1;
                            let value = *entry.key();
                            if *entry.get() == 0 {
                                entry.remove();
                            }
                            value
                        });
                        prop_assert_eq!(tree.remove_min(), expected);
                    }
                    Op::RemoveMax => {
                        let expected = model.last_entry().map(|mut entry| {
                            *entry.get_mut() -= 1;
                            let value = *entry.key();
                            if *entry.get() == 0 {
                                entry.remove();
                            }
                            value
                        });
                        prop_assert_eq!(tree.remove_max(), expected);
                    }
                }

                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.values().sum::<usize>());
                prop_assert_eq!(tree.distinct_len(), model.len());
                prop_assert_eq!(tree.is_empty(), model.is_empty());
            }
        }

        #[test]
        fn height_is_logarithmic(count in 1usize..2_000) {
            let mut tree: RawAvlTree<usize> = RawAvlTree::new();
            for value in 0..count {
                tree.insert(value);
            }
            tree.validate_invariants();

            // AVL bound h < 1.4405 * log2(n + 2), with log2 rounded up.
            let height = tree.height(tree.root) as u32;
            prop_assert!(height * 100 < 145 * ((count + 2).ilog2() + 1));
        }
    }

    #[test]
    fn empty_tree() {
        let mut tree: RawAvlTree<i32> = RawAvlTree::new();
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root_ref().is_none());
        assert_eq!(tree.remove_min(), None);
        assert_eq!(tree.remove_max(), None);
    }

    #[test]
    fn duplicates_share_a_node() {
        let mut tree = RawAvlTree::new();
        assert_eq!(tree.insert(3), 1);
        assert_eq!(tree.insert(3), 2);
        assert_eq!(tree.insert(1), 1);
        tree.validate_invariants();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.distinct_len(), 2);
        assert!(tree.contains(&3));
        assert!(!tree.contains(&2));

        assert_eq!(tree.remove_max(), Some(3));
        assert_eq!(tree.distinct_len(), 2);
        assert_eq!(tree.remove_max(), Some(3));
        assert_eq!(tree.distinct_len(), 1);
        tree.validate_invariants();
    }

    #[test]
    fn ascending_inserts_rotate_into_balance() {
        let mut tree = RawAvlTree::new();
        for value in 1..=3 {
            tree.insert(value);
        }
        tree.validate_invariants();

        let root = tree.root_ref().expect("non-empty");
        assert_eq!(*root.value(), 2);
        assert_eq!(root.left().map(|n| *n.value()), Some(1));
        assert_eq!(root.right().map(|n| *n.value()), Some(3));
        assert_eq!(root.height(), 1);
    }

    #[test]
    fn double_rotation_on_zig_zag() {
        let mut tree = RawAvlTree::new();
        for value in [3, 1, 2] {
            tree.insert(value);
        }
        tree.validate_invariants();
        assert_eq!(tree.root_ref().map(|n| *n.value()), Some(2));
    }

    #[test]
    fn clear_and_clone() {
        let mut tree = RawAvlTree::with_capacity(8);
        assert!(tree.capacity() >= 8);
        for value in [5, 2, 8, 2] {
            tree.insert(value);
        }
        let copy = tree.clone();
        tree.clear();
        tree.validate_invariants();
        assert!(tree.is_empty());

        copy.validate_invariants();
        assert_eq!(copy.len(), 4);
        assert!(copy.contains(&8));
    }
}
