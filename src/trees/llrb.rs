//! Implementation of left-leaning red-black trees.
//! Balanced by coloring the links of the tree so that it mirrors a 2-3 tree,
//! this is a worst-case balancing algorithm with one bit of overhead per node.
//!
//! Insert and delete both recurse down to the key, and then fix up the
//! tree on the way back up. Every recursive call takes a subtree and returns
//! the new root of that subtree, which the caller reattaches.

use std::cmp::Ordering;

use super::basic_tree::*;
use super::observer::*;

const MISSING_SON: &str = "invariant violated: rotation requires a son on that side";
const EMPTY_ROOT: &str = "invariant violated: a searched key was found in an empty tree";

/// A left-leaning red-black tree, storing each key at most once.
///
/// ```
/// use llrb::LLRBTree;
///
/// let mut tree: LLRBTree<i32> = (1..=7).collect();
/// assert!(tree.delete(&4));
/// assert!(!tree.search(&4));
/// assert!(tree.search(&5));
/// assert_eq!(tree.len(), 6);
/// # tree.assert_correctness();
/// ```
#[derive(Clone, Debug)]
pub struct LLRBTree<K, O = ()> {
    tree: BasicTree<K>,
    len: usize,
    next_id: u64,
    observer: O,
}

impl<K: Ord> LLRBTree<K> {
    /// Creates an empty [`LLRBTree`] that nobody observes.
    pub fn new() -> Self {
        LLRBTree::with_observer(())
    }
}

impl<K: Ord> Default for LLRBTree<K> {
    fn default() -> Self {
        LLRBTree::new()
    }
}

impl<K: Ord, O: Observer<K>> LLRBTree<K, O> {
    /// Creates an empty [`LLRBTree`] that reports its structural changes to `observer`.
    pub fn with_observer(observer: O) -> Self {
        LLRBTree {
            tree: BasicTree::Empty,
            len: 0,
            next_id: 0,
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The root node, for inspecting the shape of the tree.
    pub fn root(&self) -> Option<&BasicNode<K>> {
        self.tree.node()
    }

    /// The whole tree, for inspecting or printing it.
    pub fn inner(&self) -> &BasicTree<K> {
        &self.tree
    }

    pub fn min(&self) -> Option<&K> {
        Some(self.tree.node()?.leftmost().key())
    }

    pub fn max(&self) -> Option<&K> {
        Some(self.tree.node()?.rightmost().key())
    }

    /// Returns `true` if `key` is in the tree.
    pub fn search(&self, key: &K) -> bool {
        Self::search_internal(&self.tree, key)
    }

    fn search_internal(tree: &BasicTree<K>, key: &K) -> bool {
        match tree.node() {
            None => false,
            Some(node) => match key.cmp(&node.key) {
                Ordering::Equal => true,
                Ordering::Less => Self::search_internal(&node.left, key),
                Ordering::Greater => Self::search_internal(&node.right, key),
            },
        }
    }

    /// Inserts `key`. Returns `false`, and leaves the tree untouched,
    /// if the key was already present.
    ///```
    /// use llrb::LLRBTree;
    ///
    /// let mut tree = LLRBTree::new();
    /// for key in [10, 20, 30] {
    ///     assert!(tree.insert(key));
    /// }
    /// assert!(!tree.insert(20));
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.key(), 20);
    /// assert_eq!(root.left().node().map(|node| *node.key()), Some(10));
    /// assert_eq!(root.right().node().map(|node| *node.key()), Some(30));
    /// # tree.assert_correctness();
    ///```
    pub fn insert(&mut self, key: K) -> bool {
        let old_len = self.len;
        let slot = self.root_slot();
        let tree = self.tree.take();
        let mut root = self.insert_internal(tree, key, slot);
        self.set_color(&mut root, Color::Black);
        self.tree = BasicTree::Root(root);

        let inserted = self.len != old_len;
        if inserted {
            tracing::debug!(len = self.len, "inserted key");
        }
        inserted
    }

    fn insert_internal(
        &mut self,
        tree: BasicTree<K>,
        key: K,
        slot: Option<Slot>,
    ) -> Box<BasicNode<K>> {
        let mut node = match tree.into_node_boxed() {
            None => return self.create_node(key, slot),
            Some(node) => node,
        };

        match key.cmp(&node.key) {
            Ordering::Equal => return node,
            Ordering::Less => {
                let left = node.left.take();
                let new_left = self.insert_internal(left, key, slot.map(Slot::left));
                node.left = BasicTree::Root(new_left);
            }
            Ordering::Greater => {
                let right = node.right.take();
                let new_right = self.insert_internal(right, key, slot.map(Slot::right));
                node.right = BasicTree::Root(new_right);
            }
        }

        self.local_balance(node)
    }

    fn create_node(&mut self, key: K, slot: Option<Slot>) -> Box<BasicNode<K>> {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.len += 1;
        let mut node = Box::new(BasicNode::new(key, id));
        node.slot = slot;
        self.observer.node_created(id, &node.key);
        node
    }

    /// Deletes `key`. Returns `false`, and leaves the tree untouched,
    /// if the key was not present.
    ///```
    /// use llrb::LLRBTree;
    ///
    /// let mut tree = LLRBTree::new();
    /// tree.insert(5);
    /// assert!(tree.delete(&5));
    /// assert!(tree.is_empty());
    /// assert!(!tree.delete(&5));
    ///```
    pub fn delete(&mut self, key: &K) -> bool {
        if !self.search(key) {
            return false;
        }

        let mut root = self.tree.take().into_node_boxed().expect(EMPTY_ROOT);
        // The recursion needs a red link to push down. If neither son of the
        // root can provide one, the root lends its own.
        if !root.left.is_red() && !root.right.is_red() {
            self.set_color(&mut root, Color::Red);
        }

        let mut tree = self.delete_internal(root, key);
        if let Some(root) = tree.node_mut() {
            self.set_color(root, Color::Black);
            if self.observer.tracks_slots() {
                self.relayout(root, Slot::ROOT);
            }
        }
        self.tree = tree;
        self.len -= 1;
        tracing::debug!(len = self.len, "deleted key");
        true
    }

    /// Deletes `key` from the subtree at `node`. `key` must be in that subtree.
    fn delete_internal(&mut self, mut node: Box<BasicNode<K>>, key: &K) -> BasicTree<K> {
        let mut go_right = None;

        if node.key == *key {
            if !node.left.is_empty() {
                go_right = Some(false);
                node = self.make_left_red(node);
            } else if !node.right.is_empty() {
                go_right = Some(true);
                node = self.make_right_red(node);
            } else {
                self.remove_leaf(node);
                return BasicTree::Empty;
            }

            if node.key == *key {
                // Move the key down to the in-order neighbour's position and keep
                // deleting it from there.
                if go_right == Some(true) {
                    self.swap_with_successor(&mut node);
                } else {
                    self.swap_with_predecessor(&mut node);
                }
            } else {
                // A rotation moved the key away from this node.
                go_right = None;
            }
        }

        let go_right = go_right.unwrap_or_else(|| node.key < *key);
        if go_right {
            node = self.make_right_red(node);
            if let Some(right) = node.right.take().into_node_boxed() {
                node.right = self.delete_internal(right, key);
            }
        } else {
            node = self.make_left_red(node);
            if let Some(left) = node.left.take().into_node_boxed() {
                node.left = self.delete_internal(left, key);
            }
        }

        BasicTree::Root(self.local_balance(node))
    }

    fn remove_leaf(&mut self, node: Box<BasicNode<K>>) {
        self.observer.node_removed(node.id, &node.key);
    }

    /// Exchanges the key of `node` with the smallest key of its right subtree.
    fn swap_with_successor(&mut self, node: &mut BasicNode<K>) {
        let successor = match node.right.node_mut() {
            Some(right) => right.leftmost_mut(),
            None => return,
        };
        Self::swap_keys(&mut self.observer, &mut node.key, node.id, successor);
    }

    /// Exchanges the key of `node` with the largest key of its left subtree.
    fn swap_with_predecessor(&mut self, node: &mut BasicNode<K>) {
        let predecessor = match node.left.node_mut() {
            Some(left) => left.rightmost_mut(),
            None => return,
        };
        Self::swap_keys(&mut self.observer, &mut node.key, node.id, predecessor);
    }

    /// Only the keys move. Colors, sons and ids stay with their nodes.
    fn swap_keys(observer: &mut O, key: &mut K, id: NodeId, other: &mut BasicNode<K>) {
        observer.before_key_change(id, key);
        observer.before_key_change(other.id, &other.key);
        std::mem::swap(key, &mut other.key);
        tracing::trace!(node = id.0, with = other.id.0, "swapped keys");
        observer.rebalanced(Rebalance::SwapKeys {
            node: id,
            with: other.id,
        });
    }

    /// Makes sure the left son or the left grandson of `node` is red,
    /// so that deleting from the left subtree won't shorten its black height.
    fn make_left_red(&mut self, mut node: Box<BasicNode<K>>) -> Box<BasicNode<K>> {
        if node.left.is_red() || node.left.left_is_red() {
            return node;
        }
        self.flip_color(&mut node);
        if node.right.left_is_red() {
            let right = node.right.take().into_node_boxed().expect(MISSING_SON);
            node.right = BasicTree::Root(self.rotate_right(right));
            node = self.rotate_left(node);
            self.flip_color(&mut node);
        }
        node
    }

    /// Mirror image of [`Self::make_left_red`], for deleting from the right subtree.
    fn make_right_red(&mut self, mut node: Box<BasicNode<K>>) -> Box<BasicNode<K>> {
        if node.left.is_red() && !node.right.left_is_red() {
            node = self.rotate_right(node);
        }
        if node.right.is_red() || node.right.left_is_red() {
            return node;
        }
        self.flip_color(&mut node);
        if node.left.left_is_red() {
            node = self.rotate_right(node);
            self.flip_color(&mut node);
        }
        node
    }

    /// The fix-up applied to every node on the way back up.
    /// The checks run in this order, each one on the result of the previous ones.
    fn local_balance(&mut self, mut node: Box<BasicNode<K>>) -> Box<BasicNode<K>> {
        if node.right.is_red() && !node.left.is_red() {
            node = self.rotate_left(node);
        }
        if node.left.is_red() && node.left.left_is_red() {
            node = self.rotate_right(node);
        }
        if node.left.is_red() && node.right.is_red() {
            self.flip_color(&mut node);
        }
        node
    }

    //          node                      top
    //          /  \                      /  \
    //         a   top        ==>      node   c
    //             /  \                /  \
    //            b    c              a    b
    //
    fn rotate_left(&mut self, mut node: Box<BasicNode<K>>) -> Box<BasicNode<K>> {
        let mut top = node.right.take().into_node_boxed().expect(MISSING_SON);
        node.right = top.left.take();
        self.exchange_colors(&mut top, &mut node);

        let (node_id, top_id, slot) = (node.id, top.id, node.slot);
        top.left = BasicTree::Root(node);
        if let Some(slot) = slot {
            if self.observer.tracks_slots() {
                self.relayout(&mut top, slot);
            }
        }
        tracing::trace!(node = node_id.0, top = top_id.0, "rotated left");
        self.observer.rebalanced(Rebalance::RotateLeft {
            node: node_id,
            top: top_id,
        });
        top
    }

    //          node                 top
    //          /  \                 /  \
    //        top   c      ==>      a   node
    //        /  \                      /  \
    //       a    b                    b    c
    //
    fn rotate_right(&mut self, mut node: Box<BasicNode<K>>) -> Box<BasicNode<K>> {
        let mut top = node.left.take().into_node_boxed().expect(MISSING_SON);
        node.left = top.right.take();
        self.exchange_colors(&mut top, &mut node);

        let (node_id, top_id, slot) = (node.id, top.id, node.slot);
        top.right = BasicTree::Root(node);
        if let Some(slot) = slot {
            if self.observer.tracks_slots() {
                self.relayout(&mut top, slot);
            }
        }
        tracing::trace!(node = node_id.0, top = top_id.0, "rotated right");
        self.observer.rebalanced(Rebalance::RotateRight {
            node: node_id,
            top: top_id,
        });
        top
    }

    /// The new top of a rotation takes over the color of the link above it.
    fn exchange_colors(&mut self, top: &mut BasicNode<K>, node: &mut BasicNode<K>) {
        let (top_color, node_color) = (top.color, node.color);
        self.set_color(top, node_color);
        self.set_color(node, top_color);
    }

    /// Inverts the colors of `node` and both its sons.
    fn flip_color(&mut self, node: &mut BasicNode<K>) {
        let color = node.color.flip();
        self.set_color(node, color);
        if let Some(left) = node.left.node_mut() {
            let color = left.color.flip();
            self.set_color(left, color);
        }
        if let Some(right) = node.right.node_mut() {
            let color = right.color.flip();
            self.set_color(right, color);
        }
        tracing::trace!(node = node.id.0, "flipped colors");
        self.observer
            .rebalanced(Rebalance::FlipColor { node: node.id });
    }

    fn set_color(&mut self, node: &mut BasicNode<K>, color: Color) {
        if node.color != color {
            self.observer.before_color_change(node.id, node.color);
            node.color = color;
        }
    }

    fn root_slot(&self) -> Option<Slot> {
        if self.observer.tracks_slots() {
            Some(Slot::ROOT)
        } else {
            None
        }
    }

    /// Lays out the subtree at `node` as if `node` were at `slot`.
    fn relayout(&mut self, node: &mut BasicNode<K>, slot: Slot) {
        if node.slot != Some(slot) {
            self.observer.before_slot_change(node.id, node.slot);
            node.slot = Some(slot);
        }
        if let Some(left) = node.left.node_mut() {
            self.relayout(left, slot.left());
        }
        if let Some(right) = node.right.node_mut() {
            self.relayout(right, slot.right());
        }
    }

    /// Returns the number of black links on every path from the root to a
    /// missing son. Panics if the paths disagree.
    pub fn black_height(&self) -> usize {
        Self::black_height_internal(&self.tree)
    }

    fn black_height_internal(tree: &BasicTree<K>) -> usize {
        match tree.node() {
            None => 0,
            Some(node) => {
                let left = Self::black_height_internal(&node.left);
                let right = Self::black_height_internal(&node.right);
                assert_eq!(left, right, "black heights differ below a node");
                left + if node.is_red() { 0 } else { 1 }
            }
        }
    }

    /// Checks that the invariants of the tree hold:
    /// the keys are in order, the root is black, red links lean left,
    /// no two red links are consecutive, and the tree is perfectly black-balanced.
    /// If they don't, panics.
    pub fn assert_correctness(&self) {
        if let Some(root) = self.tree.node() {
            assert!(!root.is_red(), "the root is red");
        }
        let size = Self::assert_correctness_internal(&self.tree, None, None).1;
        assert_eq!(size, self.len, "the recorded size is wrong");
    }

    /// Returns the black height and the size of the subtree.
    fn assert_correctness_internal(
        tree: &BasicTree<K>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> (usize, usize) {
        let node = match tree.node() {
            None => return (0, 0),
            Some(node) => node,
        };
        if let Some(lower) = lower {
            assert!(*lower < node.key, "keys are out of order");
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "keys are out of order");
        }
        assert!(!node.right.is_red(), "a red link leans right");
        assert!(
            !(node.is_red() && node.left.is_red()),
            "two consecutive red links"
        );

        let (left_height, left_size) =
            Self::assert_correctness_internal(&node.left, lower, Some(&node.key));
        let (right_height, right_size) =
            Self::assert_correctness_internal(&node.right, Some(&node.key), upper);
        assert_eq!(left_height, right_height, "black heights differ below a node");
        let height = left_height + if node.is_red() { 0 } else { 1 };
        (height, left_size + right_size + 1)
    }
}

impl<K: Ord, O: Observer<K>> std::iter::Extend<K> for LLRBTree<K, O> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> std::iter::FromIterator<K> for LLRBTree<K> {
    /// This takes `O(n log n)` worst-case time.
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tree = LLRBTree::new();
        tree.extend(iter);
        tree
    }
}
