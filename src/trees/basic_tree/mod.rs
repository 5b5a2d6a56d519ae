//! The basic tree module
//! This module implements the owned nodes the red-black tree is built from.
//! It knows nothing about balancing: it only stores keys, colors and children,
//! and answers the local questions the balancing code asks.

mod print;

pub use print::print;

/// The color of the link from a node's parent to the node.
/// A red link glues a node to its parent, forming a 3-node of the 2-3 tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns the other color.
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

impl Default for Color {
    /// New nodes always attach through a red link.
    fn default() -> Self {
        Color::Red
    }
}

/// The identity of a physical node inside one tree.
/// It is assigned when the node is created and never moves to another node,
/// even when deletion swaps keys between nodes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u64);

/// A position in the complete binary layout of the tree.
/// The root is at `(0, 0)`, and the sons of `(row, col)` are at
/// `(row + 1, 2 * col)` and `(row + 1, 2 * col + 1)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Slot {
    pub row: u32,
    pub col: u64,
}

impl Slot {
    pub const ROOT: Slot = Slot { row: 0, col: 0 };

    pub fn left(self) -> Slot {
        Slot {
            row: self.row + 1,
            col: self.col * 2,
        }
    }

    pub fn right(self) -> Slot {
        Slot {
            row: self.row + 1,
            col: self.col * 2 + 1,
        }
    }
}

/// A basic tree. might be empty.
#[derive(Clone, Debug)]
pub enum BasicTree<K> {
    Empty,
    Root(Box<BasicNode<K>>),
}
use BasicTree::*;

impl<K> BasicTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    /// Returns The inner node.
    pub fn node(&self) -> Option<&BasicNode<K>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    /// Returns The inner node.
    pub fn node_mut(&mut self) -> Option<&mut BasicNode<K>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    /// Returns The inner node, still in its box.
    pub fn into_node_boxed(self) -> Option<Box<BasicNode<K>>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    /// Takes the subtree out, leaving an empty tree in its place.
    pub fn take(&mut self) -> BasicTree<K> {
        std::mem::replace(self, Empty)
    }

    /// Returns `true` if the link to this subtree is red.
    /// Empty trees count as black.
    pub fn is_red(&self) -> bool {
        match self {
            Empty => false,
            Root(node) => node.is_red(),
        }
    }

    /// Returns `true` if this subtree's root has a red left son.
    pub fn left_is_red(&self) -> bool {
        match self {
            Empty => false,
            Root(node) => node.left.is_red(),
        }
    }
}

impl<K> Default for BasicTree<K> {
    fn default() -> Self {
        Empty
    }
}

impl<K> From<BasicNode<K>> for BasicTree<K> {
    fn from(node: BasicNode<K>) -> Self {
        Root(Box::new(node))
    }
}

impl<K> From<Box<BasicNode<K>>> for BasicTree<K> {
    fn from(node: Box<BasicNode<K>>) -> Self {
        Root(node)
    }
}

/// Compares keys, colors and shape. Node ids and slots are ignored.
impl<K: PartialEq> PartialEq for BasicTree<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Empty, Empty) => true,
            (Root(a), Root(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Eq> Eq for BasicTree<K> {}

/// A basic node. can be viewed as a non-empty basic tree: it always has a key.
#[derive(Clone, Debug)]
pub struct BasicNode<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) id: NodeId,
    pub(crate) slot: Option<Slot>,
    pub(crate) left: BasicTree<K>,
    pub(crate) right: BasicTree<K>,
}

impl<K> BasicNode<K> {
    /// Creates a red node with no sons.
    pub fn new(key: K, id: NodeId) -> BasicNode<K> {
        BasicNode {
            key,
            color: Color::default(),
            id,
            slot: None,
            left: Empty,
            right: Empty,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The layout position of this node. Only maintained when the
    /// tree's observer tracks slots, `None` otherwise.
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    pub fn left(&self) -> &BasicTree<K> {
        &self.left
    }

    pub fn right(&self) -> &BasicTree<K> {
        &self.right
    }

    /// Returns the node holding the smallest key of this subtree.
    pub fn leftmost(&self) -> &BasicNode<K> {
        match &self.left {
            Empty => self,
            Root(left) => left.leftmost(),
        }
    }

    /// Returns the node holding the largest key of this subtree.
    pub fn rightmost(&self) -> &BasicNode<K> {
        match &self.right {
            Empty => self,
            Root(right) => right.rightmost(),
        }
    }

    pub(crate) fn leftmost_mut(&mut self) -> &mut BasicNode<K> {
        if self.left.is_empty() {
            self
        } else {
            match &mut self.left {
                Root(left) => left.leftmost_mut(),
                Empty => unreachable!(),
            }
        }
    }

    pub(crate) fn rightmost_mut(&mut self) -> &mut BasicNode<K> {
        if self.right.is_empty() {
            self
        } else {
            match &mut self.right {
                Root(right) => right.rightmost_mut(),
                Empty => unreachable!(),
            }
        }
    }
}

impl<K: PartialEq> PartialEq for BasicNode<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.color == other.color
            && self.left == other.left
            && self.right == other.right
    }
}

impl<K: Eq> Eq for BasicNode<K> {}
