//! Node representation shared by every engine primitive.

use std::fmt;
use std::ops::Not;

// =============================================================================
// Handles
// =============================================================================

/// A stable handle to a node stored in a [`NodeArena`](super::NodeArena).
///
/// Handles stay valid from [`create_node`](super::NodeArena::create_node)
/// until [`destroy_node`](super::NodeArena::destroy_node). Restructuring
/// operations (rotations, replacement, reconciliation) never change the
/// handle of a node that survives them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena slot of this handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

// =============================================================================
// Color and Direction
// =============================================================================

/// The color of a red-black node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// Red node. Never the parent of another red node.
    Red,
    /// Black node. Counted by the black height.
    Black,
}

/// A side of a node: which child slot, or which thread neighbour.
///
/// `Left` selects the left child and the in-order predecessor, `Right`
/// selects the right child and the in-order successor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// Left child / previous node.
    Left,
    /// Right child / next node.
    Right,
}

impl Direction {
    /// Both directions, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Returns the other side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl Not for Direction {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.opposite()
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// A single tree element: payload, structural links, thread links and color.
///
/// `children` and `thread` are indexed by [`Direction`]; `thread[Left]` is
/// the in-order predecessor and `thread[Right]` the in-order successor.
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [Option<NodeId>; 2],
    pub(crate) thread: [Option<NodeId>; 2],
    pub(crate) color: Color,
}

impl<T> Node<T> {
    /// Creates a detached red node.
    pub(crate) const fn detached(value: T) -> Self {
        Self {
            value,
            parent: None,
            children: [None, None],
            thread: [None, None],
            color: Color::Red,
        }
    }

    /// Clears every structural and thread link, keeping payload and color.
    pub(crate) const fn unlink(&mut self) {
        self.parent = None;
        self.children = [None, None];
        self.thread = [None, None];
    }

    /// Returns the payload.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if the node is red.
    #[inline]
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Returns the structural parent.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child on the given side.
    #[inline]
    #[must_use]
    pub const fn child(&self, direction: Direction) -> Option<NodeId> {
        self.children[direction.index()]
    }

    /// Returns the left child.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> Option<NodeId> {
        self.children[0]
    }

    /// Returns the right child.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> Option<NodeId> {
        self.children[1]
    }

    /// Returns the thread neighbour on the given side.
    #[inline]
    #[must_use]
    pub const fn neighbour(&self, direction: Direction) -> Option<NodeId> {
        self.thread[direction.index()]
    }

    /// Returns the in-order predecessor.
    #[inline]
    #[must_use]
    pub const fn prev(&self) -> Option<NodeId> {
        self.thread[0]
    }

    /// Returns the in-order successor.
    #[inline]
    #[must_use]
    pub const fn next(&self) -> Option<NodeId> {
        self.thread[1]
    }

    /// Returns `true` if the node has at most one child.
    #[inline]
    #[must_use]
    pub const fn is_semi_leaf(&self) -> bool {
        self.children[0].is_none() || self.children[1].is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("value", &self.value)
            .field("color", &self.color)
            .field("parent", &self.parent)
            .field("left", &self.left())
            .field("right", &self.right())
            .field("prev", &self.prev())
            .field("next", &self.next())
            .finish()
    }
}
