//! Insertion policies: allow-duplicates, unique, and replace.
//!
//! All three locate the attachment point with
//! [`bisect_right`](NodeArena::bisect_right), attach the red node, repair
//! with `insert_fixup` and report the new root. They never destroy a node:
//! a rejected or supplanted node is handed back to the caller, who decides
//! its fate with [`destroy_node`](NodeArena::destroy_node).

use super::arena::NodeArena;
use super::node::{Color, Direction, NodeId};
use crate::compare::Compare;

/// Outcome of [`NodeArena::insert_unique`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Placement {
    /// The node was attached.
    Attached {
        /// The new root.
        root: NodeId,
    },
    /// An equal node already exists; the new node was left detached.
    Rejected {
        /// The unchanged root.
        root: NodeId,
        /// The pre-existing equal node, which stays canonical.
        existing: NodeId,
    },
}

impl Placement {
    /// The root after the operation.
    #[inline]
    #[must_use]
    pub const fn root(self) -> NodeId {
        match self {
            Self::Attached { root } | Self::Rejected { root, .. } => root,
        }
    }

    /// Returns `true` if the node was attached.
    #[inline]
    #[must_use]
    pub const fn is_attached(self) -> bool {
        matches!(self, Self::Attached { .. })
    }
}

/// Outcome of [`NodeArena::insert_replace`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Replacement {
    /// The new root.
    pub root: NodeId,
    /// The detached node that was supplanted, if an equal key existed.
    pub replaced: Option<NodeId>,
}

impl<T> NodeArena<T> {
    /// Attaches `node` after every node that compares equal to it.
    ///
    /// Returns the new root.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert<C>(&mut self, root: Option<NodeId>, node: NodeId, comparator: &C) -> NodeId
    where
        C: Compare<T>,
    {
        debug_assert!(self.node(node).parent().is_none(), "node already attached");

        if let Some((parent, direction, _)) = self.placement_of(root, node, comparator) {
            match direction {
                Direction::Left => self.insert_left(parent, node),
                Direction::Right => self.insert_right(parent, node),
            }
        }

        self.insert_fixup(node);
        self.root_of(node)
    }

    /// Attaches `node` unless a node comparing equal already exists.
    ///
    /// On rejection `node` is left detached and untouched; the caller must
    /// destroy it to release its payload.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert_unique<C>(
        &mut self,
        root: Option<NodeId>,
        node: NodeId,
        comparator: &C,
    ) -> Placement
    where
        C: Compare<T>,
    {
        let Some((parent, direction, before)) = self.placement_of(root, node, comparator) else {
            self.insert_fixup(node);
            return Placement::Attached { root: node };
        };

        if let Some(existing) = before
            && !comparator.less(self.value(existing), self.value(node))
        {
            return Placement::Rejected {
                root: self.root_of(parent),
                existing,
            };
        }

        match direction {
            Direction::Left => self.insert_left(parent, node),
            Direction::Right => self.insert_right(parent, node),
        }
        self.insert_fixup(node);
        Placement::Attached {
            root: self.root_of(node),
        }
    }

    /// Attaches `node`, supplanting a node that compares equal if one exists.
    ///
    /// The new node takes over the supplanted node's exact position: parent,
    /// children, color and thread neighbours. The supplanted node is returned
    /// detached and the caller must destroy it to release its payload.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert_replace<C>(
        &mut self,
        root: Option<NodeId>,
        node: NodeId,
        comparator: &C,
    ) -> Replacement
    where
        C: Compare<T>,
    {
        let Some((parent, direction, before)) = self.placement_of(root, node, comparator) else {
            self.insert_fixup(node);
            return Replacement {
                root: node,
                replaced: None,
            };
        };

        if let Some(existing) = before
            && !comparator.less(self.value(existing), self.value(node))
        {
            let current = self.root_of(existing);
            self.transplant(existing, node);
            let root = if current == existing { node } else { current };
            return Replacement {
                root,
                replaced: Some(existing),
            };
        }

        match direction {
            Direction::Left => self.insert_left(parent, node),
            Direction::Right => self.insert_right(parent, node),
        }
        self.insert_fixup(node);
        Replacement {
            root: self.root_of(node),
            replaced: None,
        }
    }

    /// Moves every link of `old` onto the detached `new`, leaving `old`
    /// detached and red.
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        let side = parent.map(|parent| self.direction_of(parent, old));

        let (children, thread, color) = {
            let source = self.node(old);
            (source.children, source.thread, source.color)
        };
        {
            let target = self.node_mut(new);
            target.parent = parent;
            target.children = children;
            target.thread = thread;
            target.color = color;
        }

        if let (Some(parent), Some(side)) = (parent, side) {
            self.set_child(parent, side, Some(new));
        }
        for direction in Direction::BOTH {
            if let Some(child) = children[direction.index()] {
                self.set_parent(child, Some(new));
            }
            if let Some(neighbour) = thread[direction.index()] {
                self.set_neighbour(neighbour, !direction, Some(new));
            }
        }

        self.node_mut(old).unlink();
        self.set_color(old, Color::Red);
    }
}
