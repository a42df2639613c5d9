//! Attaching and detaching nodes while keeping the thread consistent.
//!
//! Every primitive here updates the structural links (`parent`, `children`)
//! and the thread links (`prev`, `next`) together, so callers never observe
//! one without the other.

use super::arena::NodeArena;
use super::node::{Direction, NodeId};

impl<T> NodeArena<T> {
    /// Returns which child slot of `parent` holds `child`.
    pub(crate) fn direction_of(&self, parent: NodeId, child: NodeId) -> Direction {
        if self.child(parent, Direction::Right) == Some(child) {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Attaches a detached `node` as the `direction` child of `parent`.
    ///
    /// The new node becomes the thread neighbour of `parent` on that side and
    /// inherits `parent`'s former neighbour on the same side.
    pub(crate) fn insert_child(&mut self, parent: NodeId, node: NodeId, direction: Direction) {
        debug_assert!(self.child(parent, direction).is_none(), "child slot occupied");

        let outer = self.neighbour(parent, direction);

        self.set_child(parent, direction, Some(node));
        self.set_neighbour(parent, direction, Some(node));

        self.set_parent(node, Some(parent));
        self.set_neighbour(node, !direction, Some(parent));
        self.set_neighbour(node, direction, outer);

        if let Some(outer) = outer {
            self.set_neighbour(outer, !direction, Some(node));
        }
    }

    /// Attaches `node` as the left child of `parent`.
    #[inline]
    pub(crate) fn insert_left(&mut self, parent: NodeId, node: NodeId) {
        self.insert_child(parent, node, Direction::Left);
    }

    /// Attaches `node` as the right child of `parent`.
    #[inline]
    pub(crate) fn insert_right(&mut self, parent: NodeId, node: NodeId) {
        self.insert_child(parent, node, Direction::Right);
    }

    /// Removes a semi-leaf from the tree.
    ///
    /// The lone child (if any) takes the vacated slot and is returned. The
    /// thread is stitched around the node, and the node is left with no
    /// links at all; its color is kept for the caller's rebalancing decision.
    pub(crate) fn evict(&mut self, node: NodeId) -> Option<NodeId> {
        debug_assert!(self.node(node).is_semi_leaf(), "evict needs at most one child");

        let parent = self.parent(node);
        let replacement = self
            .child(node, Direction::Left)
            .or_else(|| self.child(node, Direction::Right));

        if let Some(replacement) = replacement {
            self.set_parent(replacement, parent);
        }
        if let Some(parent) = parent {
            let side = self.direction_of(parent, node);
            self.set_child(parent, side, replacement);
        }

        let prev = self.neighbour(node, Direction::Left);
        let next = self.neighbour(node, Direction::Right);
        if let Some(prev) = prev {
            self.set_neighbour(prev, Direction::Right, next);
        }
        if let Some(next) = next {
            self.set_neighbour(next, Direction::Left, prev);
        }

        self.node_mut(node).unlink();
        replacement
    }

    /// Sets a whole subtree as the `direction` child of `parent`.
    ///
    /// The boundary thread links are recomputed from the subtree's extreme
    /// node facing `parent`: its maximum for a left subtree, its minimum for
    /// a right subtree.
    pub(crate) fn attach_subtree(&mut self, parent: NodeId, subtree: NodeId, direction: Direction) {
        let facing = self.extreme(subtree, !direction);

        self.set_child(parent, direction, Some(subtree));
        self.set_parent(subtree, Some(parent));
        self.set_neighbour(parent, direction, Some(facing));
        self.set_neighbour(facing, !direction, Some(parent));
    }

    /// Clears the `direction` child slot of `parent` together with the
    /// matching thread link. The caller re-stitches the outer boundary.
    pub(crate) fn detach_child(&mut self, parent: NodeId, direction: Direction) {
        self.set_child(parent, direction, None);
        self.set_neighbour(parent, direction, None);
    }
}
