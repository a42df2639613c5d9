//! Traversals: depth-first pre-order, breadth-first, and the threaded
//! in-order iterator.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::NodeArena;
use super::copy::STACK_INLINE;
use super::node::{Direction, Node, NodeId};

impl<T> NodeArena<T> {
    /// Visits every node of the tree in pre-order (node, left, right).
    ///
    /// The visitor receives the handle, the node and its depth, the root
    /// being at depth 0.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn visit_df<F>(&self, root: Option<NodeId>, mut visitor: F)
    where
        F: FnMut(NodeId, &Node<T>, usize),
    {
        let mut pending: SmallVec<[(NodeId, usize); STACK_INLINE]> = SmallVec::new();
        pending.extend(root.map(|root| (root, 0)));

        while let Some((id, depth)) = pending.pop() {
            let node = self.node(id);
            visitor(id, node, depth);
            if let Some(right) = node.right() {
                pending.push((right, depth + 1));
            }
            if let Some(left) = node.left() {
                pending.push((left, depth + 1));
            }
        }
    }

    /// Visits every node of the tree level by level, left to right.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn visit_bf<F>(&self, root: Option<NodeId>, mut visitor: F)
    where
        F: FnMut(NodeId, &Node<T>, usize),
    {
        let mut queue: VecDeque<(NodeId, usize)> = root.map(|root| (root, 0)).into_iter().collect();

        while let Some((id, depth)) = queue.pop_front() {
            let node = self.node(id);
            visitor(id, node, depth);
            for side in Direction::BOTH {
                if let Some(child) = node.child(side) {
                    queue.push_back((child, depth + 1));
                }
            }
        }
    }

    /// Returns an in-order iterator over the payloads of the tree.
    ///
    /// Walks the thread, so each step is O(1). Counting the nodes up front
    /// costs O(n); containers that track their length use
    /// [`Iter::with_len`] instead.
    ///
    /// # Complexity
    ///
    /// O(1) per step.
    #[must_use]
    pub fn iter(&self, root: Option<NodeId>) -> Iter<'_, T> {
        Iter::with_len(self, root, self.size(root))
    }
}

/// In-order iterator over the payloads of one tree in a [`NodeArena`].
pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Builds an iterator over a tree known to hold `len` nodes.
    pub(crate) fn with_len(arena: &'a NodeArena<T>, root: Option<NodeId>, len: usize) -> Self {
        Self {
            arena,
            front: root.map(|root| arena.min(root)),
            back: root.map(|root| arena.max(root)),
            remaining: len,
        }
    }

    fn step(&mut self, direction: Direction) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let cursor = match direction {
            Direction::Right => &mut self.front,
            Direction::Left => &mut self.back,
        };
        let id = (*cursor)?;
        let node = self.arena.node(id);
        *cursor = node.neighbour(direction);
        self.remaining -= 1;
        Some(node.value())
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.step(Direction::Right)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step(Direction::Left)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}
