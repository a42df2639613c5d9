//! Owning iterator shared by both containers.

use std::iter::FusedIterator;

use crate::engine::{Direction, NodeArena, NodeId};

/// An owning iterator over the elements of a container, in order.
///
/// Created by the `into_iter` method of
/// [`SortedTree`](super::SortedTree) and [`SortedSet`](super::SortedSet).
/// Elements not yielded are dropped with the iterator.
pub struct IntoIter<T> {
    arena: NodeArena<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(arena: NodeArena<T>, root: Option<NodeId>, len: usize) -> Self {
        Self {
            front: root.map(|root| arena.min(root)),
            back: root.map(|root| arena.max(root)),
            arena,
            remaining: len,
        }
    }

    /// Takes the node under the cursor and follows the thread past it. The
    /// neighbour is read before the node is destroyed.
    fn step(&mut self, direction: Direction) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let cursor = match direction {
            Direction::Right => &mut self.front,
            Direction::Left => &mut self.back,
        };
        let id = (*cursor)?;
        *cursor = self.arena.node(id).neighbour(direction);
        self.remaining -= 1;
        Some(self.arena.destroy_node(id))
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.step(Direction::Right)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step(Direction::Left)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("IntoIter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
