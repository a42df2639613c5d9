//! Full invariant check of a tree.

use smallvec::SmallVec;

use super::arena::NodeArena;
use super::copy::STACK_INLINE;
use super::node::{Color, Direction, NodeId};
use crate::compare::Compare;
use crate::error::InvariantViolation;

impl<T> NodeArena<T> {
    /// Checks every red-black, structural, thread and ordering invariant of
    /// the tree rooted at `root` and returns its node count.
    ///
    /// Runs in O(n) time. The first violation found is reported.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] encountered.
    pub fn validate<C>(&self, root: Option<NodeId>, comparator: &C) -> Result<usize, InvariantViolation>
    where
        C: Compare<T>,
    {
        let Some(root) = root else {
            return Ok(0);
        };

        if self.parent(root).is_some() {
            return Err(InvariantViolation::RootHasParent { node: root });
        }
        if self.color(root) == Color::Red {
            return Err(InvariantViolation::RedRoot { node: root });
        }
        self.black_height(root)?;

        let order = self.structural_order(root);
        self.check_thread(&order)?;

        for (position, pair) in order.windows(2).enumerate() {
            if comparator.less(self.value(pair[1]), self.value(pair[0])) {
                return Err(InvariantViolation::Unordered { position });
            }
        }
        Ok(order.len())
    }

    /// Checks parent links and red-red edges below `id` and returns its
    /// black height, absent leaves counting as one.
    fn black_height(&self, id: NodeId) -> Result<usize, InvariantViolation> {
        let mut heights = [1; 2];
        for side in Direction::BOTH {
            let Some(child) = self.child(id, side) else {
                continue;
            };
            if self.parent(child) != Some(id) {
                return Err(InvariantViolation::BrokenParentLink { parent: id, child });
            }
            if self.color(id) == Color::Red && self.color(child) == Color::Red {
                return Err(InvariantViolation::RedRedEdge { node: child });
            }
            heights[side.index()] = self.black_height(child)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { node: id, left, right });
        }
        Ok(left + usize::from(self.color(id) == Color::Black))
    }

    /// In-order sequence obtained from the structural links alone.
    fn structural_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut pending: SmallVec<[NodeId; STACK_INLINE]> = SmallVec::new();
        let mut cursor = Some(root);

        loop {
            while let Some(id) = cursor {
                pending.push(id);
                cursor = self.child(id, Direction::Left);
            }
            let Some(id) = pending.pop() else {
                return order;
            };
            order.push(id);
            cursor = self.child(id, Direction::Right);
        }
    }

    /// Checks that the thread is symmetric, open at both ends, and follows
    /// `order` exactly.
    fn check_thread(&self, order: &[NodeId]) -> Result<(), InvariantViolation> {
        let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
            return Ok(());
        };
        if self.predecessor(first).is_some() {
            return Err(InvariantViolation::ThreadMismatch { position: 0 });
        }
        if self.successor(last).is_some() {
            return Err(InvariantViolation::ThreadMismatch {
                position: order.len(),
            });
        }

        for (position, &id) in order.iter().enumerate() {
            let following = order.get(position + 1).copied();
            if self.successor(id) != following {
                return Err(InvariantViolation::ThreadMismatch {
                    position: position + 1,
                });
            }
            if let Some(next) = following
                && self.predecessor(next) != Some(id)
            {
                return Err(InvariantViolation::BrokenThreadLink { node: next });
            }
        }
        Ok(())
    }
}
