//! Key lookup and insertion-point search.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::arena::NodeArena;
use super::node::{Direction, NodeId};
use crate::compare::Compare;

impl<T> NodeArena<T> {
    /// Returns the first node found top-down that compares equal to `key`.
    ///
    /// With duplicate keys the node returned is the highest equal node on
    /// the search path, which is deterministic for a given insertion
    /// history but not necessarily the first equal node in order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q, C>(&self, root: Option<NodeId>, key: &Q, comparator: &C) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut cursor = root;
        while let Some(id) = cursor {
            cursor = match comparator.compare(key, self.value(id).borrow()) {
                Ordering::Less => self.child(id, Direction::Left),
                Ordering::Greater => self.child(id, Direction::Right),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Returns the last node visited when descending toward `key`, going
    /// left only when `key` sorts strictly before the node.
    ///
    /// This is the parent a new node with this key would be attached to,
    /// after every existing equal key. `None` means the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn bisect_right<Q, C>(
        &self,
        root: Option<NodeId>,
        key: &Q,
        comparator: &C,
    ) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut cursor = root;
        let mut last = None;
        while let Some(id) = cursor {
            last = Some(id);
            cursor = if comparator.less(key, self.value(id).borrow()) {
                self.child(id, Direction::Left)
            } else {
                self.child(id, Direction::Right)
            };
        }
        last
    }

    /// Returns the first node that sorts strictly after `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn upper_bound<Q, C>(&self, root: Option<NodeId>, key: &Q, comparator: &C) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let parent = self.bisect_right(root, key, comparator)?;
        if comparator.less(key, self.value(parent).borrow()) {
            Some(parent)
        } else {
            self.successor(parent)
        }
    }

    /// Returns the node that would precede `node` if it were inserted with
    /// allow-duplicates semantics, together with the bisection parent.
    ///
    /// The predecessor is the greatest node not greater than the key; it
    /// compares equal to the key exactly when an equal node exists.
    pub(crate) fn placement_of<C>(
        &self,
        root: Option<NodeId>,
        node: NodeId,
        comparator: &C,
    ) -> Option<(NodeId, Direction, Option<NodeId>)>
    where
        C: Compare<T>,
    {
        let key = self.value(node);
        let parent = self.bisect_right(root, key, comparator)?;
        if comparator.less(key, self.value(parent)) {
            Some((parent, Direction::Left, self.predecessor(parent)))
        } else {
            Some((parent, Direction::Right, Some(parent)))
        }
    }
}
