//! Subtree teardown, deep cloning and in-place reconciliation.

use smallvec::SmallVec;

use super::arena::NodeArena;
use super::node::{Direction, NodeId};

/// Inline capacity of explicit traversal stacks; deeper walks spill to the heap.
pub(crate) const STACK_INLINE: usize = 64;

impl<T> NodeArena<T> {
    /// Destroys every node of the subtree rooted at `root`.
    ///
    /// The subtree must already be detached from any parent, or be a whole
    /// tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn destroy_subtree(&mut self, root: NodeId) {
        debug_assert!(self.parent(root).is_none(), "subtree still attached");

        let mut pending: SmallVec<[NodeId; STACK_INLINE]> = SmallVec::new();
        pending.push(root);
        while let Some(id) = pending.pop() {
            pending.extend(Direction::BOTH.into_iter().filter_map(|side| self.child(id, side)));
            drop(self.destroy_node(id));
        }
    }

    /// Destroys every node of the tree rooted at `root` by walking the
    /// thread from the minimum.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn reset(&mut self, root: NodeId) {
        debug_assert!(self.parent(root).is_none(), "reset needs a whole tree");

        let mut cursor = Some(self.min(root));
        while let Some(id) = cursor {
            cursor = self.successor(id);
            drop(self.destroy_node(id));
        }
    }

    /// Builds an independent deep copy of a subtree of `source` in this
    /// arena and returns the new subtree root.
    ///
    /// Colors are copied, payloads are cloned. The copy's outer thread
    /// boundaries are left open for the caller to attach.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clone_subtree(&mut self, source: &Self, root: NodeId) -> NodeId
    where
        T: Clone,
    {
        let original = source.node(root);
        let copy = self.create_node(original.value.clone());
        self.set_color(copy, original.color);

        for side in Direction::BOTH {
            if let Some(child) = original.child(side) {
                let subtree = self.clone_subtree(source, child);
                self.attach_subtree(copy, subtree, side);
            }
        }
        copy
    }

    /// Clones a whole tree of `source` into this arena.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clone_tree(&mut self, source: &Self, root: Option<NodeId>) -> Option<NodeId>
    where
        T: Clone,
    {
        root.map(|root| self.clone_subtree(source, root))
    }

    /// Rewrites the tree rooted at `destination` so that it matches the
    /// tree of `source` rooted at `root`, node for node, and returns the
    /// resulting root.
    ///
    /// Every destination node whose position also exists in the source is
    /// kept and receives the source payload and color. Positions only in
    /// the source are cloned; positions only in the destination are
    /// destroyed.
    ///
    /// # Complexity
    ///
    /// O(n + m) for destination and source sizes n and m.
    pub fn reconcile(
        &mut self,
        destination: Option<NodeId>,
        source: &Self,
        root: Option<NodeId>,
    ) -> Option<NodeId>
    where
        T: Clone,
    {
        let result = self.reconcile_subtree(destination, source, root)?;
        let first = self.min(result);
        let last = self.max(result);
        self.set_parent(result, None);
        self.set_neighbour(first, Direction::Left, None);
        self.set_neighbour(last, Direction::Right, None);
        Some(result)
    }

    /// Returns the subtree to use in place of `destination`. Its internal
    /// thread is consistent; its outer boundary is stitched by the caller.
    fn reconcile_subtree(
        &mut self,
        destination: Option<NodeId>,
        source: &Self,
        root: Option<NodeId>,
    ) -> Option<NodeId>
    where
        T: Clone,
    {
        match (destination, root) {
            (None, None) => None,
            (Some(destination), None) => {
                self.destroy_subtree(destination);
                None
            }
            (None, Some(root)) => Some(self.clone_subtree(source, root)),
            (Some(destination), Some(root)) => {
                let original = source.node(root);
                {
                    let target = self.node_mut(destination);
                    target.value = original.value.clone();
                    target.color = original.color;
                }

                for side in Direction::BOTH {
                    let current = self.child(destination, side);
                    if original.child(side).is_none()
                        && let Some(child) = current
                    {
                        self.detach_child(destination, side);
                        self.set_parent(child, None);
                    }
                    match self.reconcile_subtree(current, source, original.child(side)) {
                        // Re-stitch even when the child is reused: its
                        // extreme node may have changed underneath.
                        Some(subtree) => self.attach_subtree(destination, subtree, side),
                        None => self.detach_child(destination, side),
                    }
                }
                Some(destination)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;
    use rstest::rstest;
    use std::rc::Rc;

    fn build(values: &[i32]) -> (NodeArena<i32>, Option<NodeId>) {
        let mut arena = NodeArena::new();
        let mut root = None;
        for &value in values {
            let node = arena.create_node(value);
            root = Some(arena.insert(root, node, &NaturalOrder));
        }
        (arena, root)
    }

    fn values(arena: &NodeArena<i32>, root: Option<NodeId>) -> Vec<i32> {
        arena.iter(root).copied().collect()
    }

    #[rstest]
    fn test_destroy_subtree_releases_everything() {
        let (mut arena, root) = build(&[4, 2, 6, 1, 3, 5, 7]);
        arena.destroy_subtree(root.expect("non-empty"));
        assert!(arena.is_empty());
        assert_eq!(arena.stats().released, 7);
    }

    #[rstest]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "subtree still attached")]
    fn test_destroy_subtree_rejects_attached_subtree() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let left = arena.child(root.expect("non-empty"), Direction::Left).expect("left child");
        arena.destroy_subtree(left);
    }

    #[rstest]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "reset needs a whole tree")]
    fn test_reset_rejects_inner_node() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let right = arena.child(root.expect("non-empty"), Direction::Right).expect("right child");
        arena.reset(right);
    }

    #[rstest]
    fn test_reset_releases_payload_references() {
        let payload = Rc::new(0);
        let mut arena = NodeArena::new();
        let mut root = None;
        for _ in 0..5 {
            let node = arena.create_node(Rc::clone(&payload));
            root = Some(arena.insert(root, node, &NaturalOrder));
        }
        assert_eq!(Rc::strong_count(&payload), 6);

        arena.reset(root.expect("non-empty"));

        assert_eq!(Rc::strong_count(&payload), 1);
        assert!(arena.is_empty());
    }

    #[rstest]
    fn test_clone_subtree_is_independent() {
        let (source, root) = build(&[5, 3, 8, 1, 4, 7, 9]);
        let mut copy = NodeArena::new();
        let copied = copy.clone_tree(&source, root);

        assert_eq!(values(&copy, copied), values(&source, root));
        assert!(copy.validate(copied, &NaturalOrder).is_ok());

        let extra = copy.create_node(6);
        let copied = Some(copy.insert(copied, extra, &NaturalOrder));
        assert_eq!(values(&copy, copied), vec![1, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(values(&source, root), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[rstest]
    fn test_reconcile_same_shape_allocates_nothing() {
        let (source, source_root) = build(&[10, 20, 30, 40, 50]);
        let (mut target, target_root) = build(&[1, 2, 3, 4, 5]);
        let before = target.stats();

        let root = target.reconcile(target_root, &source, source_root);

        assert_eq!(root, target_root);
        assert_eq!(target.stats(), before);
        assert_eq!(values(&target, root), vec![10, 20, 30, 40, 50]);
        assert!(target.validate(root, &NaturalOrder).is_ok());
    }

    #[rstest]
    fn test_reconcile_grows_and_shrinks() {
        let (source, source_root) = build(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let (mut target, target_root) = build(&[1, 2]);

        let root = target.reconcile(target_root, &source, source_root);
        assert_eq!(values(&target, root), (1..=8).collect::<Vec<_>>());
        assert!(target.validate(root, &NaturalOrder).is_ok());
        assert_eq!(target.len(), 8);

        let (small, small_root) = build(&[42]);
        let root = target.reconcile(root, &small, small_root);
        assert_eq!(values(&target, root), vec![42]);
        assert_eq!(target.len(), 1);
    }

    #[rstest]
    fn test_reconcile_with_empty_source_destroys_destination() {
        let (mut target, target_root) = build(&[1, 2, 3]);
        let empty: NodeArena<i32> = NodeArena::new();
        assert_eq!(target.reconcile(target_root, &empty, None), None);
        assert!(target.is_empty());
    }
}
