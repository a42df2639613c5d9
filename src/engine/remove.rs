//! Node removal with rebalancing.

use std::mem;

use super::arena::NodeArena;
use super::node::{Color, Direction, NodeId};

/// Outcome of [`NodeArena::remove`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Removal {
    /// The new root, `None` when the last node was removed.
    pub root: Option<NodeId>,
    /// The detached node that now holds the removed payload.
    pub evicted: NodeId,
}

impl<T> NodeArena<T> {
    /// Removes the payload held by `node` from its tree.
    ///
    /// When `node` has two children its payload is swapped with its
    /// in-order successor's and the successor's slot is the one emptied, so
    /// `evicted` may differ from `node`. In that case `node` stays in the
    /// tree holding the successor's payload. The evicted node is detached,
    /// red, and must be destroyed (or re-inserted) by the caller.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, node: NodeId) -> Removal {
        let mut target = node;

        if !self.node(node).is_semi_leaf() {
            let Some(successor) = self.successor(node) else {
                unreachable!("a node with a right child has a successor")
            };
            self.swap_values(node, successor);
            target = successor;
        }

        let parent = self.parent(target);
        let side = parent.map_or(Direction::Left, |parent| self.direction_of(parent, target));
        let replacement = self.evict(target);

        if self.color(target) == Color::Black {
            self.delete_fixup(replacement, parent, side);
        }
        self.set_color(target, Color::Red);

        let root = replacement.or(parent).map(|id| self.root_of(id));
        Removal {
            root,
            evicted: target,
        }
    }

    fn swap_values(&mut self, left: NodeId, right: NodeId) {
        let Some((first, second)) = self.slots.get2_mut(left.0, right.0) else {
            unreachable!("swap needs two distinct live nodes")
        };
        mem::swap(&mut first.value, &mut second.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;
    use rstest::rstest;

    fn build(values: &[i32]) -> (NodeArena<i32>, Option<NodeId>) {
        let mut arena = NodeArena::new();
        let mut root = None;
        for &value in values {
            let node = arena.create_node(value);
            root = Some(arena.insert(root, node, &NaturalOrder));
        }
        (arena, root)
    }

    fn remove_key(arena: &mut NodeArena<i32>, root: Option<NodeId>, key: i32) -> Option<NodeId> {
        let node = arena
            .find(root, &key, &NaturalOrder)
            .expect("key present in tree");
        let removal = arena.remove(node);
        assert_eq!(arena.destroy_node(removal.evicted), key);
        removal.root
    }

    #[rstest]
    fn test_remove_only_node_empties_tree() {
        let (mut arena, root) = build(&[1]);
        let root = remove_key(&mut arena, root, 1);
        assert_eq!(root, None);
        assert!(arena.is_empty());
    }

    #[rstest]
    fn test_remove_leaf() {
        let (mut arena, root) = build(&[5, 3, 8, 1, 4, 7, 9]);
        let root = remove_key(&mut arena, root, 4);
        let values: Vec<i32> = arena.iter(root).copied().collect();
        assert_eq!(values, vec![1, 3, 5, 7, 8, 9]);
        assert!(arena.validate(root, &NaturalOrder).is_ok());
    }

    #[rstest]
    fn test_remove_two_children_swaps_with_successor() {
        let (mut arena, root) = build(&[5, 3, 8]);
        let top = root.expect("tree is not empty");
        assert_eq!(arena.value(top), &5);

        let removal = arena.remove(top);

        assert_ne!(removal.evicted, top);
        assert_eq!(arena.value(top), &8);
        assert_eq!(arena.destroy_node(removal.evicted), 5);
        let values: Vec<i32> = arena.iter(removal.root).copied().collect();
        assert_eq!(values, vec![3, 8]);
    }

    #[rstest]
    fn test_remove_every_node_keeps_invariants() {
        let keys: Vec<i32> = (0..64).map(|index| (index * 37) % 64).collect();
        let (mut arena, mut root) = build(&keys);
        for key in keys.iter().rev() {
            root = remove_key(&mut arena, root, *key);
            assert!(arena.validate(root, &NaturalOrder).is_ok());
        }
        assert_eq!(root, None);
        assert_eq!(arena.stats().live(), 0);
    }
}
