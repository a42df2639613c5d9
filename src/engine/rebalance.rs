//! Rotation and the two red-black repair passes.
//!
//! Rotations never touch the thread: they preserve the in-order sequence,
//! so only structural links move.

use super::arena::NodeArena;
use super::node::{Color, Direction, NodeId};

impl<T> NodeArena<T> {
    /// Rotates the subtree rooted at `node` toward `direction`.
    ///
    /// The child of `node` on the opposite side (the pivot) takes `node`'s
    /// place, and `node` becomes the pivot's `direction` child. Rotating
    /// `Left` lifts the right child; rotating `Right` lifts the left child.
    pub(crate) fn rotate(&mut self, node: NodeId, direction: Direction) {
        let Some(pivot) = self.child(node, !direction) else {
            unreachable!("rotation toward {direction:?} needs a child on the other side")
        };
        let parent = self.parent(node);
        let inner = self.child(pivot, direction);
        let side = parent.map(|parent| self.direction_of(parent, node));

        self.set_parent(node, Some(pivot));
        self.set_child(node, !direction, inner);

        self.set_parent(pivot, parent);
        self.set_child(pivot, direction, Some(node));

        if let (Some(parent), Some(side)) = (parent, side) {
            self.set_child(parent, side, Some(pivot));
        }
        if let Some(inner) = inner {
            self.set_parent(inner, Some(node));
        }
    }

    /// Restores the red-black invariants after `node` was attached red.
    pub(crate) fn insert_fixup(&mut self, mut node: NodeId) {
        debug_assert_eq!(self.color(node), Color::Red);

        loop {
            let Some(mut parent) = self.parent(node) else {
                self.set_color(node, Color::Black);
                return;
            };
            if self.color(parent) == Color::Black {
                return;
            }
            // A red parent is never the root, so it has a parent.
            let Some(grand) = self.parent(parent) else {
                self.set_color(parent, Color::Black);
                return;
            };

            let side = self.direction_of(grand, parent);
            let uncle = self.child(grand, !side);

            if let Some(uncle) = uncle
                && self.color(uncle) == Color::Red
            {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                node = grand;
                continue;
            }

            if self.child(parent, side) != Some(node) {
                // Inner grandchild: move it to the outside first.
                self.rotate(parent, side);
                parent = node;
            }

            self.rotate(grand, !side);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            return;
        }
    }

    /// Restores the red-black invariants after a black node was evicted.
    ///
    /// `replacement` is the node now occupying the vacated slot (absent for
    /// a leaf), `parent` its parent and `side` the slot under `parent`.
    pub(crate) fn delete_fixup(
        &mut self,
        replacement: Option<NodeId>,
        parent: Option<NodeId>,
        side: Direction,
    ) {
        if self.is_red(replacement) || parent.is_none() {
            if let Some(replacement) = replacement {
                self.set_color(replacement, Color::Black);
            }
            return;
        }

        let mut current = replacement;
        let mut parent = parent;
        let mut direction = side;

        while let Some(above) = parent {
            let Some(mut sibling) = self.child(above, !direction) else {
                unreachable!("a black-height deficit always has a sibling")
            };

            if self.color(sibling) == Color::Red {
                self.rotate(above, direction);
                self.set_color(sibling, Color::Black);
                self.set_color(above, Color::Red);
                let Some(next) = self.child(above, !direction) else {
                    unreachable!("a red sibling always has black children")
                };
                sibling = next;
            }

            let close = self.child(sibling, direction);
            let distant = self.child(sibling, !direction);

            if self.is_black(close) && self.is_black(distant) {
                self.set_color(sibling, Color::Red);
                if self.color(above) == Color::Red {
                    self.set_color(above, Color::Black);
                    return;
                }
                // Push the deficit one level up.
                current = Some(above);
                parent = self.parent(above);
                if let Some(grand) = parent {
                    direction = self.direction_of(grand, above);
                }
                continue;
            }

            let red_close = close.filter(|&close| self.color(close) == Color::Red);
            let (sibling, distant) = match red_close {
                Some(close) => {
                    self.rotate(sibling, !direction);
                    self.set_color(close, self.color(sibling));
                    self.set_color(sibling, Color::Red);
                    (close, Some(sibling))
                }
                None => (sibling, distant),
            };

            self.rotate(above, direction);
            self.set_color(sibling, self.color(above));
            self.set_color(above, Color::Black);
            if let Some(distant) = distant {
                self.set_color(distant, Color::Black);
            }
            return;
        }

        // The deficit reached the root, which absorbs it.
        if let Some(root) = current {
            self.set_color(root, Color::Black);
        }
    }
}
