//! Arena, root, length and comparator shared by both containers.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::compare::Compare;
use crate::engine::{Direction, Iter, NodeArena, NodeId, Placement};
use crate::error::TreeError;

pub(crate) struct RawTree<T, C> {
    arena: NodeArena<T>,
    root: Option<NodeId>,
    len: usize,
    comparator: C,
}

impl<T, C> RawTree<T, C> {
    pub(crate) fn new(comparator: C) -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            root: None,
            len: 0,
            comparator,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::with_len(&self.arena, self.root, self.len)
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.root.map(|root| self.arena.value(self.arena.min(root)))
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.root.map(|root| self.arena.value(self.arena.max(root)))
    }

    pub(crate) fn height(&self) -> usize {
        self.arena.height(self.root)
    }

    pub(crate) fn structure(&self) -> Structure<'_, T> {
        Structure {
            arena: &self.arena,
            root: self.root,
        }
    }

    pub(crate) fn into_parts(self) -> (NodeArena<T>, Option<NodeId>, usize) {
        (self.arena, self.root, self.len)
    }

    pub(crate) fn pop_first(&mut self) -> Option<T> {
        let first = self.arena.min(self.root?);
        Some(self.take(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<T> {
        let last = self.arena.max(self.root?);
        Some(self.take(last))
    }

    pub(crate) fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            self.arena.reset(root);
        }
        tracing::trace!(released = self.len, "cleared tree");
        self.len = 0;
    }

    /// Removes an attached node and returns its payload.
    fn take(&mut self, node: NodeId) -> T {
        let removal = self.arena.remove(node);
        self.root = removal.root;
        self.len -= 1;
        self.arena.destroy_node(removal.evicted)
    }
}

// =============================================================================
// Lookup
// =============================================================================

impl<T, C> RawTree<T, C> {
    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.arena.find(self.root, key, &self.comparator)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.find(key).map(|id| self.arena.value(id))
    }

    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.arena
            .upper_bound(self.root, key, &self.comparator)
            .map(|id| self.arena.value(id))
    }

    /// Counts the elements equal to `key` by walking the thread outward from
    /// the node found top-down.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let Some(found) = self.find(key) else {
            return 0;
        };
        let equal = |id: &NodeId| {
            self.comparator.compare(key, self.arena.value(*id).borrow()) == Ordering::Equal
        };

        let mut count = 1;
        for direction in Direction::BOTH {
            let mut cursor = self.arena.node(found).neighbour(direction);
            while let Some(id) = cursor.filter(&equal) {
                count += 1;
                cursor = self.arena.node(id).neighbour(direction);
            }
        }
        count
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let node = self.find(key)?;
        Some(self.take(node))
    }
}

// =============================================================================
// Insertion
// =============================================================================

impl<T, C: Compare<T>> RawTree<T, C> {
    pub(crate) fn insert_multi(&mut self, value: T) {
        let node = self.arena.create_node(value);
        self.root = Some(self.arena.insert(self.root, node, &self.comparator));
        self.len += 1;
    }

    /// Returns `false`, dropping `value`, when an equal element exists.
    pub(crate) fn insert_unique(&mut self, value: T) -> bool {
        let node = self.arena.create_node(value);
        match self.arena.insert_unique(self.root, node, &self.comparator) {
            Placement::Attached { root } => {
                self.root = Some(root);
                self.len += 1;
                true
            }
            Placement::Rejected { .. } => {
                drop(self.arena.destroy_node(node));
                tracing::trace!(len = self.len, "rejected duplicate key");
                false
            }
        }
    }

    pub(crate) fn insert_replace(&mut self, value: T) -> Option<T> {
        let node = self.arena.create_node(value);
        let replacement = self.arena.insert_replace(self.root, node, &self.comparator);
        self.root = Some(replacement.root);
        match replacement.replaced {
            Some(replaced) => {
                tracing::trace!(len = self.len, "replaced element with equal key");
                Some(self.arena.destroy_node(replaced))
            }
            None => {
                self.len += 1;
                None
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), TreeError> {
        let outcome = self
            .arena
            .validate(self.root, &self.comparator)
            .map_err(TreeError::from)
            .and_then(|reachable| {
                if reachable == self.len {
                    Ok(())
                } else {
                    Err(TreeError::SizeMismatch {
                        recorded: self.len,
                        reachable,
                    })
                }
            });
        if let Err(error) = &outcome {
            tracing::debug!(%error, len = self.len, "tree validation failed");
        }
        outcome
    }
}

// =============================================================================
// Cloning
// =============================================================================

impl<T: Clone, C: Clone> Clone for RawTree<T, C> {
    fn clone(&self) -> Self {
        let mut arena = NodeArena::with_capacity(self.len);
        let root = arena.clone_tree(&self.arena, self.root);
        Self {
            arena,
            root,
            len: self.len,
            comparator: self.comparator.clone(),
        }
    }

    /// Rewrites `self` into a copy of `source`, reusing every node whose
    /// position exists in both trees.
    fn clone_from(&mut self, source: &Self) {
        let before = self.arena.stats();
        let previous_len = self.len;
        self.root = self.arena.reconcile(self.root, &source.arena, source.root);
        self.len = source.len;
        self.comparator.clone_from(&source.comparator);

        let after = self.arena.stats();
        tracing::debug!(
            previous_len,
            len = self.len,
            allocated = after.allocated - before.allocated,
            released = after.released - before.released,
            "reconciled tree"
        );
    }
}

// =============================================================================
// Structure
// =============================================================================

/// Renders the shape of a tree in pre-order, one node per line, each line
/// prefixed by one `"| "` per level of depth.
///
/// ```text
/// {
/// |>5
/// | |>3
/// | |>8
/// }
/// ```
pub struct Structure<'a, T> {
    arena: &'a NodeArena<T>,
    root: Option<NodeId>,
}

impl<T: fmt::Debug> fmt::Display for Structure<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;

        let mut outcome = Ok(());
        self.arena.visit_df(self.root, |_, node, depth| {
            if outcome.is_ok() {
                outcome = write_line(formatter, depth, node.value());
            }
        });
        outcome?;

        formatter.write_str("\n}")
    }
}

fn write_line<T: fmt::Debug>(formatter: &mut fmt::Formatter<'_>, depth: usize, value: &T) -> fmt::Result {
    formatter.write_str("\n")?;
    for _ in 0..depth {
        formatter.write_str("| ")?;
    }
    write!(formatter, "|>{value:?}")
}

impl<T: fmt::Debug> fmt::Debug for Structure<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}
