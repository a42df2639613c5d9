//! Slab-backed node storage and cheap navigation.

use slab::Slab;

use super::node::{Color, Direction, Node, NodeId};

/// Cumulative allocation counters of a [`NodeArena`].
///
/// `allocated` counts every call to [`NodeArena::create_node`] (including
/// nodes produced by cloning), `released` counts every destroyed node.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ArenaStats {
    /// Nodes created since the arena was built.
    pub allocated: u64,
    /// Nodes destroyed since the arena was built.
    pub released: u64,
}

impl ArenaStats {
    /// Number of nodes currently alive.
    #[inline]
    #[must_use]
    pub const fn live(&self) -> u64 {
        self.allocated - self.released
    }
}

/// Storage for the nodes of one or more trees.
///
/// Every engine operation is a method on the arena. Trees are identified by
/// their root handle only, so mutating operations take the old root and
/// return the new one.
///
/// # Examples
///
/// ```rust
/// use threadtree::compare::NaturalOrder;
/// use threadtree::engine::NodeArena;
///
/// let mut arena = NodeArena::new();
/// let mut root = None;
/// for value in [5, 3, 8] {
///     let node = arena.create_node(value);
///     root = Some(arena.insert(root, node, &NaturalOrder));
/// }
/// let values: Vec<&i32> = arena.iter(root).collect();
/// assert_eq!(values, vec![&3, &5, &8]);
/// ```
pub struct NodeArena<T> {
    pub(crate) slots: Slab<Node<T>>,
    stats: ArenaStats,
}

impl<T> NodeArena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Slab::new(),
            stats: ArenaStats::default(),
        }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Slab::with_capacity(capacity),
            stats: ArenaStats::default(),
        }
    }

    /// Number of live nodes, attached or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no node is alive.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the allocation counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// Creates a detached red node owning `value`.
    ///
    /// # Complexity
    ///
    /// O(1) amortized.
    pub fn create_node(&mut self, value: T) -> NodeId {
        let id = NodeId(self.slots.insert(Node::detached(value)));
        self.stats.allocated += 1;
        id
    }

    /// Destroys a node and hands its payload back.
    ///
    /// The node must be detached, or part of a subtree that is being torn
    /// down as a whole.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live node of this arena.
    pub fn destroy_node(&mut self, id: NodeId) -> T {
        let node = self.slots.remove(id.0);
        self.stats.released += 1;
        node.value
    }

    /// Returns the node behind a handle, or `None` for a stale handle.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0)
    }

    /// Returns the node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live node of this arena.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.slots[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.slots[id.0]
    }

    /// Returns the payload of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live node of this arena.
    #[inline]
    #[must_use]
    pub fn value(&self, id: NodeId) -> &T {
        &self.slots[id.0].value
    }

    // =========================================================================
    // Link Accessors
    // =========================================================================

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.slots[id.0].children[direction.index()]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, id: NodeId, direction: Direction, child: Option<NodeId>) {
        self.slots[id.0].children[direction.index()] = child;
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.slots[id.0].parent = parent;
    }

    #[inline]
    pub(crate) fn neighbour(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.slots[id.0].thread[direction.index()]
    }

    #[inline]
    pub(crate) fn set_neighbour(
        &mut self,
        id: NodeId,
        direction: Direction,
        neighbour: Option<NodeId>,
    ) {
        self.slots[id.0].thread[direction.index()] = neighbour;
    }

    #[inline]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.slots[id.0].color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.slots[id.0].color = color;
    }

    /// Absent nodes count as black.
    #[inline]
    pub(crate) fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.color(id) == Color::Red)
    }

    #[inline]
    pub(crate) fn is_black(&self, id: Option<NodeId>) -> bool {
        !self.is_red(id)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Returns the root of the tree `id` belongs to.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn root_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    /// Returns the outermost node of a subtree on the given side.
    #[must_use]
    pub fn extreme(&self, mut id: NodeId, direction: Direction) -> NodeId {
        while let Some(child) = self.child(id, direction) {
            id = child;
        }
        id
    }

    /// Returns the leftmost (smallest) node of a subtree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[inline]
    #[must_use]
    pub fn min(&self, root: NodeId) -> NodeId {
        self.extreme(root, Direction::Left)
    }

    /// Returns the rightmost (largest) node of a subtree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[inline]
    #[must_use]
    pub fn max(&self, root: NodeId) -> NodeId {
        self.extreme(root, Direction::Right)
    }

    /// Returns the in-order successor in O(1).
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Direction::Right)
    }

    /// Returns the in-order predecessor in O(1).
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Direction::Left)
    }

    /// Counts the nodes reachable from `root` by structural links.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn size(&self, root: Option<NodeId>) -> usize {
        root.map_or(0, |id| {
            1 + self.size(self.child(id, Direction::Left))
                + self.size(self.child(id, Direction::Right))
        })
    }

    /// Number of levels below and including `root`.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self, root: Option<NodeId>) -> usize {
        let mut height = 0;
        self.visit_bf(root, |_, _, depth| height = height.max(depth + 1));
        height
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for NodeArena<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NodeArena")
            .field("len", &self.slots.len())
            .field("stats", &self.stats)
            .finish()
    }
}
