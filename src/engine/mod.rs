//! The threaded red-black tree engine.
//!
//! Nodes live in a [`NodeArena`] and are addressed by [`NodeId`] handles.
//! Besides the usual parent and child links, every attached node is also
//! threaded into a doubly-linked list in key order, so that
//! [`successor`](NodeArena::successor), [`predecessor`](NodeArena::predecessor)
//! and ordered iteration are O(1) per step:
//!
//! - [`NodeArena::insert`]: allow-duplicates insertion, after equal keys
//! - [`NodeArena::insert_unique`]: rejects a node whose key already exists
//! - [`NodeArena::insert_replace`]: supplants an existing equal node in place
//! - [`NodeArena::remove`]: eviction with rebalancing
//! - [`NodeArena::clone_subtree`] and [`NodeArena::reconcile`]: deep copy,
//!   and in-place rewrite reusing the nodes already allocated
//! - [`NodeArena::validate`]: full invariant check
//!
//! # Ownership
//!
//! The engine never destroys a node it did not create. Nodes that leave a
//! tree (rejected, replaced or removed) are handed back detached, and the
//! caller releases the payload with [`NodeArena::destroy_node`].
//!
//! # Examples
//!
//! ```rust
//! use threadtree::compare::NaturalOrder;
//! use threadtree::engine::{NodeArena, Placement};
//!
//! let mut arena = NodeArena::new();
//! let mut root = None;
//! for value in [2, 2, 2] {
//!     let node = arena.create_node(value);
//!     match arena.insert_unique(root, node, &NaturalOrder) {
//!         Placement::Attached { root: new_root } => root = Some(new_root),
//!         Placement::Rejected { .. } => {
//!             arena.destroy_node(node);
//!         }
//!     }
//! }
//! assert_eq!(arena.size(root), 1);
//! assert_eq!(arena.stats().live(), 1);
//! ```

mod arena;
mod copy;
mod insert;
mod linkage;
mod node;
mod rebalance;
mod remove;
mod search;
mod traverse;
mod validate;

pub use arena::{ArenaStats, NodeArena};
pub use insert::{Placement, Replacement};
pub use node::{Color, Direction, Node, NodeId};
pub use remove::Removal;
pub use traverse::Iter;
