//! Sorted containers built on the threaded tree engine.
//!
//! - [`SortedTree`]: keeps every element, duplicates in insertion order
//! - [`SortedSet`]: at most one element per key
//!
//! Both own a private [`NodeArena`](crate::engine::NodeArena), so they are
//! `Send` and `Sync` whenever their elements and comparator are. Iterating
//! borrows the container, which therefore cannot change while an iterator
//! is alive.
//!
//! # Examples
//!
//! ```rust
//! use threadtree::containers::{SortedSet, SortedTree};
//!
//! let tree: SortedTree<i32> = [2, 1, 2].into_iter().collect();
//! let set: SortedSet<i32> = tree.iter().copied().collect();
//!
//! assert_eq!(tree.to_string(), "{1, 2, 2}");
//! assert_eq!(set.to_string(), "{1, 2}");
//! ```

mod iter;
mod raw;
mod set;
mod tree;

#[cfg(feature = "serde")]
mod serialization;

pub use crate::engine::Iter;
pub use iter::IntoIter;
pub use raw::Structure;
pub use set::SortedSet;
pub use tree::SortedTree;
