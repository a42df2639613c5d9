//! # threadtree
//!
//! A red-black tree whose nodes are also threaded, in key order, into a
//! doubly-linked list, and the sorted containers built on it.
//!
//! ## Overview
//!
//! - **Engine**: arena-backed nodes, three insertion policies
//!   (allow-duplicates, unique, replace), removal, deep cloning,
//!   structure-reusing reconciliation, traversals and an invariant checker
//! - **Comparison**: every ordering decision goes through a caller-supplied
//!   [`Compare`](compare::Compare) value
//! - **Containers**: [`SortedTree`](containers::SortedTree) (multi-valued)
//!   and [`SortedSet`](containers::SortedSet) (unique keys)
//!
//! Thanks to the thread, finding the successor or predecessor of a node and
//! stepping an ordered iterator are O(1).
//!
//! ## Feature Flags
//!
//! - `containers` (default): `SortedTree` and `SortedSet`
//! - `serde`: `Serialize` and `Deserialize` for both containers
//!
//! ## Example
//!
//! ```rust
//! use threadtree::prelude::*;
//!
//! let mut tree = SortedTree::new();
//! tree.extend([5, 3, 8, 1, 4, 7, 9]);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert!(tree.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use threadtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Compare, CompareFn, NaturalOrder};
    pub use crate::error::TreeError;

    #[cfg(feature = "containers")]
    pub use crate::containers::{SortedSet, SortedTree};
}

pub mod compare;
pub mod engine;
pub mod error;

#[cfg(feature = "containers")]
pub mod containers;
