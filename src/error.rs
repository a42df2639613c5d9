//! Error types.
//!
//! The engine itself only reports outcomes ("rejected", "not found") as
//! ordinary return values. These types cover the container surface and the
//! invariant checker.

use thiserror::Error;

use crate::engine::NodeId;

/// A broken red-black, structural or thread invariant.
///
/// Produced by [`NodeArena::validate`](crate::engine::NodeArena::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The root node is red.
    #[error("root {node} is red")]
    RedRoot {
        /// The offending root.
        node: NodeId,
    },

    /// The root node has a parent link.
    #[error("root {node} has a parent")]
    RootHasParent {
        /// The offending root.
        node: NodeId,
    },

    /// A child does not point back at its parent.
    #[error("child {child} of {parent} does not point back at it")]
    BrokenParentLink {
        /// The parent whose child slot was followed.
        parent: NodeId,
        /// The child with the wrong parent link.
        child: NodeId,
    },

    /// A red node has a red parent.
    #[error("red node {node} has a red parent")]
    RedRedEdge {
        /// The red child.
        node: NodeId,
    },

    /// Two paths below a node cross different numbers of black nodes.
    #[error("black height differs below {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        /// The node whose subtrees disagree.
        node: NodeId,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// `next(prev(n)) != n` or `prev(next(n)) != n`.
    #[error("thread link around {node} is not symmetric")]
    BrokenThreadLink {
        /// The node whose neighbour does not point back.
        node: NodeId,
    },

    /// The thread disagrees with the in-order sequence.
    #[error("thread diverges from in-order sequence at position {position}")]
    ThreadMismatch {
        /// Zero-based position of the first disagreement.
        position: usize,
    },

    /// Two consecutive elements are out of order under the comparator.
    #[error("elements at positions {position} and {} are out of order", .position + 1)]
    Unordered {
        /// Zero-based position of the first element of the pair.
        position: usize,
    },
}

/// Errors reported by the containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No element compares equal to the requested key.
    #[error("key not found")]
    KeyNotFound,

    /// The recorded element count disagrees with the reachable nodes.
    #[error("recorded size {recorded} but {reachable} nodes are reachable")]
    SizeMismatch {
        /// The count the container keeps.
        recorded: usize,
        /// The count obtained by walking the tree.
        reachable: usize,
    },

    /// The comparator is not a consistent total order for the stored data.
    #[error("comparator is inconsistent at position {position}")]
    InvalidOrdering {
        /// Zero-based position of the first out-of-order element.
        position: usize,
    },

    /// A structural invariant is broken.
    #[error(transparent)]
    Invariant(InvariantViolation),
}

impl From<InvariantViolation> for TreeError {
    fn from(violation: InvariantViolation) -> Self {
        match violation {
            InvariantViolation::Unordered { position } => Self::InvalidOrdering { position },
            other => Self::Invariant(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_display_messages() {
        assert_eq!(TreeError::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            TreeError::SizeMismatch {
                recorded: 3,
                reachable: 2
            }
            .to_string(),
            "recorded size 3 but 2 nodes are reachable"
        );
        assert_eq!(
            InvariantViolation::Unordered { position: 4 }.to_string(),
            "elements at positions 4 and 5 are out of order"
        );
        assert_eq!(
            InvariantViolation::RedRoot { node: NodeId(0) }.to_string(),
            "root #0 is red"
        );
    }

    #[rstest]
    fn test_unordered_maps_to_invalid_ordering() {
        let error: TreeError = InvariantViolation::Unordered { position: 2 }.into();
        assert_eq!(error, TreeError::InvalidOrdering { position: 2 });
    }

    #[rstest]
    fn test_structural_violation_is_wrapped() {
        let violation = InvariantViolation::RedRedEdge { node: NodeId(3) };
        let error: TreeError = violation.clone().into();
        assert_eq!(error, TreeError::Invariant(violation));
        assert_eq!(error.to_string(), "red node #3 has a red parent");
    }
}
