#![cfg(feature = "serde")]
//! Serialization tests for the containers.

use rstest::rstest;
use threadtree::containers::{SortedSet, SortedTree};

#[rstest]
fn test_tree_roundtrip_keeps_duplicates() {
    let tree: SortedTree<i32> = [3, 1, 2, 3].into_iter().collect();
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, "[1,2,3,3]");

    let restored: SortedTree<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);
    assert!(restored.validate().is_ok());
}

#[rstest]
fn test_empty_containers_serialize_as_empty_sequence() {
    let tree: SortedTree<i32> = SortedTree::new();
    assert_eq!(serde_json::to_string(&tree).unwrap(), "[]");
    let set: SortedSet<String> = serde_json::from_str("[]").unwrap();
    assert!(set.is_empty());
}

#[rstest]
fn test_set_from_unsorted_sequence() {
    let set: SortedSet<String> = serde_json::from_str(r#"["pear", "apple", "pear", "fig"]"#).unwrap();
    assert_eq!(serde_json::to_string(&set).unwrap(), r#"["apple","fig","pear"]"#);
}

#[rstest]
fn test_non_sequence_is_rejected() {
    let result: Result<SortedTree<i32>, _> = serde_json::from_str(r#"{"a": 1}"#);
    assert!(result.is_err());
}
