#![cfg(feature = "containers")]
//! Unit tests for SortedTree.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::rc::Rc;

use rstest::rstest;
use threadtree::compare::CompareFn;
use threadtree::containers::SortedTree;
use threadtree::error::TreeError;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_tree() {
    let tree: SortedTree<i32> = SortedTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.height(), 0);
    assert!(tree.validate().is_ok());
}

#[rstest]
fn test_default_and_with_capacity_are_empty() {
    let tree: SortedTree<i32> = SortedTree::default();
    assert!(tree.is_empty());
    let tree: SortedTree<i32> = SortedTree::with_capacity(64);
    assert!(tree.is_empty());
}

#[rstest]
fn test_collect_from_iterator() {
    let tree: SortedTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
    assert!(tree.validate().is_ok());
}

// =============================================================================
// Insertion and Lookup
// =============================================================================

#[rstest]
fn test_insert_keeps_duplicates() {
    let mut tree = SortedTree::new();
    tree.extend([2, 2, 2]);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.count(&2), 3);
    assert!(tree.validate().is_ok());
}

#[rstest]
fn test_duplicates_keep_insertion_order() {
    let by_key = CompareFn(|left: &(i32, char), right: &(i32, char)| left.0.cmp(&right.0));
    let mut tree = SortedTree::with_comparator(by_key);
    tree.extend([(1, 'a'), (0, 'x'), (1, 'b'), (1, 'c')]);
    let tags: Vec<char> = tree.iter().map(|entry| entry.1).collect();
    assert_eq!(tags, vec!['x', 'a', 'b', 'c']);
}

#[rstest]
#[case(4, true)]
#[case(6, false)]
fn test_contains(#[case] key: i32, #[case] expected: bool) {
    let tree: SortedTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert_eq!(tree.contains(&key), expected);
    assert_eq!(tree.get(&key).is_some(), expected);
}

#[rstest]
fn test_get_with_borrowed_key() {
    let tree: SortedTree<String> = ["pear", "fig", "apple"].iter().map(|word| word.to_string()).collect();
    assert_eq!(tree.get("fig").map(String::as_str), Some("fig"));
    assert!(!tree.contains("plum"));
}

#[rstest]
#[case(0, Some(1))]
#[case(4, Some(5))]
#[case(5, Some(7))]
#[case(9, None)]
fn test_upper_bound(#[case] key: i32, #[case] expected: Option<i32>) {
    let tree: SortedTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert_eq!(tree.upper_bound(&key).copied(), expected);
}

#[rstest]
fn test_upper_bound_skips_every_duplicate() {
    let tree: SortedTree<i32> = [1, 2, 2, 2, 2, 3].into_iter().collect();
    assert_eq!(tree.upper_bound(&2), Some(&3));
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
fn test_remove_existing_key() {
    let mut tree: SortedTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert_eq!(tree.remove(&4), Ok(4));
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 8, 9]);
    assert!(tree.validate().is_ok());
}

#[rstest]
fn test_remove_missing_key_is_an_error() {
    let mut tree: SortedTree<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(tree.remove(&10), Err(TreeError::KeyNotFound));
    assert_eq!(tree.len(), 3);
}

#[rstest]
fn test_remove_takes_one_duplicate_at_a_time() {
    let mut tree: SortedTree<i32> = [7, 7, 7].into_iter().collect();
    assert_eq!(tree.remove(&7), Ok(7));
    assert_eq!(tree.count(&7), 2);
    assert_eq!(tree.discard(&7), Some(7));
    assert_eq!(tree.discard(&7), Some(7));
    assert_eq!(tree.discard(&7), None);
    assert!(tree.is_empty());
}

#[rstest]
fn test_pop_first_and_last() {
    let mut tree: SortedTree<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(tree.pop_first(), Some(1));
    assert_eq!(tree.pop_last(), Some(3));
    assert_eq!(tree.pop_last(), Some(2));
    assert_eq!(tree.pop_first(), None);
}

#[rstest]
fn test_clear_releases_payloads() {
    let payload = Rc::new(1);
    let mut tree = SortedTree::new();
    for _ in 0..10 {
        tree.insert(Rc::clone(&payload));
    }
    assert_eq!(Rc::strong_count(&payload), 11);

    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(Rc::strong_count(&payload), 1);
    tree.insert(Rc::clone(&payload));
    assert_eq!(tree.len(), 1);
}

// =============================================================================
// Cloning
// =============================================================================

#[rstest]
fn test_clone_is_independent() {
    let original: SortedTree<i32> = (0..20).collect();
    let mut copy = original.clone();
    copy.insert(100);
    copy.discard(&0);

    assert_eq!(original.len(), 20);
    assert_eq!(original.first(), Some(&0));
    assert_eq!(copy.last(), Some(&100));
    assert!(copy.validate().is_ok());
}

#[rstest]
fn test_clone_from_rewrites_in_place() {
    let source: SortedTree<i32> = (100..150).collect();
    let mut target: SortedTree<i32> = (0..10).collect();

    target.clone_from(&source);

    assert_eq!(target, source);
    assert_eq!(target.len(), 50);
    assert!(target.validate().is_ok());

    target.clone_from(&SortedTree::new());
    assert!(target.is_empty());
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_into_iter_yields_owned_values_in_order() {
    let tree: SortedTree<String> = ["c", "a", "b"].iter().map(|word| word.to_string()).collect();
    let values: Vec<String> = tree.into_iter().collect();
    assert_eq!(values, vec!["a", "b", "c"]);
}

#[rstest]
fn test_into_iter_from_both_ends() {
    let tree: SortedTree<i32> = (1..=5).collect();
    let mut iter = tree.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3, 4]);
}

#[rstest]
fn test_partially_consumed_into_iter_releases_rest() {
    let payload = Rc::new(0);
    let tree: SortedTree<Rc<i32>> = (0..4).map(|_| Rc::clone(&payload)).collect();
    let mut iter = tree.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(Rc::strong_count(&payload), 1);
}

#[rstest]
fn test_for_loop_over_reference() {
    let tree: SortedTree<i32> = [2, 1].into_iter().collect();
    let mut sum = 0;
    for value in &tree {
        sum += value;
    }
    assert_eq!(sum, 3);
}

// =============================================================================
// Formatting, Equality and Hashing
// =============================================================================

#[rstest]
fn test_display_and_debug() {
    let tree: SortedTree<i32> = [3, 1, 2, 1].into_iter().collect();
    assert_eq!(tree.to_string(), "{1, 1, 2, 3}");
    assert_eq!(format!("{tree:?}"), "[1, 1, 2, 3]");
    assert_eq!(SortedTree::<i32>::new().to_string(), "{}");
}

#[rstest]
fn test_structure_renders_pre_order_with_depth() {
    let tree: SortedTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    let expected = "{\n|>5\n| |>3\n| | |>1\n| | |>4\n| |>8\n| | |>7\n| | |>9\n}";
    assert_eq!(tree.structure().to_string(), expected);
}

#[rstest]
fn test_equality_ignores_insertion_history() {
    let left: SortedTree<i32> = [1, 2, 3, 4].into_iter().collect();
    let right: SortedTree<i32> = [4, 3, 2, 1].into_iter().collect();
    assert_eq!(left, right);
    assert_eq!(hash_of(&left), hash_of(&right));

    let different: SortedTree<i32> = [1, 2, 3].into_iter().collect();
    assert_ne!(left, different);
}

// =============================================================================
// Validation
// =============================================================================

#[rstest]
fn test_validate_reports_inconsistent_comparator() {
    use std::cell::Cell;

    // Orders ascending while `flip` is false and descending afterwards.
    let flip = Rc::new(Cell::new(false));
    let flag = Rc::clone(&flip);
    let comparator = CompareFn(move |left: &i32, right: &i32| {
        if flag.get() { right.cmp(left) } else { left.cmp(right) }
    });
    let mut tree = SortedTree::with_comparator(comparator);
    tree.extend([1, 2, 3]);
    assert!(tree.validate().is_ok());

    flip.set(true);

    assert_eq!(tree.validate(), Err(TreeError::InvalidOrdering { position: 0 }));
}

#[rstest]
fn test_operations_emit_events_under_a_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("trace")
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let source: SortedTree<i32> = (0..8).collect();
        let mut target: SortedTree<i32> = (0..3).collect();
        target.clone_from(&source);
        target.clear();
        assert!(target.is_empty());
    });
}
