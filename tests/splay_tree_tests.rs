//! Unit tests for SplayTree.
//!
//! Covers construction, upsert semantics, snapshot independence, splaying
//! side effects and traversal.

use persistent_splay::persistent::{InvariantViolation, NaturalOrder, SplayTree};
use rstest::rstest;
use std::cell::Cell;
use std::cmp::Ordering;

/// A declaration-like value: ordered by `name`, carrying a `payload`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Declaration {
    name: &'static str,
    payload: u32,
}

fn declaration(name: &'static str, payload: u32) -> Declaration {
    Declaration { name, payload }
}

fn by_name(left: &Declaration, right: &Declaration) -> Ordering {
    left.name.cmp(right.name)
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_tree() {
    let tree: SplayTree<i32> = SplayTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.to_vec(), Vec::<i32>::new());
}

#[rstest]
fn test_default_creates_empty_tree() {
    let tree: SplayTree<i32, NaturalOrder> = SplayTree::default();
    assert!(tree.is_empty());
}

#[rstest]
fn test_with_comparator_orders_by_comparator() {
    let mut tree = SplayTree::with_comparator(|left: &i32, right: &i32| right.cmp(left));
    tree.extend([1, 3, 2]);
    assert_eq!(tree.to_vec(), vec![3, 2, 1]);
    assert_eq!(tree.check_invariant(), Ok(()));
}

#[rstest]
fn test_from_iterator_deduplicates() {
    let tree: SplayTree<i32> = [4, 1, 4, 2, 1].into_iter().collect();
    assert_eq!(tree.to_vec(), vec![1, 2, 4]);
    assert_eq!(tree.len(), 3);
}

// =============================================================================
// Insert and Find Tests
// =============================================================================

#[rstest]
fn test_scenario_upsert_erase_and_snapshot() {
    let mut tree = SplayTree::with_comparator(by_name);
    tree.insert(declaration("c", 3));
    tree.insert(declaration("a", 1));
    tree.insert(declaration("d", 4));
    tree.insert(declaration("a", 10));

    assert_eq!(
        tree.to_vec(),
        vec![
            declaration("a", 10),
            declaration("c", 3),
            declaration("d", 4)
        ]
    );
    assert_eq!(tree.len(), 3);

    let snapshot = tree.clone();
    assert!(tree.erase(&declaration("c", 0)));

    assert_eq!(
        tree.to_vec(),
        vec![declaration("a", 10), declaration("d", 4)]
    );
    assert_eq!(
        snapshot.to_vec(),
        vec![
            declaration("a", 10),
            declaration("c", 3),
            declaration("d", 4)
        ]
    );
}

#[rstest]
#[case(1)]
#[case(50)]
#[case(99)]
fn test_insert_then_find(#[case] value: i32) {
    let mut tree: SplayTree<i32> = (0..100).filter(|item| *item != value).collect();
    assert!(!tree.contains(&value));
    tree.insert(value);
    assert!(tree.contains(&value));
    assert_eq!(tree.find(&value), Some(&value));
    assert_eq!(tree.root(), Some(&value));
}

#[rstest]
fn test_find_returns_stored_value_not_probe() {
    let mut tree = SplayTree::with_comparator(by_name);
    tree.insert(declaration("x", 7));
    assert_eq!(tree.find(&declaration("x", 0)), Some(&declaration("x", 7)));
}

#[rstest]
fn test_find_by_partial_key() {
    let mut tree = SplayTree::with_comparator(by_name);
    tree.extend([declaration("x", 1), declaration("y", 2)]);
    let found = tree.find_by(|stored| "y".cmp(stored.name));
    assert_eq!(found.map(|item| item.payload), Some(2));
    assert_eq!(tree.find_by(|stored| "z".cmp(stored.name)), None);
}

#[rstest]
fn test_upsert_keeps_size() {
    let mut tree = SplayTree::with_comparator(by_name);
    assert!(!tree.insert(declaration("k", 1)));
    assert!(tree.insert(declaration("k", 2)));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.find(&declaration("k", 0)).map(|item| item.payload), Some(2));
}

// =============================================================================
// Erase Tests
// =============================================================================

#[rstest]
fn test_erase_every_value() {
    let mut tree: SplayTree<i32> = (0..64).map(|value| (value * 37) % 64).collect();
    for value in 0..64 {
        assert!(tree.erase(&value));
        assert!(!tree.contains(&value));
        assert_eq!(tree.check_invariant(), Ok(()));
    }
    assert!(tree.is_empty());
}

#[rstest]
fn test_erase_missing_is_noop_on_content() {
    let mut tree: SplayTree<i32> = [10, 20, 30].into_iter().collect();
    assert!(!tree.erase(&25));
    assert_eq!(tree.to_vec(), vec![10, 20, 30]);
}

#[rstest]
fn test_erase_on_empty_tree() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    assert!(!tree.erase(&1));
    assert!(tree.is_empty());
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[rstest]
fn test_clone_is_independent_both_ways() {
    let mut first: SplayTree<i32> = (0..32).collect();
    let mut second = first.clone();

    first.insert(100);
    second.erase(&0);
    second.insert(-1);

    assert_eq!(first.len(), 33);
    assert!(first.contains(&0));
    assert!(!first.contains(&-1));
    assert_eq!(second.len(), 32);
    assert!(!second.contains(&0));
    assert!(!second.contains(&100));
}

#[rstest]
fn test_many_snapshots_of_one_tree() {
    let base: SplayTree<i32> = (0..16).collect();
    let snapshots: Vec<SplayTree<i32>> = (0..16)
        .map(|value| {
            let mut snapshot = base.clone();
            snapshot.erase(&value);
            snapshot
        })
        .collect();

    assert_eq!(base.len(), 16);
    for (value, snapshot) in (0..16).zip(&snapshots) {
        assert_eq!(snapshot.len(), 15);
        assert!(!snapshot.contains(&value));
    }
}

#[rstest]
fn test_find_memoize_on_shared_tree_leaves_other_handle() {
    let base: SplayTree<i32> = (0..10).collect();
    let mut reader = base.clone();
    assert_eq!(reader.find_memoize(&0), Some(&0));
    assert_eq!(reader.root(), Some(&0));
    assert_eq!(base.root(), Some(&9));
    assert_eq!(reader, base);
}

#[rstest]
fn test_ptr_eq_is_identity_not_equality() {
    let tree: SplayTree<i32> = (0..10).collect();
    let mut reshaped = tree.clone();
    reshaped.find_memoize(&5);
    assert!(!tree.ptr_eq(&reshaped));
    assert_eq!(tree, reshaped);

    let empty: SplayTree<i32> = SplayTree::new();
    assert!(empty.ptr_eq(&SplayTree::new()));
}

#[rstest]
fn test_share_counts_in_structure_dump() {
    let mut tree = SplayTree::new();
    tree.insert(2);
    tree.insert(1);
    tree.insert(3);
    // inserting 3 zig-zigs it over 1 and 2
    assert_eq!(tree.structure().to_string(), "(3:1 (2:1 1:1 ()) ())");

    let copy = tree.clone();
    assert_eq!(copy.structure().to_string(), "(3:2 (2:1 1:1 ()) ())");
}

// =============================================================================
// Traversal Tests
// =============================================================================

#[rstest]
fn test_fold_counts_like_len() {
    let tree: SplayTree<i32> = (0..25).collect();
    assert_eq!(tree.fold(0usize, |count, _| count + 1), tree.len());
}

#[rstest]
fn test_for_each_visits_ascending() {
    let tree: SplayTree<i32> = [9, 2, 7, 4].into_iter().collect();
    let mut visited = Vec::new();
    tree.for_each(|value| visited.push(*value));
    assert_eq!(visited, vec![2, 4, 7, 9]);
}

#[rstest]
fn test_to_vec_is_restartable() {
    let tree: SplayTree<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(tree.to_vec(), tree.to_vec());
    let borrowed: Vec<&i32> = (&tree).into_iter().collect();
    assert_eq!(borrowed, vec![&1, &2, &3]);
    let owned: Vec<i32> = tree.into_iter().collect();
    assert_eq!(owned, vec![1, 2, 3]);
}

#[rstest]
fn test_first_last_do_not_reshape() {
    let tree: SplayTree<i32> = [5, 3, 8].into_iter().collect();
    let copy = tree.clone();
    assert_eq!(tree.first(), Some(&3));
    assert_eq!(tree.last(), Some(&8));
    assert!(tree.ptr_eq(&copy));
}

// =============================================================================
// Degenerate Shape Tests
// =============================================================================

#[rstest]
fn test_large_list_shaped_tree_drops_and_traverses() {
    // ascending inserts splay each new maximum to the root: a left spine
    let tree: SplayTree<u32> = (0..100_000).collect();
    assert_eq!(tree.len(), 100_000);
    assert_eq!(tree.first(), Some(&0));
    assert!(tree.structure().to_string().len() > 100_000);
    drop(tree);
}

#[rstest]
fn test_splaying_deepest_node_keeps_content() {
    let mut tree: SplayTree<u32> = (0..1_024).collect();
    assert_eq!(tree.find_memoize(&0), Some(&0));
    assert_eq!(tree.check_invariant(), Ok(()));
    assert_eq!(tree.len(), 1_024);
}

// =============================================================================
// Invariant Verifier Tests
// =============================================================================

#[rstest]
fn test_comparator_change_is_reported() {
    let reversed = Cell::new(false);
    let mut tree = SplayTree::with_comparator(|left: &i32, right: &i32| {
        if reversed.get() {
            right.cmp(left)
        } else {
            left.cmp(right)
        }
    });
    tree.extend([1, 2, 3]);
    assert_eq!(tree.check_invariant(), Ok(()));

    reversed.set(true);
    let violation = tree.check_invariant().unwrap_err();
    assert_eq!(violation, InvariantViolation { position: 1 });
    assert_eq!(
        violation.to_string(),
        "splay tree ordering violated: in-order value 1 is not greater than value 0"
    );
}
