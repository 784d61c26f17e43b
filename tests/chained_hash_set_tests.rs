#![cfg(feature = "hash")]
//! Unit tests for ChainedHashSet.
//!
//! Bucket placement is checked with an identity hash so every expected
//! bucket index can be read straight off the element.

mod common;

use rstest::{fixture, rstest};
use setkit::collections::{ChainedHashSet, HashFunction};
use setkit::error::SetError;
use setkit::set::Set;

#[fixture]
fn identity() -> ChainedHashSet<u64> {
    common::init_test_logging();
    ChainedHashSet::new(HashFunction::new(common::identity_hash))
}

fn bucket_sizes(set: &ChainedHashSet<u64>) -> Vec<usize> {
    (0..set.capacity())
        .map(|index| set.elements_at_index(index))
        .collect()
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_has_default_capacity(identity: ChainedHashSet<u64>) {
    assert_eq!(identity.capacity(), 10);
    assert_eq!(identity.size(), 0);
    assert!(identity.is_implemented());
    assert!(bucket_sizes(&identity).iter().all(|&count| count == 0));
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(64)]
fn test_with_capacity(#[case] capacity: usize) {
    let set = ChainedHashSet::<u64>::with_capacity(HashFunction::std(), capacity);
    assert_eq!(set.capacity(), capacity);
}

// =============================================================================
// Insertion and membership
// =============================================================================

#[rstest]
fn test_add_and_contains(mut identity: ChainedHashSet<u64>) {
    identity.add_all([3, 13, 4]);
    assert_eq!(identity.size(), 3);
    assert!(identity.contains(&13));
    assert!(!identity.contains(&23));
}

#[rstest]
fn test_duplicate_is_ignored(mut identity: ChainedHashSet<u64>) {
    identity.add(5);
    identity.add(5);
    assert_eq!(identity.size(), 1);
    assert_eq!(identity.elements_at_index(5), 1);
}

#[rstest]
fn test_colliding_elements_share_a_bucket(mut identity: ChainedHashSet<u64>) {
    identity.add_all([2, 12, 22]);
    assert_eq!(identity.elements_at_index(2), 3);
    for value in [2, 12, 22] {
        assert!(identity.is_element_at_index(&value, 2));
        assert!(!identity.is_element_at_index(&value, 3));
    }
}

#[rstest]
fn test_constant_hash_degrades_to_single_chain() {
    let mut set = ChainedHashSet::new(HashFunction::new(|_: &String| 7));
    set.add_all(["A", "B", "C"].map(String::from));
    assert_eq!(set.elements_at_index(7), 3);
    assert!(set.contains(&"B".to_string()));
    assert!(!set.contains(&"D".to_string()));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[rstest]
#[case(10)]
#[case(11)]
#[case(usize::MAX)]
fn test_out_of_range_bucket_queries(mut identity: ChainedHashSet<u64>, #[case] index: usize) {
    identity.add(0);
    assert_eq!(identity.elements_at_index(index), 0);
    assert!(!identity.is_element_at_index(&0, index));
}

#[rstest]
fn test_bucket_counts_sum_to_size(mut identity: ChainedHashSet<u64>) {
    identity.add_all((0..50).map(|value| value * 3));
    assert_eq!(bucket_sizes(&identity).iter().sum::<usize>(), identity.size());
}

// =============================================================================
// Growth
// =============================================================================

#[rstest]
#[case(7, 10)]
#[case(8, 20)]
#[case(9, 20)]
#[case(15, 20)]
#[case(16, 40)]
#[case(100, 160)]
fn test_capacity_after_inserts(
    mut identity: ChainedHashSet<u64>,
    #[case] count: u64,
    #[case] expected_capacity: usize,
) {
    identity.add_all(0..count);
    assert_eq!(identity.capacity(), expected_capacity);
    assert!(identity.load_factor() < 0.8);
}

#[rstest]
fn test_growth_rehashes_into_new_buckets(mut identity: ChainedHashSet<u64>) {
    identity.add_all([1, 11, 2, 3, 4, 5, 6]);
    assert_eq!(identity.elements_at_index(1), 2);

    identity.add(7);
    assert_eq!(identity.capacity(), 20);
    assert_eq!(identity.elements_at_index(1), 1);
    assert!(identity.is_element_at_index(&11, 11));
    for value in [1, 11, 2, 3, 4, 5, 6, 7] {
        assert!(identity.contains(&value));
    }
}

#[rstest]
fn test_try_add_reports_insertion(mut identity: ChainedHashSet<u64>) {
    assert_eq!(identity.try_add(4), Ok(true));
    assert_eq!(identity.try_add(4), Ok(false));
    for value in 10..30 {
        assert_eq!(identity.try_add(value), Ok(true));
    }
    assert_eq!(identity.size(), 21);
    assert_eq!(identity.capacity(), 40);
}

#[rstest]
fn test_error_messages() {
    let overflow = SetError::CapacityOverflow {
        current_capacity: 3,
    };
    assert!(overflow.to_string().contains('3'));
}

// =============================================================================
// Copy and move
// =============================================================================

#[rstest]
fn test_clone_keeps_layout_and_hash(mut identity: ChainedHashSet<u64>) {
    identity.add_all([0, 10, 20, 5]);
    let mut copy = identity.clone();
    assert_eq!(bucket_sizes(&copy), bucket_sizes(&identity));
    assert_eq!(copy.capacity(), identity.capacity());

    copy.add(30);
    assert!(copy.is_element_at_index(&30, 0));
    assert!(!identity.contains(&30));
    assert_eq!(identity.size(), 4);

    identity.add(40);
    assert!(!copy.contains(&40));
    assert_eq!(copy.size(), 5);
    assert_eq!(identity.size(), 5);
}

#[rstest]
fn test_clone_shares_hash_function(mut identity: ChainedHashSet<u64>) {
    identity.add(7);
    let copy = identity.clone();
    for value in [0, 7, 13, u64::MAX] {
        assert_eq!(copy.hash_function().hash(&value), value);
        assert_eq!(
            copy.hash_function().hash(&value),
            identity.hash_function().hash(&value)
        );
    }
}

#[rstest]
fn test_clone_from_replaces_contents(mut identity: ChainedHashSet<u64>) {
    identity.add_all(0..12);
    let mut target = ChainedHashSet::new(HashFunction::new(common::identity_hash));
    target.add(99);
    target.clone_from(&identity);
    assert!(!target.contains(&99));
    assert_eq!(target, identity);
    assert_eq!(target.capacity(), 20);
}

#[rstest]
fn test_take_leaves_default_table(mut identity: ChainedHashSet<u64>) {
    identity.add_all(0..30);
    let moved = identity.take();
    assert_eq!(moved.size(), 30);
    assert_eq!(moved.capacity(), 40);

    assert_eq!(identity.size(), 0);
    assert_eq!(identity.capacity(), 10);
    identity.add(13);
    assert!(identity.is_element_at_index(&13, 3));
}

#[rstest]
fn test_move_preserves_contents(mut identity: ChainedHashSet<u64>) {
    identity.add_all([1, 2, 3]);
    let moved = identity;
    assert_eq!(moved.size(), 3);
    assert!(moved.is_element_at_index(&2, 2));
}

// =============================================================================
// Iteration and equality
// =============================================================================

#[rstest]
fn test_iter_visits_bucket_order(mut identity: ChainedHashSet<u64>) {
    identity.add_all([3, 1, 2]);
    let visited: Vec<u64> = identity.iter().copied().collect();
    assert_eq!(visited, vec![1, 2, 3]);
    assert_eq!(identity.iter().len(), 3);
}

#[rstest]
fn test_equality_ignores_layout() {
    let mut small = ChainedHashSet::with_capacity(HashFunction::new(common::identity_hash), 4);
    let mut large = ChainedHashSet::with_capacity(HashFunction::new(common::identity_hash), 64);
    small.add_all([1, 2]);
    large.add_all([2, 1]);
    assert_eq!(small, large);
    large.add(3);
    assert_ne!(small, large);
}
