//! Owned set containers.
//!
//! This module provides two containers built from scratch on single-owner
//! node graphs:
//!
//! - [`AvlSet`]: AVL tree with optional balancing
//! - [`ChainedHashSet`]: separately-chained hash table with doubling growth
//!
//! # Ownership
//!
//! Every node is owned by exactly one slot: a tree node by its parent's
//! `left`/`right` edge or by the root, a chain entry by the previous entry
//! or by its bucket head. Cloning deep-copies the whole graph, so clones
//! never observe each other's insertions.
//!
//! # Examples
//!
//! ## `AvlSet`
//!
//! ```rust
//! # #[cfg(feature = "tree")] {
//! use setkit::collections::AvlSet;
//! use setkit::set::Set;
//!
//! let mut set = AvlSet::new();
//! for value in 1..=7 {
//!     set.add(value);
//! }
//! assert_eq!(set.height(), 2);
//!
//! let mut visited = Vec::new();
//! set.preorder(|value| visited.push(*value));
//! assert_eq!(visited, vec![4, 2, 1, 3, 6, 5, 7]);
//!
//! // Without balancing, ascending input degenerates into a chain
//! let mut chain = AvlSet::with_balance(false);
//! chain.add_all(1..=7);
//! assert_eq!(chain.height(), 6);
//! # }
//! ```
//!
//! ## `ChainedHashSet`
//!
//! ```rust
//! # #[cfg(feature = "hash")] {
//! use setkit::collections::{ChainedHashSet, HashFunction};
//! use setkit::set::Set;
//!
//! let mut set = ChainedHashSet::new(HashFunction::new(|value: &u32| u64::from(*value)));
//! for value in 0..9 {
//!     set.add(value);
//! }
//! // Reaching a load factor of 0.8 doubled the table
//! assert_eq!(set.capacity(), 20);
//! assert_eq!(set.elements_at_index(3), 1);
//! # }
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type used to share hash functions
/// between a set and its clones.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(all(feature = "hash", feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(all(feature = "hash", not(feature = "arc")))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

#[cfg(feature = "tree")]
mod avl;
#[cfg(feature = "hash")]
mod chained;
#[cfg(feature = "hash")]
mod hash_function;

#[cfg(feature = "tree")]
pub use avl::AvlSet;
#[cfg(feature = "tree")]
pub use avl::AvlSetIterator;
#[cfg(feature = "hash")]
pub use chained::ChainedHashSet;
#[cfg(feature = "hash")]
pub use chained::ChainedHashSetIterator;
#[cfg(feature = "hash")]
pub use hash_function::HashFunction;

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, feature = "hash"))]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
