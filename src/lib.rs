//! # setkit
//!
//! Owned set containers built from scratch on single-owner node graphs.
//!
//! ## Overview
//!
//! Every container in this crate implements the [`Set`](set::Set)
//! capability: insert-if-absent, membership test and size reporting.
//!
//! - **[`AvlSet`](collections::AvlSet)**: a height-balanced binary search
//!   tree. Balancing can be switched off to observe plain BST behavior.
//! - **[`ChainedHashSet`](collections::ChainedHashSet)**: a separately-chained
//!   hash table that doubles its bucket array when the load factor reaches
//!   0.8. The hash function is supplied by the caller.
//! - **[`WordChecker`](suggest::WordChecker)**: a spelling helper that only
//!   needs `contains` from any [`Set`](set::Set).
//!
//! ## Feature Flags
//!
//! - `tree`: [`AvlSet`](collections::AvlSet)
//! - `hash`: [`ChainedHashSet`](collections::ChainedHashSet) and
//!   [`HashFunction`](collections::HashFunction)
//! - `suggest`: [`WordChecker`](suggest::WordChecker)
//! - `arc`: share hash functions through `Arc` instead of `Rc`
//! - `serde`: `Serialize`/`Deserialize` for both containers
//! - `fxhash` / `ahash`: ready-made hash functions
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(all(feature = "tree", feature = "hash"))] {
//! use setkit::prelude::*;
//!
//! let mut tree = AvlSet::new();
//! tree.add(3);
//! tree.add(1);
//! tree.add(2);
//! assert_eq!(tree.height(), 1);
//!
//! let mut table = ChainedHashSet::new(HashFunction::new(|value: &i32| *value as u64));
//! table.add(42);
//! assert!(table.contains(&42));
//! assert_eq!(table.elements_at_index(2), 1);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the [`Set`](set::Set) capability together with every
/// container enabled by the current feature set.
///
/// # Usage
///
/// ```rust
/// use setkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{SetError, SetResult};
    pub use crate::set::Set;

    #[cfg(any(feature = "tree", feature = "hash"))]
    pub use crate::collections::*;

    #[cfg(feature = "suggest")]
    pub use crate::suggest::*;
}

pub mod error;
pub mod set;

#[cfg(any(feature = "tree", feature = "hash"))]
pub mod collections;

#[cfg(feature = "suggest")]
pub mod suggest;
