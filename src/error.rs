//! Error types for set containers.
//!
//! Almost every set operation is infallible: diagnostic queries with an
//! out-of-range bucket index resolve to a defined default instead of an
//! error. The only reportable failure is growing the bucket array of a
//! [`ChainedHashSet`](crate::collections::ChainedHashSet) through
//! `try_add`.

use thiserror::Error;

/// Errors that a set container can report to its caller.
///
/// # Examples
///
/// ```rust
/// use setkit::error::SetError;
///
/// let error = SetError::AllocationFailed { requested_capacity: 40 };
/// assert_eq!(
///     format!("{error}"),
///     "failed to allocate a bucket array of capacity 40"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// The allocator refused the memory for a new bucket array.
    #[error("failed to allocate a bucket array of capacity {requested_capacity}")]
    AllocationFailed {
        /// Number of buckets that was requested.
        requested_capacity: usize,
    },

    /// Doubling the bucket array would overflow `usize`.
    #[error("bucket capacity {current_capacity} cannot be doubled")]
    CapacityOverflow {
        /// Capacity of the table when growth was attempted.
        current_capacity: usize,
    },
}

/// Result alias for fallible set operations.
pub type SetResult<T> = Result<T, SetError>;
