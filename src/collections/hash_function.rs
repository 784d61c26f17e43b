//! Hash function capability for [`ChainedHashSet`](super::ChainedHashSet).
//!
//! A [`HashFunction`] maps an element to an unsigned integer. The set never
//! decides how elements are hashed; it only reduces the result modulo its
//! bucket capacity. Constructors for a few existing hashers are provided
//! for convenience.

use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};

use super::ReferenceCounter;

#[cfg(feature = "arc")]
type DynamicHash<T> = dyn Fn(&T) -> u64 + Send + Sync;

#[cfg(not(feature = "arc"))]
type DynamicHash<T> = dyn Fn(&T) -> u64;

/// A shareable hash function `(&T) -> u64`.
///
/// Cloning a `HashFunction` is O(1): clones share the same closure, which
/// is how a [`ChainedHashSet`](super::ChainedHashSet) and its copies keep
/// hashing identically.
///
/// # Examples
///
/// ```rust
/// use setkit::collections::HashFunction;
///
/// let length = HashFunction::new(|word: &String| word.len() as u64);
/// assert_eq!(length.hash(&"BOAT".to_string()), 4);
///
/// let shared = length.clone();
/// assert_eq!(shared.hash(&"AT".to_string()), 2);
/// ```
pub struct HashFunction<T> {
    function: ReferenceCounter<DynamicHash<T>>,
}

impl<T> HashFunction<T> {
    /// Wraps a closure as a hash function.
    #[cfg(not(feature = "arc"))]
    #[must_use]
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&T) -> u64 + 'static,
    {
        Self {
            function: ReferenceCounter::new(function),
        }
    }

    /// Wraps a closure as a hash function.
    #[cfg(feature = "arc")]
    #[must_use]
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&T) -> u64 + Send + Sync + 'static,
    {
        Self {
            function: ReferenceCounter::new(function),
        }
    }

    /// Hashes `element`.
    #[inline]
    pub fn hash(&self, element: &T) -> u64 {
        (self.function)(element)
    }
}

impl<T: Hash + 'static> HashFunction<T> {
    /// Hashes through [`std::hash::DefaultHasher`] with its fixed keys, so
    /// results are stable for the lifetime of the process.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::HashFunction;
    ///
    /// let hash_function = HashFunction::std();
    /// assert_eq!(hash_function.hash(&7_u8), hash_function.hash(&7_u8));
    /// ```
    #[must_use]
    pub fn std() -> Self {
        Self::new(|element: &T| BuildHasherDefault::<DefaultHasher>::default().hash_one(element))
    }

    /// Hashes through `rustc_hash::FxHasher`.
    #[cfg(feature = "fxhash")]
    #[must_use]
    pub fn fx() -> Self {
        Self::new(|element: &T| rustc_hash::FxBuildHasher.hash_one(element))
    }

    /// Hashes through `ahash` with fixed seeds.
    #[cfg(feature = "ahash")]
    #[must_use]
    pub fn ahash() -> Self {
        let state = ahash::RandomState::with_seeds(
            0x243F_6A88_85A3_08D3,
            0x1319_8A2E_0370_7344,
            0xA409_3822_299F_31D0,
            0x082E_FA98_EC4E_6C89,
        );
        Self::new(move |element: &T| state.hash_one(element))
    }
}

impl<T: Hash + 'static> Default for HashFunction<T> {
    fn default() -> Self {
        Self::std()
    }
}

impl<T> Clone for HashFunction<T> {
    fn clone(&self) -> Self {
        Self {
            function: ReferenceCounter::clone(&self.function),
        }
    }
}

impl<T> fmt::Debug for HashFunction<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("HashFunction(..)")
    }
}
