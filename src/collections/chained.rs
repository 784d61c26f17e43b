//! Separately-chained hash set.
//!
//! This module provides [`ChainedHashSet`], a hash table whose buckets are
//! singly-linked chains of boxed entries.
//!
//! # Overview
//!
//! An element lives in bucket `hash(element) % capacity`. New entries are
//! prepended to their chain. When an insertion brings the load factor
//! (`len / capacity`) to 0.8 or above, the bucket array doubles and every
//! entry is moved, not copied, into its new bucket.
//!
//! - O(1) expected add and contains with a good hash function
//! - O(N) growth, amortized O(1) per insertion
//! - O(1) len and capacity
//!
//! # Examples
//!
//! ```rust
//! use setkit::collections::{ChainedHashSet, HashFunction};
//! use setkit::set::Set;
//!
//! let mut set = ChainedHashSet::new(HashFunction::new(|word: &String| word.len() as u64));
//! set.add("CAT".to_string());
//! set.add("DOG".to_string());
//! set.add("HORSE".to_string());
//!
//! assert_eq!(set.elements_at_index(3), 2);
//! assert!(set.is_element_at_index(&"HORSE".to_string(), 5));
//! assert!(!set.is_element_at_index(&"HORSE".to_string(), 99));
//! ```

use std::fmt;

use tracing::{debug, warn};

use super::HashFunction;
use crate::error::{SetError, SetResult};
use crate::set::Set;

/// Growth triggers once `len / capacity >= LOAD_NUMERATOR / LOAD_DENOMINATOR`.
const LOAD_NUMERATOR: usize = 4;
const LOAD_DENOMINATOR: usize = 5;

// =============================================================================
// Entry Definition
// =============================================================================

type Chain<T> = Option<Box<Entry<T>>>;

/// One link of a bucket chain.
struct Entry<T> {
    value: T,
    next: Chain<T>,
}

/// Iterates the values of one chain, head first.
fn chain_values<T>(chain: &Chain<T>) -> impl Iterator<Item = &T> {
    std::iter::successors(chain.as_deref(), |entry| entry.next.as_deref())
        .map(|entry| &entry.value)
}

fn chain_contains<T: PartialEq>(chain: &Chain<T>, element: &T) -> bool {
    chain_values(chain).any(|value| value == element)
}

/// Clones a chain iteratively, keeping the order of its entries.
fn clone_chain<T: Clone>(chain: &Chain<T>) -> Chain<T> {
    let values: Vec<&T> = chain_values(chain).collect();
    values.into_iter().rev().fold(None, |next, value| {
        Some(Box::new(Entry {
            value: value.clone(),
            next,
        }))
    })
}

/// Unlinks a chain entry by entry so long chains do not recurse on drop.
fn drop_chain<T>(chain: &mut Chain<T>) {
    let mut current = chain.take();
    while let Some(mut entry) = current {
        current = entry.next.take();
    }
}

/// Allocates `capacity` empty buckets. Aborts if the allocator fails.
fn empty_buckets<T>(capacity: usize) -> Box<[Chain<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Allocates `capacity` empty buckets, reporting allocator failure.
fn try_empty_buckets<T>(capacity: usize) -> SetResult<Box<[Chain<T>]>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| SetError::AllocationFailed {
            requested_capacity: capacity,
        })?;
    buckets.resize_with(capacity, || None);
    Ok(buckets.into_boxed_slice())
}

/// The capacity after one growth step.
const fn grown_capacity(capacity: usize) -> SetResult<usize> {
    match capacity.checked_mul(2) {
        Some(grown) => Ok(grown),
        None => Err(SetError::CapacityOverflow {
            current_capacity: capacity,
        }),
    }
}

// =============================================================================
// ChainedHashSet Definition
// =============================================================================

/// A hash set using separate chaining and a caller-supplied hash function.
///
/// The bucket array starts with [`ChainedHashSet::DEFAULT_CAPACITY`] buckets
/// and doubles whenever an insertion brings the load factor to 0.8. Each
/// bucket owns its chain and the set owns the bucket array.
///
/// [`Clone`] copies every chain in order into a table of the same capacity
/// that shares the hash function. [`ChainedHashSet::take`] moves the table
/// out in O(1) and leaves a valid empty table behind.
///
/// # Time Complexity
///
/// | Operation             | Complexity               |
/// |-----------------------|--------------------------|
/// | `new`                 | O(capacity)              |
/// | `add`                 | O(1) amortized, expected |
/// | `contains`            | O(1) expected            |
/// | `elements_at_index`   | O(chain length)          |
/// | `is_element_at_index` | O(chain length)          |
/// | `len` / `capacity`    | O(1)                     |
///
/// # Examples
///
/// ```rust
/// use setkit::collections::{ChainedHashSet, HashFunction};
/// use setkit::set::Set;
///
/// let mut set = ChainedHashSet::new(HashFunction::std());
/// set.add_all(["ALPHA", "BETA", "ALPHA"]);
/// assert_eq!(set.size(), 2);
/// assert!(set.contains(&"BETA"));
/// ```
pub struct ChainedHashSet<T> {
    buckets: Box<[Chain<T>]>,
    length: usize,
    hash_function: HashFunction<T>,
}

impl<T> ChainedHashSet<T> {
    /// Number of buckets of a freshly created set.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Creates an empty set with [`Self::DEFAULT_CAPACITY`] buckets that
    /// hashes with `hash_function`.
    #[must_use]
    pub fn new(hash_function: HashFunction<T>) -> Self {
        Self::with_capacity(hash_function, Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty set with `capacity` buckets. A capacity of zero is
    /// raised to one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::{ChainedHashSet, HashFunction};
    ///
    /// let set = ChainedHashSet::<u8>::with_capacity(HashFunction::std(), 0);
    /// assert_eq!(set.capacity(), 1);
    /// ```
    #[must_use]
    pub fn with_capacity(hash_function: HashFunction<T>, capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            length: 0,
            hash_function,
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of buckets.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.capacity() as f64
    }

    /// Returns the hash function this set hashes with.
    #[inline]
    #[must_use]
    pub const fn hash_function(&self) -> &HashFunction<T> {
        &self.hash_function
    }

    /// Returns the number of elements stored in bucket `index`, or 0 when
    /// `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::{ChainedHashSet, HashFunction};
    /// use setkit::set::Set;
    ///
    /// let mut set = ChainedHashSet::new(HashFunction::new(|_: &i32| 0));
    /// set.add_all([1, 2, 3]);
    /// assert_eq!(set.elements_at_index(0), 3);
    /// assert_eq!(set.elements_at_index(1), 0);
    /// assert_eq!(set.elements_at_index(1_000), 0);
    /// ```
    #[must_use]
    pub fn elements_at_index(&self, index: usize) -> usize {
        self.buckets
            .get(index)
            .map_or(0, |chain| chain_values(chain).count())
    }

    /// Moves the table out in O(1), leaving `self` as an empty table of
    /// [`Self::DEFAULT_CAPACITY`] buckets with the same hash function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::{ChainedHashSet, HashFunction};
    /// use setkit::set::Set;
    ///
    /// let mut source = ChainedHashSet::new(HashFunction::std());
    /// source.add_all(0..20);
    ///
    /// let moved = source.take();
    /// assert_eq!(moved.size(), 20);
    /// assert_eq!(source.size(), 0);
    /// assert_eq!(source.capacity(), 10);
    ///
    /// source.add(5);
    /// assert!(source.contains(&5));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            buckets: std::mem::replace(
                &mut self.buckets,
                empty_buckets(Self::DEFAULT_CAPACITY),
            ),
            length: std::mem::take(&mut self.length),
            hash_function: self.hash_function.clone(),
        }
    }

    /// Returns an iterator over the elements in bucket order.
    #[must_use]
    pub fn iter(&self) -> ChainedHashSetIterator<'_, T> {
        ChainedHashSetIterator {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.length,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index_for(hash_function: &HashFunction<T>, element: &T, capacity: usize) -> usize {
        // The remainder is below `capacity`, so it fits back into `usize`.
        (hash_function.hash(element) % capacity as u64) as usize
    }

    fn bucket_index(&self, element: &T) -> usize {
        Self::index_for(&self.hash_function, element, self.capacity())
    }

    /// Whether holding `length` elements reaches the growth threshold.
    fn reaches_threshold(&self, length: usize) -> bool {
        length.saturating_mul(LOAD_DENOMINATOR)
            >= self.buckets.len().saturating_mul(LOAD_NUMERATOR)
    }

    /// Moves every entry into `fresh` and installs it as the bucket array.
    fn rehash_into(&mut self, mut fresh: Box<[Chain<T>]>) {
        let capacity = fresh.len();
        for bucket in self.buckets.iter_mut() {
            let mut chain = bucket.take();
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                let index = Self::index_for(&self.hash_function, &entry.value, capacity);
                entry.next = fresh[index].take();
                fresh[index] = Some(entry);
            }
        }
        let previous = std::mem::replace(&mut self.buckets, fresh);
        debug!(
            previous_capacity = previous.len(),
            capacity,
            length = self.length,
            "grew bucket array"
        );
    }
}

impl<T: PartialEq> ChainedHashSet<T> {
    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        chain_contains(&self.buckets[self.bucket_index(element)], element)
    }

    /// Returns `true` if `element` is stored in bucket `index`. An
    /// out-of-bounds `index` yields `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::{ChainedHashSet, HashFunction};
    /// use setkit::set::Set;
    ///
    /// let mut set = ChainedHashSet::new(HashFunction::new(|value: &u64| *value));
    /// set.add(13);
    /// assert!(set.is_element_at_index(&13, 3));
    /// assert!(!set.is_element_at_index(&13, 4));
    /// assert!(!set.is_element_at_index(&13, 10));
    /// ```
    #[must_use]
    pub fn is_element_at_index(&self, element: &T, index: usize) -> bool {
        self.buckets
            .get(index)
            .is_some_and(|chain| chain_contains(chain, element))
    }

    /// Adds `element` if it is not present. Returns `true` if the set
    /// changed.
    ///
    /// # Panics
    ///
    /// Panics if the bucket count cannot be doubled without overflowing
    /// `usize`. Allocation failure aborts, as with the standard collections;
    /// use [`Self::try_add`] to observe it instead.
    pub fn insert(&mut self, element: T) -> bool {
        match self.insert_with(element, |capacity| Ok(empty_buckets(capacity))) {
            Ok(inserted) => inserted,
            Err(error) => panic!("{error}"),
        }
    }

    /// Adds `element` if it is not present, reporting a failure to grow the
    /// bucket array instead of aborting. Returns `true` if the set changed.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailed`] or
    /// [`SetError::CapacityOverflow`] if the insertion required growth that
    /// could not be performed. The set is left exactly as it was and
    /// `element` is not inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::{ChainedHashSet, HashFunction};
    ///
    /// let mut set = ChainedHashSet::new(HashFunction::std());
    /// assert_eq!(set.try_add(1), Ok(true));
    /// assert_eq!(set.try_add(1), Ok(false));
    /// ```
    pub fn try_add(&mut self, element: T) -> SetResult<bool> {
        self.insert_with(element, try_empty_buckets).inspect_err(|error| {
            warn!(%error, length = self.length, "bucket array growth failed");
        })
    }

    /// Insert-if-absent. Growth happens before the new entry is linked so a
    /// failed allocation leaves the table untouched; every element ends up
    /// in the same bucket as when growing right after linking.
    fn insert_with<A>(&mut self, element: T, allocate: A) -> SetResult<bool>
    where
        A: FnOnce(usize) -> SetResult<Box<[Chain<T>]>>,
    {
        if self.contains(&element) {
            return Ok(false);
        }

        if self.reaches_threshold(self.length + 1) {
            let fresh = allocate(grown_capacity(self.capacity())?)?;
            self.rehash_into(fresh);
        }

        let index = self.bucket_index(&element);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            value: element,
            next,
        }));
        self.length += 1;
        Ok(true)
    }
}

// =============================================================================
// Set Implementation
// =============================================================================

impl<T: PartialEq> Set<T> for ChainedHashSet<T> {
    #[inline]
    fn add(&mut self, element: T) {
        self.insert(element);
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    #[inline]
    fn size(&self) -> usize {
        self.length
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of a [`ChainedHashSet`], bucket by bucket.
pub struct ChainedHashSetIterator<'a, T> {
    buckets: std::slice::Iter<'a, Chain<T>>,
    current: Option<&'a Entry<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for ChainedHashSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                self.remaining -= 1;
                return Some(&entry.value);
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ChainedHashSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, T> IntoIterator for &'a ChainedHashSet<T> {
    type Item = &'a T;
    type IntoIter = ChainedHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: std::hash::Hash + 'static> Default for ChainedHashSet<T> {
    fn default() -> Self {
        Self::new(HashFunction::std())
    }
}

impl<T: Clone> Clone for ChainedHashSet<T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.iter().map(clone_chain).collect(),
            length: self.length,
            hash_function: self.hash_function.clone(),
        }
    }
}

impl<T> Drop for ChainedHashSet<T> {
    fn drop(&mut self) {
        for bucket in self.buckets.iter_mut() {
            drop_chain(bucket);
        }
    }
}

impl<T: std::hash::Hash + Eq + 'static> FromIterator<T> for ChainedHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: PartialEq> Extend<T> for ChainedHashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: PartialEq> PartialEq for ChainedHashSet<T> {
    /// Two sets are equal when they hold the same elements, regardless of
    /// capacity or hash function.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Eq> Eq for ChainedHashSet<T> {}

impl<T: fmt::Debug> fmt::Debug for ChainedHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

static_assertions::assert_impl_all!(ChainedHashSet<i32>: Clone, Default);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(ChainedHashSet<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(ChainedHashSet<i32>: Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ChainedHashSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct ChainedHashSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for ChainedHashSetVisitor<T>
where
    T: serde::Deserialize<'de> + std::hash::Hash + Eq + 'static,
{
    type Value = ChainedHashSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = ChainedHashSet::default();
        while let Some(element) = access.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ChainedHashSet<T>
where
    T: serde::Deserialize<'de> + std::hash::Hash + Eq + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ChainedHashSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
