//! Set capability - the contract shared by every container.
//!
//! This module provides the [`Set`] trait, which represents containers of
//! distinct elements that support insert-if-absent, membership tests and
//! size reporting.
//!
//! # Laws
//!
//! Implementations must satisfy these properties:
//!
//! ## Insert-Contains
//!
//! ```text
//! set.add(x); set.contains(&x) == true
//! ```
//!
//! ## Idempotence
//!
//! ```text
//! set.add(x); let n = set.size(); set.add(x); set.size() == n
//! ```
//!
//! ## Size counts distinct elements
//!
//! ```text
//! for x in xs { set.add(x) }; set.size() == distinct(xs).len()
//! ```
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use setkit::set::Set;
//!
//! struct Sorted(BTreeSet<i32>);
//!
//! impl Set<i32> for Sorted {
//!     fn add(&mut self, element: i32) {
//!         self.0.insert(element);
//!     }
//!
//!     fn contains(&self, element: &i32) -> bool {
//!         self.0.contains(element)
//!     }
//!
//!     fn size(&self) -> usize {
//!         self.0.len()
//!     }
//! }
//!
//! fn fill<S: Set<i32>>(set: &mut S) {
//!     for value in [5, 3, 5, 1] {
//!         set.add(value);
//!     }
//! }
//!
//! let mut set = Sorted(BTreeSet::new());
//! fill(&mut set);
//! assert_eq!(set.size(), 3);
//! assert!(set.contains(&3));
//! ```

/// A container of distinct elements.
///
/// `Set` is the only surface consumers such as
/// [`WordChecker`](crate::suggest::WordChecker) depend on. It says nothing
/// about ordering, traversal or bucket layout.
///
/// # Required Methods
///
/// - `add`: insert an element if it is not present yet
/// - `contains`: membership test
/// - `size`: number of distinct elements
///
/// # Provided Methods
///
/// - `is_implemented`: capability flag, `true` unless overridden
/// - `is_empty`: `size() == 0`
/// - `add_all`: `add` every element of an iterator
pub trait Set<T> {
    /// Adds `element` to the set. Has no effect if an equal element is
    /// already present.
    fn add(&mut self, element: T);

    /// Returns `true` if an element equal to `element` is in the set.
    fn contains(&self, element: &T) -> bool;

    /// Returns the number of distinct elements in the set.
    fn size(&self) -> usize;

    /// Reports whether this variant of the capability is implemented.
    #[inline]
    fn is_implemented(&self) -> bool {
        true
    }

    /// Returns `true` if the set holds no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::Set;
    /// # use std::collections::BTreeSet;
    /// # struct Sorted<T>(BTreeSet<T>);
    /// # impl<T: Ord> Set<T> for Sorted<T> {
    /// #     fn add(&mut self, element: T) { self.0.insert(element); }
    /// #     fn contains(&self, element: &T) -> bool { self.0.contains(element) }
    /// #     fn size(&self) -> usize { self.0.len() }
    /// # }
    ///
    /// let mut set: Sorted<&str> = Sorted(BTreeSet::new());
    /// assert!(set.is_empty());
    /// set.add("word");
    /// assert!(!set.is_empty());
    /// ```
    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Adds every element yielded by `elements`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::Set;
    /// # use std::collections::BTreeSet;
    /// # struct Sorted<T>(BTreeSet<T>);
    /// # impl<T: Ord> Set<T> for Sorted<T> {
    /// #     fn add(&mut self, element: T) { self.0.insert(element); }
    /// #     fn contains(&self, element: &T) -> bool { self.0.contains(element) }
    /// #     fn size(&self) -> usize { self.0.len() }
    /// # }
    ///
    /// let mut set: Sorted<i32> = Sorted(BTreeSet::new());
    /// set.add_all([3, 1, 4, 1, 5]);
    /// assert_eq!(set.size(), 4);
    /// ```
    fn add_all<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for element in elements {
            self.add(element);
        }
    }
}

impl<T, S: Set<T> + ?Sized> Set<T> for &mut S {
    #[inline]
    fn add(&mut self, element: T) {
        (**self).add(element);
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        (**self).contains(element)
    }

    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }

    #[inline]
    fn is_implemented(&self) -> bool {
        (**self).is_implemented()
    }
}
