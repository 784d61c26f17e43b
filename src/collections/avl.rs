//! AVL tree set.
//!
//! This module provides [`AvlSet`], an ordered set stored as a binary search
//! tree of individually boxed nodes.
//!
//! # Overview
//!
//! With balancing enabled (the default), every insertion walks back up the
//! path it descended and restores the AVL invariant with single or double
//! rotations, so the heights of any node's two subtrees differ by at most
//! one. With balancing disabled the tree is a plain binary search tree and
//! degenerates into a chain on sorted input.
//!
//! - O(log N) add and contains (balanced mode)
//! - O(1) size and height
//! - O(N) preorder, inorder and postorder traversals
//!
//! # Examples
//!
//! ```rust
//! use setkit::collections::AvlSet;
//! use setkit::set::Set;
//!
//! let mut set = AvlSet::new();
//! for value in [3, 1, 4, 1, 5, 9, 2, 6] {
//!     set.add(value);
//! }
//! assert_eq!(set.size(), 7);
//!
//! let mut sorted = Vec::new();
//! set.inorder(|value| sorted.push(*value));
//! assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 9]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

use crate::set::Set;

/// Inline stack depth for traversals; a balanced tree of this height holds
/// far more nodes than fit in memory.
const INLINE_DEPTH: usize = 48;

// =============================================================================
// Node Definition
// =============================================================================

type Link<T> = Option<Box<Node<T>>>;

/// Internal node structure for the AVL tree.
struct Node<T> {
    value: T,
    /// Height of the subtree rooted here; a leaf has height 0.
    height: isize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a leaf node.
    const fn leaf(value: T) -> Self {
        Self {
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    /// Recomputes the cached height from the children.
    fn update_height(&mut self) {
        self.height = 1 + height(self.left.as_deref()).max(height(self.right.as_deref()));
    }

    /// `height(right) - height(left)`.
    fn balance_factor(&self) -> isize {
        height(self.right.as_deref()) - height(self.left.as_deref())
    }
}

/// Deep-copies a subtree with an explicit stack, keeping the shape and the
/// cached heights.
fn clone_link<T: Clone>(link: &Link<T>) -> Link<T> {
    let mut root = None;
    {
        let mut pending: Vec<(&Node<T>, &mut Link<T>)> = Vec::new();
        if let Some(node) = link.as_deref() {
            pending.push((node, &mut root));
        }
        while let Some((node, slot)) = pending.pop() {
            let copy = slot.insert(Box::new(Node {
                value: node.value.clone(),
                height: node.height,
                left: None,
                right: None,
            }));
            let Node { left, right, .. } = &mut **copy;
            if let Some(child) = node.left.as_deref() {
                pending.push((child, left));
            }
            if let Some(child) = node.right.as_deref() {
                pending.push((child, right));
            }
        }
    }
    root
}

/// Height of an optional subtree; the empty tree has height -1.
fn height<T>(node: Option<&Node<T>>) -> isize {
    node.map_or(-1, |node| node.height)
}

/// The rotation that restores balance at an ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rotation {
    /// Promote the left child.
    Right,
    /// Promote the right child.
    Left,
    /// Promote the left child's right child.
    LeftRight,
    /// Promote the right child's left child.
    RightLeft,
}

/// One pending step of an iterative traversal.
enum Step<'a, T> {
    Expand(&'a Node<T>),
    Visit(&'a T),
}

/// The order in which a traversal visits a node relative to its subtrees.
#[derive(Clone, Copy)]
enum Traversal {
    Preorder,
    Inorder,
    Postorder,
}

// =============================================================================
// AvlSet Definition
// =============================================================================

/// An ordered set backed by an AVL tree.
///
/// Each node is owned by exactly one parent edge, and the root is owned by
/// the set. [`Clone`] deep-copies every node and preserves the shape; a
/// Rust move, or [`AvlSet::take`], transfers the whole tree in O(1).
///
/// # Time Complexity
///
/// | Operation    | Balanced   | Unbalanced |
/// |--------------|------------|------------|
/// | `add`        | O(log N)   | O(N)       |
/// | `contains`   | O(log N)   | O(N)       |
/// | `size`       | O(1)       | O(1)       |
/// | `height`     | O(1)       | O(1)       |
/// | traversals   | O(N)       | O(N)       |
///
/// # Examples
///
/// ```rust
/// use setkit::collections::AvlSet;
/// use setkit::set::Set;
///
/// let mut set = AvlSet::new();
/// set.add(2);
/// set.add(1);
/// set.add(3);
///
/// let mut order = Vec::new();
/// set.postorder(|value| order.push(*value));
/// assert_eq!(order, vec![1, 3, 2]);
/// ```
pub struct AvlSet<T> {
    root: Link<T>,
    length: usize,
    balanced: bool,
}

impl<T> AvlSet<T> {
    /// Creates an empty set that rebalances on every insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::AvlSet;
    ///
    /// let set: AvlSet<i32> = AvlSet::new();
    /// assert_eq!(set.height(), -1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_balance(true)
    }

    /// Creates an empty set, with or without balancing.
    ///
    /// Without balancing the set behaves like a plain binary search tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::AvlSet;
    /// use setkit::set::Set;
    ///
    /// let mut set = AvlSet::with_balance(false);
    /// set.add_all(0..10);
    /// assert_eq!(set.height(), 9);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_balance(balanced: bool) -> Self {
        Self {
            root: None,
            length: 0,
            balanced,
        }
    }

    /// Returns `true` if this set rebalances on insertion.
    #[inline]
    #[must_use]
    pub const fn is_balanced_mode(&self) -> bool {
        self.balanced
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

    /// Returns the height of the tree. The empty tree has height -1 and a
    /// single node has height 0.
    ///
    /// # Complexity
    ///
    /// O(1): every node caches the height of its subtree.
    #[inline]
    #[must_use]
    pub fn height(&self) -> isize {
        height(self.root.as_deref())
    }

    /// Moves the whole tree out in O(1), leaving `self` empty with the same
    /// balancing mode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::AvlSet;
    /// use setkit::set::Set;
    ///
    /// let mut source = AvlSet::new();
    /// source.add_all([1, 2, 3]);
    ///
    /// let moved = source.take();
    /// assert_eq!(moved.size(), 3);
    /// assert_eq!(source.size(), 0);
    ///
    /// source.add(10);
    /// assert!(source.contains(&10));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            root: self.root.take(),
            length: std::mem::take(&mut self.length),
            balanced: self.balanced,
        }
    }

    /// Calls `visit` on every element in preorder: a node, then its left
    /// subtree, then its right subtree.
    pub fn preorder<F: FnMut(&T)>(&self, visit: F) {
        self.traverse(Traversal::Preorder, visit);
    }

    /// Calls `visit` on every element in inorder, which is ascending order.
    pub fn inorder<F: FnMut(&T)>(&self, visit: F) {
        self.traverse(Traversal::Inorder, visit);
    }

    /// Calls `visit` on every element in postorder: both subtrees, then the
    /// node.
    pub fn postorder<F: FnMut(&T)>(&self, visit: F) {
        self.traverse(Traversal::Postorder, visit);
    }

    /// Iterative traversal with an explicit stack, so degenerate trees cannot
    /// exhaust the call stack.
    fn traverse<F: FnMut(&T)>(&self, order: Traversal, mut visit: F) {
        let mut stack: SmallVec<[Step<'_, T>; INLINE_DEPTH]> = SmallVec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(Step::Expand(root));
        }

        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(value) => visit(value),
                Step::Expand(node) => {
                    let left = node.left.as_deref().map(Step::Expand);
                    let right = node.right.as_deref().map(Step::Expand);
                    let here = Step::Visit(&node.value);
                    // Pushed in reverse of the visiting order.
                    match order {
                        Traversal::Preorder => {
                            stack.extend(right);
                            stack.extend(left);
                            stack.push(here);
                        }
                        Traversal::Inorder => {
                            stack.extend(right);
                            stack.push(here);
                            stack.extend(left);
                        }
                        Traversal::Postorder => {
                            stack.push(here);
                            stack.extend(right);
                            stack.extend(left);
                        }
                    }
                }
            }
        }
    }

    /// Returns an iterator over the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::AvlSet;
    ///
    /// let set: AvlSet<i32> = [5, 1, 3].into_iter().collect();
    /// let elements: Vec<&i32> = set.iter().collect();
    /// assert_eq!(elements, vec![&1, &3, &5]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> AvlSetIterator<'_, T> {
        let mut iterator = AvlSetIterator {
            stack: SmallVec::new(),
            remaining: self.length,
        };
        iterator.push_left_spine(self.root.as_deref());
        iterator
    }

    /// Rotates `node` so that its left child becomes the subtree root. The
    /// left child's former right subtree becomes `node`'s left subtree.
    fn rotate_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut pivot) = node.left.take() else {
            return node;
        };
        node.left = pivot.right.take();
        node.update_height();
        pivot.right = Some(node);
        pivot.update_height();
        pivot
    }

    /// Mirror image of [`Self::rotate_right`]: the right child becomes the
    /// subtree root.
    fn rotate_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut pivot) = node.right.take() else {
            return node;
        };
        node.right = pivot.left.take();
        node.update_height();
        pivot.left = Some(node);
        pivot.update_height();
        pivot
    }

    fn rotate(mut node: Box<Node<T>>, rotation: Rotation) -> Box<Node<T>> {
        trace!(?rotation, "rebalancing subtree");
        match rotation {
            Rotation::Right => Self::rotate_right(node),
            Rotation::Left => Self::rotate_left(node),
            Rotation::LeftRight => {
                node.left = node.left.take().map(Self::rotate_left);
                Self::rotate_right(node)
            }
            Rotation::RightLeft => {
                node.right = node.right.take().map(Self::rotate_right);
                Self::rotate_left(node)
            }
        }
    }
}

impl<T: Ord> AvlSet<T> {
    /// Returns `true` if the set contains `element`.
    ///
    /// # Complexity
    ///
    /// O(height): a single iterative descent.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match element.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Adds `element` if it is not present. Returns `true` if the set
    /// changed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(4));
    /// assert!(!set.insert(4));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        let inserted = if self.balanced {
            Self::insert_balanced(&mut self.root, element)
        } else {
            self.insert_unbalanced(element)
        };
        if inserted {
            self.length += 1;
        }
        inserted
    }

    /// Recursive insertion that rebalances every ancestor on the way back.
    ///
    /// An ancestor whose subtree heights differ by two gets a single
    /// rotation when the new element went to the outer grandchild side and a
    /// double rotation when it went to the inner side.
    fn insert_balanced(slot: &mut Link<T>, element: T) -> bool {
        let Some(node) = slot.as_deref_mut() else {
            *slot = Some(Box::new(Node::leaf(element)));
            return true;
        };

        let (inserted, rotation) = match element.cmp(&node.value) {
            Ordering::Equal => return false,
            Ordering::Greater => {
                let outer = node
                    .right
                    .as_deref()
                    .is_some_and(|right| element > right.value);
                let inserted = Self::insert_balanced(&mut node.right, element);
                node.update_height();
                let rotation = (node.balance_factor() == 2).then_some(if outer {
                    Rotation::Left
                } else {
                    Rotation::RightLeft
                });
                (inserted, rotation)
            }
            Ordering::Less => {
                let outer = node
                    .left
                    .as_deref()
                    .is_some_and(|left| element < left.value);
                let inserted = Self::insert_balanced(&mut node.left, element);
                node.update_height();
                let rotation = (node.balance_factor() == -2).then_some(if outer {
                    Rotation::Right
                } else {
                    Rotation::LeftRight
                });
                (inserted, rotation)
            }
        };

        if let Some(rotation) = rotation {
            *slot = slot.take().map(|node| Self::rotate(node, rotation));
        }
        inserted
    }

    /// Plain binary search tree insertion without rotations.
    ///
    /// Iterative: a first descent finds the depth of the new leaf, a second
    /// descent raises the cached heights along the path and links the leaf.
    fn insert_unbalanced(&mut self, element: T) -> bool {
        let Some(depth) = self.vacant_depth(&element) else {
            return false;
        };

        let mut slot = &mut self.root;
        let mut remaining = depth;
        while let Some(node) = slot {
            node.height = node.height.max(remaining);
            remaining -= 1;
            slot = if element < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::leaf(element)));
        true
    }

    /// Depth at which `element` would be linked, or `None` if it is present.
    fn vacant_depth(&self, element: &T) -> Option<isize> {
        let mut depth = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match element.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return None,
            };
            depth += 1;
        }
        Some(depth)
    }
}

// =============================================================================
// Set Implementation
// =============================================================================

impl<T: Ord> Set<T> for AvlSet<T> {
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

/// An in-order iterator over the elements of an [`AvlSet`].
pub struct AvlSetIterator<'a, T> {
    stack: SmallVec<[&'a Node<T>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, T> AvlSetIterator<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for AvlSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for AvlSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for AvlSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for AvlSet<T> {
    fn clone(&self) -> Self {
        Self {
            root: clone_link(&self.root),
            length: self.length,
            balanced: self.balanced,
        }
    }
}

impl<T> Drop for AvlSet<T> {
    /// Frees nodes with an explicit stack; the derived recursive drop could
    /// overflow on a degenerate unbalanced tree.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = AvlSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for AvlSet<T> {
    /// Two sets are equal when they hold the same elements, regardless of
    /// tree shape or balancing mode.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlSet<T> {}

impl<T: fmt::Debug> fmt::Debug for AvlSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for AvlSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(AvlSet<i32>: Clone, Default, Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for AvlSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct AvlSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for AvlSetVisitor<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    type Value = AvlSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = AvlSet::new();
        while let Some(element) = access.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for AvlSet<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    /// Checks ordering, cached heights and (optionally) the AVL balance
    /// invariant of every node. Returns the subtree height.
    fn check_subtree<T: Ord>(
        node: Option<&Node<T>>,
        lower: Option<&T>,
        upper: Option<&T>,
        balanced: bool,
    ) -> isize {
        let Some(node) = node else {
            return -1;
        };
        assert!(lower.is_none_or(|lower| *lower < node.value));
        assert!(upper.is_none_or(|upper| node.value < *upper));
        let left = check_subtree(node.left.as_deref(), lower, Some(&node.value), balanced);
        let right = check_subtree(node.right.as_deref(), Some(&node.value), upper, balanced);
        if balanced {
            assert!((right - left).abs() <= 1, "unbalanced node");
        }
        let height = 1 + left.max(right);
        assert_eq!(node.height, height, "stale cached height");
        height
    }

    fn check_invariants<T: Ord>(set: &AvlSet<T>) {
        let height = check_subtree(set.root.as_deref(), None, None, set.balanced);
        assert_eq!(set.height(), height);
        assert_eq!(set.iter().count(), set.len());
    }

    fn preorder_of(set: &AvlSet<i32>) -> Vec<i32> {
        let mut visited = Vec::new();
        set.preorder(|value| visited.push(*value));
        visited
    }

    #[rstest]
    fn test_new_is_empty() {
        let set: AvlSet<i32> = AvlSet::new();
        assert!(set.is_empty());
        assert_eq!(set.height(), -1);
        assert!(set.is_balanced_mode());
        assert!(!set.contains(&0));
    }

    #[rstest]
    fn test_single_element_has_height_zero() {
        let mut set = AvlSet::new();
        set.add(10);
        assert_eq!(set.height(), 0);
        assert_eq!(preorder_of(&set), vec![10]);
    }

    #[rstest]
    #[case::right_right(vec![1, 2, 3], vec![2, 1, 3])]
    #[case::left_left(vec![3, 2, 1], vec![2, 1, 3])]
    #[case::right_left(vec![1, 3, 2], vec![2, 1, 3])]
    #[case::left_right(vec![3, 1, 2], vec![2, 1, 3])]
    fn test_rotation_cases(#[case] inserted: Vec<i32>, #[case] expected_preorder: Vec<i32>) {
        let mut set = AvlSet::new();
        set.add_all(inserted);
        assert_eq!(preorder_of(&set), expected_preorder);
        assert_eq!(set.height(), 1);
        check_invariants(&set);
    }

    #[rstest]
    fn test_rotation_moves_inner_subtree() {
        // Inserting 5 under 4 unbalances 2; rotating left moves 3 under 2.
        let mut set = AvlSet::new();
        set.add_all([2, 1, 4, 3, 5, 6]);
        assert_eq!(preorder_of(&set), vec![4, 2, 1, 3, 5, 6]);
        check_invariants(&set);
    }

    #[rstest]
    fn test_double_rotation_deep_in_tree() {
        let mut set = AvlSet::new();
        set.add_all([50, 25, 75, 10, 30, 27]);
        assert_eq!(preorder_of(&set), vec![30, 25, 10, 27, 50, 75]);
        check_invariants(&set);
    }

    #[rstest]
    fn test_unbalanced_ascending_degenerates() {
        let mut set = AvlSet::with_balance(false);
        set.add_all(0..100);
        assert_eq!(set.height(), 99);
        assert_eq!(set.len(), 100);
        check_invariants(&set);
    }

    #[rstest]
    fn test_unbalanced_keeps_insertion_shape() {
        let mut set = AvlSet::with_balance(false);
        set.add_all([5, 3, 8, 1, 4]);
        assert_eq!(preorder_of(&set), vec![5, 3, 1, 4, 8]);
        assert_eq!(set.height(), 2);
        check_invariants(&set);
    }

    #[rstest]
    fn test_unbalanced_deep_tree_drops_and_traverses() {
        let mut set = AvlSet::with_balance(false);
        set.add_all(0..10_000);
        let mut count = 0;
        set.postorder(|_| count += 1);
        assert_eq!(count, 10_000);
        drop(set);
    }

    /// Right-leaning chain `0..count` linked directly, as unbalanced mode
    /// builds it from ascending input.
    fn ascending_chain(count: i32) -> AvlSet<i32> {
        let root = (0..count).rev().fold(None, |right, value| {
            Some(Box::new(Node {
                value,
                height: height(right.as_deref()) + 1,
                left: None,
                right,
            }))
        });
        AvlSet {
            root,
            length: usize::try_from(count).unwrap(),
            balanced: false,
        }
    }

    #[rstest]
    fn test_unbalanced_deep_tree_clones_iteratively() {
        let original = ascending_chain(100_000);
        let mut copy = original.clone();
        assert_eq!(copy.height(), 99_999);
        assert_eq!(copy.len(), 100_000);
        assert_eq!(preorder_of(&copy), (0..100_000).collect::<Vec<_>>());

        copy.add(-1);
        assert!(!original.contains(&-1));
        assert_eq!(copy.height(), 99_999);
    }

    #[rstest]
    fn test_duplicate_add_keeps_shape() {
        let mut set = AvlSet::new();
        set.add_all([4, 2, 6]);
        let before = preorder_of(&set);
        set.add(2);
        assert_eq!(preorder_of(&set), before);
        assert_eq!(set.len(), 3);
    }

    #[rstest]
    fn test_clone_preserves_shape() {
        let mut original = AvlSet::with_balance(false);
        original.add_all([5, 3, 8, 1]);
        let copy = original.clone();
        assert_eq!(preorder_of(&copy), preorder_of(&original));
        assert!(!copy.is_balanced_mode());
        check_invariants(&copy);
    }

    #[rstest]
    fn test_display_and_debug() {
        let set: AvlSet<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{set}"), "{1, 2}");
        assert_eq!(format!("{set:?}"), "{1, 2}");
        let empty: AvlSet<i32> = AvlSet::new();
        assert_eq!(format!("{empty}"), "{}");
    }

    #[rstest]
    fn test_equality_ignores_shape() {
        let balanced: AvlSet<i32> = (1..=5).collect();
        let mut chain = AvlSet::with_balance(false);
        chain.add_all(1..=5);
        assert_eq!(balanced, chain);
        chain.add(6);
        assert_ne!(balanced, chain);
    }

    proptest! {
        #[test]
        fn prop_balance_invariant_after_every_add(
            elements in prop::collection::vec(-500i32..500, 0..200)
        ) {
            let mut set = AvlSet::new();
            for element in elements {
                set.add(element);
                check_invariants(&set);
            }
        }

        #[test]
        fn prop_unbalanced_orders_and_heights(
            elements in prop::collection::vec(any::<i16>(), 0..200)
        ) {
            let mut set = AvlSet::with_balance(false);
            set.add_all(elements);
            check_invariants(&set);
        }
    }
}
