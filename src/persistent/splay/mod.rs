//! Persistent splay tree with O(1) copies.
//!
//! This module provides [`SplayTree`], an ordered set whose handles share
//! structure. Cloning a handle costs one reference-count increment; the two
//! handles may then be mutated independently, and neither ever observes the
//! other's changes.
//!
//! # Overview
//!
//! A splay tree moves every accessed node to the root. Rotations normally
//! rewrite child pointers in place, which would corrupt any other snapshot
//! sharing those nodes. Here every node on the access path is made exclusive
//! first: a node referenced from more than one place is shallow-cloned before
//! it is touched. Subtrees off the path keep their identity and stay shared.
//!
//! - O(1) clone
//! - amortized O(log N) insert, erase and `find_memoize`
//! - O(depth) `find`, which never reshapes the tree
//! - O(N) `len`, computed on demand
//!
//! # Examples
//!
//! ```rust
//! use persistent_splay::persistent::SplayTree;
//!
//! let mut tree = SplayTree::new();
//! tree.insert(3);
//! tree.insert(1);
//! tree.insert(4);
//!
//! let snapshot = tree.clone();
//! tree.erase(&3);
//!
//! assert_eq!(tree.to_vec(), vec![1, 4]);
//! assert_eq!(snapshot.to_vec(), vec![1, 3, 4]);
//! ```
//!
//! # Internal Structure
//!
//! - [`node`]: nodes, links and the clone-before-mutate primitive
//! - [`path`]: the per-call record of a copy-on-write walk
//! - [`rotation`]: zig, zig-zig and zig-zag steps
//! - [`mutation`]: insert, pull, pull-max and erase on a bare root
//! - [`traversal`]: iteration, verification and the structural dump

mod mutation;
mod node;
mod path;
mod rotation;
mod traversal;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::ReferenceCounter;
use super::comparator::{Comparator, NaturalOrder};
use super::error::InvariantViolation;
use node::Link;

pub use traversal::{SplayTreeIntoIterator, SplayTreeIterator, SplayTreeStructure};

// =============================================================================
// SplayTree Definition
// =============================================================================

/// A persistent ordered set based on a splay tree.
///
/// Values are ordered by the comparator `C`, which defaults to
/// [`NaturalOrder`]. Two values the comparator reports as `Equal` are the
/// same key; inserting the second replaces the first.
///
/// Cloning is O(1) and produces an independent snapshot: the handles share
/// every node until one of them writes along a path, at which point only
/// the nodes on that path are copied.
///
/// Read-only methods take `&self` and never reshape the tree, so any number
/// of threads may read one snapshot at once. Methods that splay take
/// `&mut self`.
///
/// # Time Complexity
///
/// | Operation      | Complexity         |
/// |----------------|--------------------|
/// | `new`/`clone`  | O(1)               |
/// | `insert`       | O(log N) amortized |
/// | `erase`        | O(log N) amortized |
/// | `find_memoize` | O(log N) amortized |
/// | `find`         | O(depth)           |
/// | `len`          | O(N)               |
/// | `is_empty`     | O(1)               |
/// | `clear`        | O(1)               |
///
/// # Examples
///
/// ```rust
/// use persistent_splay::persistent::SplayTree;
///
/// let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
/// let mut tree = SplayTree::with_comparator(by_length);
/// tree.insert("ccc");
/// tree.insert("a");
/// tree.insert("bb");
/// tree.insert("zz"); // same length as "bb": replaces it
///
/// assert_eq!(tree.to_vec(), vec!["a", "zz", "ccc"]);
/// ```
pub struct SplayTree<T, C = NaturalOrder> {
    root: Link<T>,
    comparator: C,
}

// Node links are Arc under the `arc` feature, so snapshots may cross threads.
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(SplayTree<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(SplayTree<String>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(SplayTree<i32>: Send, Sync);

impl<T> SplayTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let tree: SplayTree<i32> = SplayTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            comparator: NaturalOrder,
        }
    }
}

impl<T, C> SplayTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// The comparator must stay consistent for the lifetime of the tree and
    /// of every snapshot cloned from it.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
        }
    }

    /// Returns the comparator ordering this tree.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns `true` if the tree holds no values.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value from this handle.
    ///
    /// Other snapshots keep their nodes.
    #[inline]
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Returns `true` if both handles refer to the same root node.
    ///
    /// This is an identity check, not value equality: two trees with the
    /// same values but different shapes compare unequal here. Note that
    /// [`erase`](Self::erase) and [`find_memoize`](Self::find_memoize) may
    /// reshape (and therefore copy) a shared tree even when the content does
    /// not change; use `==` to compare content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let tree: SplayTree<i32> = [1, 2, 3].into_iter().collect();
    /// let copy = tree.clone();
    /// assert!(tree.ptr_eq(&copy));
    /// ```
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns the number of values.
    ///
    /// The count is not cached; every call walks the tree.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn len(&self) -> usize {
        self.fold(0, |count, _| count + 1)
    }

    /// Returns an iterator over the values in ascending order.
    #[inline]
    pub fn iter(&self) -> SplayTreeIterator<'_, T> {
        SplayTreeIterator::new(&self.root)
    }

    /// Reduces the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let tree: SplayTree<i32> = [3, 1, 2].into_iter().collect();
    /// let digits = tree.fold(String::new(), |mut text, value| {
    ///     text.push_str(&value.to_string());
    ///     text
    /// });
    /// assert_eq!(digits, "123");
    /// ```
    pub fn fold<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(init, function)
    }

    /// Calls `function` on every value in ascending order.
    pub fn for_each<F>(&self, function: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(function);
    }

    /// Returns the smallest value without reshaping the tree.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Returns the largest value without reshaping the tree.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Returns the value stored at the root.
    ///
    /// After `insert` or a successful `find_memoize` this is the value just
    /// accessed.
    #[must_use]
    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.value)
    }

    /// Searches with a probe instead of a full value.
    ///
    /// `probe` is called with stored values and must report where the target
    /// lies relative to them (`Less` if the target comes first). It must
    /// agree with the tree's comparator. The tree is not reshaped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let tree: SplayTree<(i32, &str)> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.find_by(|stored| 2.cmp(&stored.0)), Some(&(2, "two")));
    /// ```
    pub fn find_by<P>(&self, mut probe: P) -> Option<&T>
    where
        P: FnMut(&T) -> Ordering,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match probe(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Returns a value that renders the node graph, with share counts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.structure().to_string(), "(2:1 1:1 ())");
    /// ```
    #[inline]
    pub const fn structure(&self) -> SplayTreeStructure<'_, T> {
        SplayTreeStructure::new(&self.root)
    }
}

impl<T, C: Comparator<T>> SplayTree<T, C> {
    /// Returns the stored value equal to `value`, without reshaping the tree.
    ///
    /// Safe to call from many threads on one snapshot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let tree: SplayTree<i32> = [5, 3, 8].into_iter().collect();
    /// assert_eq!(tree.find(&3), Some(&3));
    /// assert_eq!(tree.find(&4), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&T> {
        let comparator = &self.comparator;
        self.find_by(|stored| comparator.compare(value, stored))
    }

    /// Returns `true` if a value equal to `value` is stored.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Checks that the values are in strictly ascending comparator order.
    ///
    /// A failure means the tree was corrupted or the comparator is not a
    /// consistent total order; it never results from a valid sequence of
    /// calls with a valid comparator.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] naming the first out-of-order value.
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        traversal::check_order(&self.root, &self.comparator)
    }

    #[inline]
    fn verify(&self) {
        if cfg!(all(debug_assertions, feature = "verify")) {
            if let Err(violation) = self.check_invariant() {
                panic!("{violation}");
            }
        }
    }
}

impl<T: Clone, C: Comparator<T>> SplayTree<T, C> {
    /// Inserts `value`, replacing a stored value equal to it.
    ///
    /// The inserted value becomes the root. Returns `true` if a value was
    /// replaced, in which case the number of values is unchanged.
    ///
    /// # Complexity
    ///
    /// O(log N) amortized
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// assert!(!tree.insert(1));
    /// assert!(tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let comparator = &self.comparator;
        let replaced = mutation::insert(&mut self.root, value, |target, stored| {
            comparator.compare(target, stored)
        });
        self.verify();
        replaced
    }

    /// Like [`find`](Self::find), but splays the match to the root so that
    /// an immediately repeated lookup is O(1).
    ///
    /// On a miss the tree is still reshaped around where `value` would be;
    /// the content never changes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let mut tree: SplayTree<i32> = (1..=10).collect();
    /// assert_eq!(tree.find_memoize(&4), Some(&4));
    /// assert_eq!(tree.root(), Some(&4));
    /// assert_eq!(tree.find_memoize(&11), None);
    /// ```
    pub fn find_memoize(&mut self, value: &T) -> Option<&T> {
        self.find_memoize_with(|comparator, stored| comparator.compare(value, stored))
    }

    /// Like [`find_memoize`](Self::find_memoize), driven by a probe as in
    /// [`find_by`](Self::find_by).
    pub fn find_memoize_by<P>(&mut self, mut probe: P) -> Option<&T>
    where
        P: FnMut(&T) -> Ordering,
    {
        self.find_memoize_with(|_, stored| probe(stored))
    }

    /// Splays the value matching `probe`, which also receives the tree's
    /// comparator.
    pub(crate) fn find_memoize_with<P>(&mut self, mut probe: P) -> Option<&T>
    where
        P: FnMut(&C, &T) -> Ordering,
    {
        let comparator = &self.comparator;
        let found = mutation::pull(&mut self.root, |stored| probe(comparator, stored));
        self.verify();
        if found { self.root() } else { None }
    }

    /// Removes the value equal to `value`. Returns whether one was removed.
    ///
    /// Erasing an absent value leaves the content unchanged, although the
    /// tree may be reshaped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let mut tree: SplayTree<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(tree.erase(&2));
    /// assert!(!tree.erase(&2));
    /// assert_eq!(tree.to_vec(), vec![1, 3]);
    /// ```
    pub fn erase(&mut self, value: &T) -> bool {
        self.erase_with(|comparator, stored| comparator.compare(value, stored))
    }

    /// Like [`erase`](Self::erase), driven by a probe as in
    /// [`find_by`](Self::find_by).
    pub fn erase_by<P>(&mut self, mut probe: P) -> bool
    where
        P: FnMut(&T) -> Ordering,
    {
        self.erase_with(|_, stored| probe(stored))
    }

    /// Erases the value matching `probe`, which also receives the tree's
    /// comparator.
    pub(crate) fn erase_with<P>(&mut self, mut probe: P) -> bool
    where
        P: FnMut(&C, &T) -> Ordering,
    {
        let comparator = &self.comparator;
        let removed = mutation::erase(&mut self.root, |stored| probe(comparator, stored));
        self.verify();
        removed
    }

    /// Returns the values in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone, C: Comparator<T> + Clone> SplayTree<T, C> {
    /// Returns a copy of this tree with `value` inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayTree;
    ///
    /// let empty: SplayTree<i32> = SplayTree::new();
    /// let one = empty.inserted(1);
    /// assert!(empty.is_empty());
    /// assert_eq!(one.to_vec(), vec![1]);
    /// ```
    #[must_use]
    pub fn inserted(&self, value: T) -> Self {
        let mut copy = self.clone();
        copy.insert(value);
        copy
    }

    /// Returns a copy of this tree without the value equal to `value`.
    #[must_use]
    pub fn erased(&self, value: &T) -> Self {
        let mut copy = self.clone();
        copy.erase(value);
        copy
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Clone> Clone for SplayTree<T, C> {
    /// O(1): shares every node with `self`.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T, C: Default> Default for SplayTree<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Comparator<T> + Default> FromIterator<T> for SplayTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T: Clone, C: Comparator<T>> Extend<T> for SplayTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Clone, C> IntoIterator for SplayTree<T, C> {
    type Item = T;
    type IntoIter = SplayTreeIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let values: Vec<T> = self.iter().cloned().collect();
        SplayTreeIntoIterator::new(values.into_iter())
    }
}

impl<'a, T, C> IntoIterator for &'a SplayTree<T, C> {
    type Item = &'a T;
    type IntoIter = SplayTreeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Content equality: same values in the same order, whatever the shape.
impl<T: PartialEq, C> PartialEq for SplayTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for SplayTree<T, C> {}

/// Hashes the length, then the values in ascending order, as `BTreeSet` does.
impl<T: Hash, C> Hash for SplayTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SplayTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for SplayTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for value in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, C> serde::Serialize for SplayTree<T, C>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct SplayTreeVisitor<T, C> {
    marker: std::marker::PhantomData<(T, C)>,
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for SplayTreeVisitor<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Comparator<T> + Default,
{
    type Value = SplayTree<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut tree = SplayTree::default();
        while let Some(value) = access.next_element()? {
            tree.insert(value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for SplayTree<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SplayTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
