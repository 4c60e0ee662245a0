//! Persistent ordered map layered on [`SplayTree`].
//!
//! [`SplayMap`] stores `(key, value)` entries in a splay tree whose
//! comparator only looks at the key. It inherits the tree's O(1) snapshots:
//! cloning a map and updating the clone never affects the original.
//!
//! # Examples
//!
//! ```rust
//! use persistent_splay::persistent::SplayMap;
//!
//! let mut outer = SplayMap::new();
//! outer.insert("x", 1);
//! outer.insert("y", 2);
//!
//! // a nested scope shadows `x` without touching the outer one
//! let mut inner = outer.clone();
//! inner.insert("x", 10);
//!
//! assert_eq!(outer.get(&"x"), Some(&1));
//! assert_eq!(inner.get(&"x"), Some(&10));
//! assert_eq!(inner.get(&"y"), Some(&2));
//! ```

use std::cmp::Ordering;
use std::fmt;

use super::comparator::{Comparator, NaturalOrder};
use super::error::InvariantViolation;
use super::splay::{SplayTree, SplayTreeIterator};

// =============================================================================
// Entry Ordering
// =============================================================================

/// Orders `(key, value)` entries by key alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EntryOrder<C>(pub C);

impl<K, V, C: Comparator<K>> Comparator<(K, V)> for EntryOrder<C> {
    #[inline]
    fn compare(&self, left: &(K, V), right: &(K, V)) -> Ordering {
        self.0.compare(&left.0, &right.0)
    }
}

// =============================================================================
// SplayMap Definition
// =============================================================================

/// A persistent ordered map based on a splay tree.
///
/// Keys are ordered by `C`, which defaults to [`NaturalOrder`]. Cloning is
/// O(1). Lookups through [`get`](Self::get) leave the map untouched;
/// [`get_memoize`](Self::get_memoize) moves the entry to the root so that
/// repeated lookups of a hot key are cheap.
///
/// # Examples
///
/// ```rust
/// use persistent_splay::persistent::SplayMap;
///
/// let map: SplayMap<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &2]);
/// ```
pub struct SplayMap<K, V, C = NaturalOrder> {
    tree: SplayTree<(K, V), EntryOrder<C>>,
}

impl<K, V> SplayMap<K, V, NaturalOrder> {
    /// Creates an empty map ordered by the keys' [`Ord`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> SplayMap<K, V, C> {
    /// Creates an empty map whose keys are ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: SplayTree::with_comparator(EntryOrder(comparator)),
        }
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of entries.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Removes every entry from this handle.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns `true` if both maps share the same root node.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.tree.ptr_eq(&other.tree)
    }

    /// Returns an iterator over the entries in ascending key order.
    pub fn iter(&self) -> SplayMapIterator<'_, K, V> {
        SplayMapIterator {
            entries: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.tree.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.tree.iter().map(|(_, value)| value)
    }
}

impl<K, V, C: Comparator<K>> SplayMap<K, V, C> {
    /// Returns the value stored under `key`, without reshaping the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_splay::persistent::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, "one");
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let comparator = &self.tree.comparator().0;
        self.tree
            .find_by(|(stored, _)| comparator.compare(key, stored))
            .map(|(_, value)| value)
    }

    /// Returns `true` if the map holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Checks that the keys are in strictly ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] naming the first out-of-order entry.
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        self.tree.check_invariant()
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> SplayMap<K, V, C> {
    /// Inserts `value` under `key`, replacing the previous entry for an equal
    /// key. Returns `true` if an entry was replaced.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert((key, value))
    }

    /// Like [`get`](Self::get), but moves the entry to the root.
    ///
    /// On a miss the map may still be reshaped; its entries never change.
    pub fn get_memoize(&mut self, key: &K) -> Option<&V> {
        self.tree
            .find_memoize_with(|order, (stored, _)| order.0.compare(key, stored))
            .map(|(_, value)| value)
    }

    /// Removes the entry for `key`. Returns whether one was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree
            .erase_with(|order, (stored, _)| order.0.compare(key, stored))
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// An iterator over the entries of a [`SplayMap`], in ascending key order.
pub struct SplayMapIterator<'a, K, V> {
    entries: SplayTreeIterator<'a, (K, V)>,
}

impl<'a, K, V> Iterator for SplayMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(key, value)| (key, value))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Clone> Clone for SplayMap<K, V, C> {
    /// O(1): shares every node with `self`.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C: Default> Default for SplayMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Comparator<K> + Default> FromIterator<(K, V)> for SplayMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> Extend<(K, V)> for SplayMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a SplayMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = SplayMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for SplayMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for SplayMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SplayMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for SplayMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for SplayMap<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
struct SplayMapVisitor<K, V, C> {
    marker: std::marker::PhantomData<(K, V, C)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for SplayMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de> + Clone,
    V: serde::Deserialize<'de> + Clone,
    C: Comparator<K> + Default,
{
    type Value = SplayMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = SplayMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for SplayMap<K, V, C>
where
    K: serde::Deserialize<'de> + Clone,
    V: serde::Deserialize<'de> + Clone,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(SplayMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
