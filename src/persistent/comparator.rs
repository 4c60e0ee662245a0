//! Three-way comparators used to order values in a splay tree.
//!
//! A tree never calls `Ord` directly; it asks its [`Comparator`] instead.
//! This lets a consumer order values by a projection (an identifier inside a
//! declaration, say) without wrapping them in a newtype.
//!
//! # Examples
//!
//! ```rust
//! use persistent_splay::persistent::{Comparator, NaturalOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//!
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

// =============================================================================
// Comparator Trait
// =============================================================================

/// A total order over values of type `T`.
///
/// Implementations must be consistent for the whole lifetime of a tree:
/// comparing the same two values must always give the same answer, and the
/// relation must be a strict weak order whose `Equal` classes are the keys.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

// =============================================================================
// NaturalOrder
// =============================================================================

/// Orders values by their [`Ord`] implementation.
///
/// This is the default comparator of
/// [`SplayTree`](crate::persistent::SplayTree) and
/// [`SplayMap`](crate::persistent::SplayMap).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

// =============================================================================
// Tests
// =============================================================================
