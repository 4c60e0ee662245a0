//! Error types for the persistent containers.
//!
//! The containers have no user-facing failure modes: looking up or removing
//! an absent value yields `None` or `false`. The only error is a broken
//! ordering, which points at a defect (or at a comparator that is not a
//! consistent total order) and is reported by the invariant verifier.

/// Reports that the values of a tree are not in strictly ascending order.
///
/// Returned by [`SplayTree::check_invariant`](crate::persistent::SplayTree::check_invariant)
/// and [`SplayMap::check_invariant`](crate::persistent::SplayMap::check_invariant).
///
/// # Examples
///
/// ```rust
/// use persistent_splay::persistent::InvariantViolation;
///
/// let error = InvariantViolation { position: 3 };
/// assert_eq!(
///     format!("{error}"),
///     "splay tree ordering violated: in-order value 3 is not greater than value 2"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvariantViolation {
    /// In-order index of the first value that does not compare greater than
    /// its predecessor.
    pub position: usize,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "splay tree ordering violated: in-order value {} is not greater than value {}",
            self.position,
            self.position.saturating_sub(1)
        )
    }
}

impl std::error::Error for InvariantViolation {}
