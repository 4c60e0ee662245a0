//! Persistent (immutable) ordered containers.
//!
//! This module provides ordered containers whose copies share structure:
//!
//! - [`SplayTree`]: Persistent ordered set (splay tree)
//! - [`SplayMap`]: Persistent ordered map (splay tree of key/value entries)
//!
//! # Structural Sharing
//!
//! Copying a container is O(1): the copy points at the same root node.
//! Updating either copy clones only the nodes on the path it touches, so
//! every earlier version stays valid and unchanged.
//!
//! # Examples
//!
//! ## `SplayTree`
//!
//! ```rust
//! use persistent_splay::persistent::SplayTree;
//!
//! let mut tree: SplayTree<i32> = [3, 1, 4].into_iter().collect();
//! let snapshot = tree.clone();
//!
//! tree.insert(2);
//! assert_eq!(tree.to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(snapshot.to_vec(), vec![1, 3, 4]); // Original unchanged
//! ```
//!
//! ## `SplayMap`
//!
//! ```rust
//! use persistent_splay::persistent::SplayMap;
//!
//! let mut map = SplayMap::new();
//! map.insert("one".to_string(), 1);
//!
//! let mut updated = map.clone();
//! updated.insert("one".to_string(), 100);
//! assert_eq!(map.get(&"one".to_string()), Some(&1));       // Original unchanged
//! assert_eq!(updated.get(&"one".to_string()), Some(&100)); // New version
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type used for tree nodes.
///
/// When the `arc` feature is enabled (the default), this is
/// `std::sync::Arc`: share counts are atomic and snapshots can be sent to,
/// and mutated independently on, other threads.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`, which is
/// faster but confines every tree to one thread.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod comparator;
mod error;
mod splay;
mod splay_map;

pub use comparator::Comparator;
pub use comparator::NaturalOrder;
pub use error::InvariantViolation;
pub use splay::SplayTree;
pub use splay::SplayTreeIntoIterator;
pub use splay::SplayTreeIterator;
pub use splay::SplayTreeStructure;
pub use splay_map::EntryOrder;
pub use splay_map::SplayMap;
pub use splay_map::SplayMapIterator;

// =============================================================================
// Tests
// =============================================================================
