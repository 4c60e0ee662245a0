//! # persistent-splay
//!
//! Persistent, structurally-shared splay trees for Rust.
//!
//! ## Overview
//!
//! This library provides ordered containers meant to back immutable
//! snapshot-style state, such as the nested binding scopes of an
//! interpreter. Every container can be copied in O(1), and the copies may
//! then be updated independently:
//!
//! - **`SplayTree`**: an ordered set with an injected comparator
//! - **`SplayMap`**: an ordered map built on the same tree
//!
//! Accessed values are splayed to the root, giving amortized logarithmic
//! operations and cheap repeated access to hot keys. Rotations never write
//! to a node that another snapshot can see: nodes on the access path are
//! copied first when shared.
//!
//! ## Feature Flags
//!
//! - `arc` (default): atomic share counts; snapshots are `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` for the containers
//! - `verify`: re-check the ordering invariant after every mutation in
//!   debug builds
//!
//! ## Example
//!
//! ```rust
//! use persistent_splay::prelude::*;
//!
//! let mut scope: SplayMap<&str, i32> = SplayMap::new();
//! scope.insert("x", 1);
//!
//! let mut nested = scope.clone();
//! nested.insert("x", 2);
//! nested.insert("y", 3);
//!
//! assert_eq!(scope.get(&"x"), Some(&1));
//! assert_eq!(nested.get(&"x"), Some(&2));
//! assert!(!scope.contains_key(&"y"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the containers and their comparator types.
///
/// # Usage
///
/// ```rust
/// use persistent_splay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
