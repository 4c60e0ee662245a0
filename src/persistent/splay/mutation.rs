//! Copy-on-write mutations: insert, pull, pull-max and erase.
//!
//! All of them work on a bare root link and leave the accessed node at the
//! root. Nodes shared with another snapshot are cloned on the way down and
//! never written to.

use std::cmp::Ordering;

use super::node::{Link, Node, exclusive};
use super::path::{descend, descend_rightmost};
use super::rotation::splay_to_top;
use crate::persistent::ReferenceCounter;

/// Inserts `value` or overwrites the stored value equal to it, then splays
/// the affected node to the root.
///
/// `compare` is called as `compare(&value, stored)`. Returns `true` when an
/// existing value was replaced.
pub(crate) fn insert<T, F>(root: &mut Link<T>, value: T, mut compare: F) -> bool
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut descent = descend(root, |stored| compare(&value, stored));
    let replaced = descent.found.is_some();
    let node = match descent.found {
        Some(mut node) => {
            exclusive(&mut node).value = value;
            node
        }
        None => ReferenceCounter::new(Node::leaf(value)),
    };
    *root = Some(splay_to_top(&mut descent.path, node));
    replaced
}

/// Splays the node matching `probe` to the root.
///
/// On a miss the last node visited is splayed instead, so the shape changes
/// even though the content does not. Returns whether a match was found.
pub(crate) fn pull<T, P>(root: &mut Link<T>, probe: P) -> bool
where
    T: Clone,
    P: FnMut(&T) -> Ordering,
{
    let mut descent = descend(root, probe);
    let found = descent.found.is_some();
    let node = match descent.found {
        Some(node) => node,
        None => match descent.path.pop() {
            Some(entry) => entry.node,
            None => return false,
        },
    };
    *root = Some(splay_to_top(&mut descent.path, node));
    found
}

/// Splays the maximum of the tree to the root. The new root has no right
/// child.
pub(crate) fn pull_max<T: Clone>(root: &mut Link<T>) {
    if let Some(top) = root.take() {
        let (mut path, max) = descend_rightmost(top);
        *root = Some(splay_to_top(&mut path, max));
    }
}

/// Removes the value matching `probe`. Returns whether one was removed.
///
/// The match is first splayed to the root; its left subtree then has its
/// maximum pulled up, and the right subtree hangs off that maximum.
pub(crate) fn erase<T, P>(root: &mut Link<T>, probe: P) -> bool
where
    T: Clone,
    P: FnMut(&T) -> Ordering,
{
    if !pull(root, probe) {
        return false;
    }
    let Some(mut top) = root.take() else {
        return false;
    };
    let owned = exclusive(&mut top);
    let mut left = owned.left.take();
    let right = owned.right.take();
    drop(top);

    *root = match (left.is_some(), right) {
        (false, right) => right,
        (true, None) => left,
        (true, Some(right)) => {
            pull_max(&mut left);
            if let Some(max) = left.as_mut() {
                exclusive(max).right = Some(right);
            }
            left
        }
    };
    true
}

// =============================================================================
// Tests
// =============================================================================
