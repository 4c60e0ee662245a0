//! Per-operation record of a root-to-target walk.
//!
//! Every node pushed here is exclusively owned by the walk and has its child
//! on the recorded side detached. The detached child is the next node of the
//! walk; the rotations in [`rotation`](super::rotation) plug the holes back.

use smallvec::SmallVec;

use super::node::{Link, Node, Side, exclusive};
use crate::persistent::ReferenceCounter;
use std::cmp::Ordering;

/// Path entries kept inline before the buffer spills to the heap.
///
/// Splaying keeps typical depths well below this.
const INLINE_DEPTH: usize = 32;

/// A visited node together with the side the walk continued on.
pub(crate) struct PathEntry<T> {
    pub(crate) side: Side,
    pub(crate) node: ReferenceCounter<Node<T>>,
}

/// The stack of nodes between the root and the current position of a walk.
pub(crate) struct PathStack<T> {
    entries: SmallVec<[PathEntry<T>; INLINE_DEPTH]>,
}

impl<T> PathStack<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, side: Side, node: ReferenceCounter<Node<T>>) {
        debug_assert!(node.child(side).is_none());
        self.entries.push(PathEntry { side, node });
    }

    pub(crate) fn pop(&mut self) -> Option<PathEntry<T>> {
        self.entries.pop()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Descent
// =============================================================================

/// Outcome of a copy-on-write walk toward a target.
pub(crate) struct Descent<T> {
    /// Exclusive nodes from the root down to the last node above `found`
    /// (or above the empty slot where the target would go).
    pub(crate) path: PathStack<T>,
    /// The node holding a value equal to the target, if any.
    pub(crate) found: Option<ReferenceCounter<Node<T>>>,
}

/// Walks from `root` toward the target described by `probe`, detaching the
/// tree from `root` as it goes.
///
/// `probe` reports where the target lies relative to a stored value. Every
/// node visited is made exclusive before it is inspected, so the returned
/// path and node may be rewired freely. `root` is left empty; the caller must
/// splay and store the new root.
pub(crate) fn descend<T, P>(root: &mut Link<T>, mut probe: P) -> Descent<T>
where
    T: Clone,
    P: FnMut(&T) -> Ordering,
{
    let mut path = PathStack::new();
    let mut current = root.take();
    while let Some(mut node) = current {
        let owned = exclusive(&mut node);
        let side = match probe(&owned.value) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => {
                return Descent {
                    path,
                    found: Some(node),
                };
            }
        };
        current = owned.child_mut(side).take();
        path.push(side, node);
    }
    Descent { path, found: None }
}

/// Walks the right spine of `root`, detaching it as it goes, and returns the
/// path together with the rightmost node.
pub(crate) fn descend_rightmost<T: Clone>(
    mut node: ReferenceCounter<Node<T>>,
) -> (PathStack<T>, ReferenceCounter<Node<T>>) {
    let mut path = PathStack::new();
    while let Some(next) = exclusive(&mut node).right.take() {
        path.push(Side::Right, node);
        node = next;
    }
    (path, node)
}

// =============================================================================
// Tests
// =============================================================================
