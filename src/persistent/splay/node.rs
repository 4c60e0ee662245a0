//! Tree nodes and the shared links between them.

use crate::persistent::ReferenceCounter;

/// A shared, possibly absent, reference to a subtree.
pub(crate) type Link<T> = Option<ReferenceCounter<Node<T>>>;

// =============================================================================
// Side
// =============================================================================

/// Which child of a node a walk went through.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the other side.
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node of a splay tree.
///
/// The share count of a node is the strong count of the reference counter
/// owning it. A node whose count is above one is visible from more than one
/// parent or tree handle and must not be modified; callers obtain a private
/// copy through [`exclusive`] first.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a node without children.
    pub(crate) const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn child(&self, side: Side) -> &Link<T> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) const fn child_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Returns a mutable view of `node`, cloning it first if it is shared.
///
/// After the call `node` is the only reference to its target. A clone keeps
/// the same value and children (whose share counts go up by one), so nothing
/// reachable from another handle is ever written through the returned view.
#[inline]
pub(crate) fn exclusive<T: Clone>(node: &mut ReferenceCounter<Node<T>>) -> &mut Node<T> {
    ReferenceCounter::make_mut(node)
}

// Splaying can leave a tree shaped like a list, so the default recursive drop
// could exhaust the stack. Unlink uniquely owned children onto a heap stack
// instead; shared children just lose one reference.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut pending: Vec<ReferenceCounter<Self>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(child) = pending.pop() {
            if let Some(mut node) = ReferenceCounter::into_inner(child) {
                pending.extend(node.left.take());
                pending.extend(node.right.take());
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
