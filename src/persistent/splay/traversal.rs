//! Read-only walks over a node graph: in-order iteration, the ordering
//! verifier and the structural dump.
//!
//! None of these recurse; a splay tree may be arbitrarily deep.

use std::cmp::Ordering;
use std::fmt;

use super::node::{Link, Node};
use crate::persistent::ReferenceCounter;
use crate::persistent::comparator::Comparator;
use crate::persistent::error::InvariantViolation;

// =============================================================================
// Iterator
// =============================================================================

/// An in-order iterator over the values of a
/// [`SplayTree`](crate::persistent::SplayTree).
///
/// Values are yielded in ascending comparator order. The iterator borrows the
/// tree; it holds the chain of pending ancestors and never modifies a node.
pub struct SplayTreeIterator<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> SplayTreeIterator<'a, T> {
    pub(crate) fn new(root: &'a Link<T>) -> Self {
        let mut iterator = Self { stack: Vec::new() };
        iterator.push_left_spine(root.as_deref());
        iterator
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for SplayTreeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

impl<T> std::iter::FusedIterator for SplayTreeIterator<'_, T> {}

impl<T> Clone for SplayTreeIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

/// An owning iterator over the values of a
/// [`SplayTree`](crate::persistent::SplayTree), in ascending order.
pub struct SplayTreeIntoIterator<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> SplayTreeIntoIterator<T> {
    pub(crate) const fn new(values: std::vec::IntoIter<T>) -> Self {
        Self { values }
    }
}

impl<T> Iterator for SplayTreeIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> ExactSizeIterator for SplayTreeIntoIterator<T> {
    fn len(&self) -> usize {
        self.values.len()
    }
}

// =============================================================================
// Verifier
// =============================================================================

/// Checks that the in-order sequence under `root` is strictly ascending
/// under `comparator`, which is equivalent to the search-tree ordering.
pub(crate) fn check_order<T, C>(root: &Link<T>, comparator: &C) -> Result<(), InvariantViolation>
where
    C: Comparator<T>,
{
    let mut values = SplayTreeIterator::new(root);
    let Some(mut previous) = values.next() else {
        return Ok(());
    };
    for (offset, value) in values.enumerate() {
        if comparator.compare(previous, value) != Ordering::Less {
            return Err(InvariantViolation {
                position: offset + 1,
            });
        }
        previous = value;
    }
    Ok(())
}

// =============================================================================
// Structural Dump
// =============================================================================

/// Renders the node graph of a
/// [`SplayTree`](crate::persistent::SplayTree) for debugging.
///
/// An inner node is written as `(value:share left right)`, a leaf as
/// `value:share` and an empty subtree as `()`, where `share` is the number
/// of references to the node (parents in any snapshot plus tree handles).
///
/// Created by [`SplayTree::structure`](crate::persistent::SplayTree::structure).
pub struct SplayTreeStructure<'a, T> {
    root: &'a Link<T>,
}

impl<'a, T> SplayTreeStructure<'a, T> {
    pub(crate) const fn new(root: &'a Link<T>) -> Self {
        Self { root }
    }
}

enum Step<'a, T> {
    Visit(&'a Link<T>),
    Text(&'static str),
}

impl<T: fmt::Display> fmt::Display for SplayTreeStructure<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps = vec![Step::Visit(self.root)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Text(text) => formatter.write_str(text)?,
                Step::Visit(None) => formatter.write_str("()")?,
                Step::Visit(Some(node)) => {
                    let share = ReferenceCounter::strong_count(node);
                    if node.is_leaf() {
                        write!(formatter, "{}:{share}", node.value)?;
                    } else {
                        write!(formatter, "({}:{share} ", node.value)?;
                        steps.push(Step::Text(")"));
                        steps.push(Step::Visit(&node.right));
                        steps.push(Step::Text(" "));
                        steps.push(Step::Visit(&node.left));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Debug for SplayTreeStructure<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

// =============================================================================
// Tests
// =============================================================================
