//! Splay rotations.
//!
//! Notation in the comments below: `(x A B)` is a node `x` with left subtree
//! `A` and right subtree `B`. `n` is the node being splayed, `p` its parent
//! and `g` its grandparent.

use super::node::{Node, Side, exclusive};
use super::path::PathStack;
use crate::persistent::ReferenceCounter;

/// Promotes `node` over `parent`, where `node` was detached from `parent`'s
/// `side` child slot.
///
/// For `side == Left`: `(p (n A B) C)` becomes `(n A (p B C))`, and the
/// mirror image for `Right`.
fn rotate<T: Clone>(
    mut node: ReferenceCounter<Node<T>>,
    mut parent: ReferenceCounter<Node<T>>,
    side: Side,
) -> ReferenceCounter<Node<T>> {
    let inner = exclusive(&mut node).child_mut(side.opposite()).take();
    let parent_slot = exclusive(&mut parent).child_mut(side);
    debug_assert!(parent_slot.is_none());
    *parent_slot = inner;
    *exclusive(&mut node).child_mut(side.opposite()) = Some(parent);
    node
}

/// Splays `node` to the top of the walk recorded in `path`, returning the new
/// root. `path` is empty afterwards.
///
/// Every node involved must be exclusive and every path entry must have its
/// recorded child slot empty; [`descend`](super::path::descend) guarantees
/// both.
pub(crate) fn splay_to_top<T: Clone>(
    path: &mut PathStack<T>,
    mut node: ReferenceCounter<Node<T>>,
) -> ReferenceCounter<Node<T>> {
    while let Some(parent) = path.pop() {
        node = match path.pop() {
            // zig: (p (n A B) C) => (n A (p B C))
            None => rotate(node, parent.node, parent.side),
            // zig-zig: (g (p (n A B) C) D) => (n A (p B (g C D)))
            Some(grandparent) if grandparent.side == parent.side => {
                let parent = rotate(parent.node, grandparent.node, grandparent.side);
                rotate(node, parent, grandparent.side)
            }
            // zig-zag: (g (p A (n B C)) D) => (n (p A B) (g C D))
            Some(grandparent) => {
                let node = rotate(node, parent.node, parent.side);
                rotate(node, grandparent.node, grandparent.side)
            }
        };
    }
    debug_assert!(path.is_empty());
    node
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::splay::node::Link;
    use crate::persistent::splay::path::descend;
    use rstest::rstest;

    fn node(value: i32, left: Link<i32>, right: Link<i32>) -> Link<i32> {
        Some(ReferenceCounter::new(Node { value, left, right }))
    }

    fn leaf(value: i32) -> Link<i32> {
        node(value, None, None)
    }

    /// Renders a subtree as `(value left right)`, `value` for leaves and `.`
    /// for empty links.
    fn shape(link: &Link<i32>) -> String {
        match link {
            None => ".".to_string(),
            Some(node) if node.is_leaf() => node.value.to_string(),
            Some(node) => format!(
                "({} {} {})",
                node.value,
                shape(&node.left),
                shape(&node.right)
            ),
        }
    }

    fn splay(mut root: Link<i32>, target: i32) -> Link<i32> {
        let mut descent = descend(&mut root, |stored| target.cmp(stored));
        let found = descent.found.expect("target is present");
        Some(splay_to_top(&mut descent.path, found))
    }

    #[rstest]
    fn test_splay_root_is_noop() {
        let root = node(2, leaf(1), leaf(3));
        assert_eq!(shape(&splay(root, 2)), "(2 1 3)");
    }

    #[rstest]
    #[case::zig_left(node(2, node(1, leaf(0), leaf(15)), leaf(3)), 1, "(1 0 (2 15 3))")]
    #[case::zig_right(node(2, leaf(1), node(3, leaf(25), leaf(4))), 3, "(3 (2 1 25) 4)")]
    fn test_zig(#[case] root: Link<i32>, #[case] target: i32, #[case] expected: &str) {
        assert_eq!(shape(&splay(root, target)), expected);
    }

    #[rstest]
    fn test_zig_zig_left() {
        // (g (p (n A B) C) D) => (n A (p B (g C D)))
        let root = node(
            30,
            node(20, node(10, leaf(5), leaf(15)), leaf(25)),
            leaf(35),
        );
        assert_eq!(shape(&splay(root, 10)), "(10 5 (20 15 (30 25 35)))");
    }

    #[rstest]
    fn test_zig_zig_right() {
        // (g A (p B (n C D))) => (n (p (g A B) C) D)
        let root = node(
            10,
            leaf(5),
            node(20, leaf(15), node(30, leaf(25), leaf(35))),
        );
        assert_eq!(shape(&splay(root, 30)), "(30 (20 (10 5 15) 25) 35)");
    }

    #[rstest]
    fn test_zig_zag_left_right() {
        // (g (p A (n B C)) D) => (n (p A B) (g C D))
        let root = node(
            30,
            node(10, leaf(5), node(20, leaf(15), leaf(25))),
            leaf(35),
        );
        assert_eq!(shape(&splay(root, 20)), "(20 (10 5 15) (30 25 35))");
    }

    #[rstest]
    fn test_zig_zag_right_left() {
        // (g A (p (n B C) D)) => (n (g A B) (p C D))
        let root = node(
            10,
            leaf(5),
            node(30, node(20, leaf(15), leaf(25)), leaf(35)),
        );
        assert_eq!(shape(&splay(root, 20)), "(20 (10 5 15) (30 25 35))");
    }

    #[rstest]
    fn test_deep_splay_combines_steps() {
        // left spine 4 -> 3 -> 2 -> 1: zig-zig then zig
        let root = node(4, node(3, node(2, leaf(1), None), None), None);
        assert_eq!(shape(&splay(root, 1)), "(1 . (4 (2 . 3) .))");
    }

    #[rstest]
    fn test_splay_leaves_other_snapshot_untouched() {
        let original = node(
            30,
            node(20, node(10, leaf(5), leaf(15)), leaf(25)),
            leaf(35),
        );
        let splayed = splay(original.clone(), 10);
        assert_eq!(shape(&original), "(30 (20 (10 5 15) 25) 35)");
        assert_eq!(shape(&splayed), "(10 5 (20 15 (30 25 35)))");
    }
}
