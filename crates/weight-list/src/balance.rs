//! Weight balancing.
//!
//! Balance is maintained by element counts: a node is balanced when neither
//! subtree holds more than [`DELTA`] times the elements of the other. The
//! functions here are the only place tree shape is repaired; every list
//! operation is expressed in terms of them.

use std::sync::Arc;

use crate::node::{link_size, Link, Measure, TreeNode};

/// Maximum allowed weight ratio between siblings.
pub const DELTA: usize = 3;
/// Threshold deciding between a single and a double rotation.
pub const RATIO: usize = 2;

/// Builds a balanced node from subtrees where the *left* side may have just
/// grown by one element.
///
/// When the left subtree outweighs the right by more than `DELTA`, a single
/// or double rotation restores the invariant; the choice compares the inner
/// grandchild against `RATIO` times the outer one.
pub fn balance_left<E, M>(left: Link<E, M>, value: E, right: Link<E, M>) -> Arc<TreeNode<E, M>>
where
    E: Clone,
    M: Measure<E>,
{
    let Some(l) = left else {
        return match right {
            None => TreeNode::leaf(value),
            Some(r) => TreeNode::new(None, value, Some(r)),
        };
    };

    match right {
        None => {
            let ll = l.left_link().clone();
            let lr = l.right_link().clone();
            match (ll, lr) {
                (None, None) => TreeNode::new(Some(l), value, None),
                (None, Some(lr)) => TreeNode::new(
                    Some(TreeNode::leaf(l.value().clone())),
                    lr.value().clone(),
                    Some(TreeNode::leaf(value)),
                ),
                (Some(ll), None) => {
                    TreeNode::new(Some(ll), l.value().clone(), Some(TreeNode::leaf(value)))
                }
                (Some(ll), Some(lr)) => {
                    if lr.size() < RATIO * ll.size() {
                        TreeNode::new(
                            Some(ll),
                            l.value().clone(),
                            Some(TreeNode::new(Some(lr), value, None)),
                        )
                    } else {
                        TreeNode::new(
                            Some(TreeNode::new(
                                Some(ll),
                                l.value().clone(),
                                lr.left_link().clone(),
                            )),
                            lr.value().clone(),
                            Some(TreeNode::new(lr.right_link().clone(), value, None)),
                        )
                    }
                }
            }
        }
        Some(r) => {
            if l.size() > DELTA * r.size() {
                // A subtree that outweighs a non-empty sibling by more than
                // DELTA has two children itself whenever the rest of the
                // tree is balanced.
                match (l.left_link().clone(), l.right_link().clone()) {
                    (Some(ll), Some(lr)) => {
                        if lr.size() < RATIO * ll.size() {
                            TreeNode::new(
                                Some(ll),
                                l.value().clone(),
                                Some(TreeNode::new(Some(lr), value, Some(r))),
                            )
                        } else {
                            TreeNode::new(
                                Some(TreeNode::new(
                                    Some(ll),
                                    l.value().clone(),
                                    lr.left_link().clone(),
                                )),
                                lr.value().clone(),
                                Some(TreeNode::new(lr.right_link().clone(), value, Some(r))),
                            )
                        }
                    }
                    _ => TreeNode::new(Some(l), value, Some(r)),
                }
            } else {
                TreeNode::new(Some(l), value, Some(r))
            }
        }
    }
}

/// Mirror image of [`balance_left`], for growth on the right.
pub fn balance_right<E, M>(left: Link<E, M>, value: E, right: Link<E, M>) -> Arc<TreeNode<E, M>>
where
    E: Clone,
    M: Measure<E>,
{
    let Some(r) = right else {
        return match left {
            None => TreeNode::leaf(value),
            Some(l) => TreeNode::new(Some(l), value, None),
        };
    };

    match left {
        None => {
            let rl = r.left_link().clone();
            let rr = r.right_link().clone();
            match (rl, rr) {
                (None, None) => TreeNode::new(None, value, Some(r)),
                (None, Some(rr)) => {
                    TreeNode::new(Some(TreeNode::leaf(value)), r.value().clone(), Some(rr))
                }
                (Some(rl), None) => TreeNode::new(
                    Some(TreeNode::leaf(value)),
                    rl.value().clone(),
                    Some(TreeNode::leaf(r.value().clone())),
                ),
                (Some(rl), Some(rr)) => {
                    if rl.size() < RATIO * rr.size() {
                        TreeNode::new(
                            Some(TreeNode::new(None, value, Some(rl))),
                            r.value().clone(),
                            Some(rr),
                        )
                    } else {
                        TreeNode::new(
                            Some(TreeNode::new(None, value, rl.left_link().clone())),
                            rl.value().clone(),
                            Some(TreeNode::new(
                                rl.right_link().clone(),
                                r.value().clone(),
                                Some(rr),
                            )),
                        )
                    }
                }
            }
        }
        Some(l) => {
            if r.size() > DELTA * l.size() {
                match (r.left_link().clone(), r.right_link().clone()) {
                    (Some(rl), Some(rr)) => {
                        if rl.size() < RATIO * rr.size() {
                            TreeNode::new(
                                Some(TreeNode::new(Some(l), value, Some(rl))),
                                r.value().clone(),
                                Some(rr),
                            )
                        } else {
                            TreeNode::new(
                                Some(TreeNode::new(Some(l), value, rl.left_link().clone())),
                                rl.value().clone(),
                                Some(TreeNode::new(
                                    rl.right_link().clone(),
                                    r.value().clone(),
                                    Some(rr),
                                )),
                            )
                        }
                    }
                    _ => TreeNode::new(Some(l), value, Some(r)),
                }
            } else {
                TreeNode::new(Some(l), value, Some(r))
            }
        }
    }
}

/// Merges two balanced subtrees with no separating element, as deletion
/// requires: the extreme element of the larger side is removed and becomes
/// the new separator.
pub fn glue<E, M>(left: Link<E, M>, right: Link<E, M>) -> Link<E, M>
where
    E: Clone,
    M: Measure<E>,
{
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(l), Some(r)) => {
            if l.size() > r.size() {
                let (separator, rest) = remove_last(&l);
                Some(balance_right(rest, separator, Some(r)))
            } else {
                let (separator, rest) = remove_first(&r);
                Some(balance_left(Some(l), separator, rest))
            }
        }
    }
}

/// Removes the leftmost element, rebalancing the spine on the way back up
/// (the left side shrank at every node along it).
fn remove_first<E, M>(node: &Arc<TreeNode<E, M>>) -> (E, Link<E, M>)
where
    E: Clone,
    M: Measure<E>,
{
    match node.left_link() {
        None => (node.value().clone(), node.right_link().clone()),
        Some(left) => {
            let (element, rest) = remove_first(left);
            (
                element,
                Some(balance_right(
                    rest,
                    node.value().clone(),
                    node.right_link().clone(),
                )),
            )
        }
    }
}

/// Removes the rightmost element, rebalancing the spine on the way back up
/// (the right side shrank at every node along it).
fn remove_last<E, M>(node: &Arc<TreeNode<E, M>>) -> (E, Link<E, M>)
where
    E: Clone,
    M: Measure<E>,
{
    match node.right_link() {
        None => (node.value().clone(), node.left_link().clone()),
        Some(right) => {
            let (element, rest) = remove_last(right);
            (
                element,
                Some(balance_left(
                    node.left_link().clone(),
                    node.value().clone(),
                    rest,
                )),
            )
        }
    }
}

/// Checks the weight invariant on every node of a subtree.
pub(crate) fn subtree_balanced<E, M>(node: Option<&TreeNode<E, M>>) -> bool {
    let Some(node) = node else {
        return true;
    };

    let left = link_size(node.left());
    let right = link_size(node.right());
    if left > 0 && right > 0 && (left > DELTA * right || right > DELTA * left) {
        return false;
    }

    subtree_balanced(node.left()) && subtree_balanced(node.right())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<E: Clone, M>(node: &TreeNode<E, M>) -> Vec<E> {
        let mut out = Vec::new();
        node.push_to(&mut out);
        out
    }

    #[test]
    fn balance_left_double_rotation_keeps_order() {
        // Left subtree of 4 against a right leaf, inner grandchild heavy.
        let left = TreeNode::<i32, ()>::new(
            Some(TreeNode::leaf(1)),
            2,
            Some(TreeNode::new(None, 3, Some(TreeNode::leaf(4)))),
        );
        let root = balance_left(Some(left), 5, Some(TreeNode::leaf(6)));
        assert_eq!(contents(&root), vec![1, 2, 3, 4, 5, 6]);
        assert!(subtree_balanced(Some(&root)));
    }

    #[test]
    fn balance_left_single_rotation_keeps_order() {
        // Outer grandchild heavy: a single rotation suffices.
        let left = TreeNode::<i32, ()>::new(
            Some(TreeNode::new(Some(TreeNode::leaf(1)), 2, Some(TreeNode::leaf(3)))),
            4,
            Some(TreeNode::leaf(5)),
        );
        let root = balance_left(Some(left), 6, Some(TreeNode::leaf(7)));
        assert_eq!(contents(&root), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(subtree_balanced(Some(&root)));
    }

    #[test]
    fn balance_right_mirrors_balance_left() {
        let right = TreeNode::<i32, ()>::new(
            Some(TreeNode::new(Some(TreeNode::leaf(3)), 4, None)),
            5,
            Some(TreeNode::leaf(6)),
        );
        let root = balance_right(Some(TreeNode::leaf(1)), 2, Some(right));
        assert_eq!(contents(&root), vec![1, 2, 3, 4, 5, 6]);
        assert!(subtree_balanced(Some(&root)));
    }

    #[test]
    fn glue_keeps_order_and_balance() {
        let left = TreeNode::<i32, ()>::new(Some(TreeNode::leaf(1)), 2, Some(TreeNode::leaf(3)));
        let right = TreeNode::new(Some(TreeNode::leaf(4)), 5, Some(TreeNode::leaf(6)));
        let glued = glue(Some(left), Some(right));

        let root = glued.as_deref().map(|n| {
            let mut out = Vec::new();
            n.push_to(&mut out);
            out
        });
        assert_eq!(root, Some(vec![1, 2, 3, 4, 5, 6]));
        assert!(subtree_balanced(glued.as_deref()));
    }

    #[test]
    fn glue_of_one_side_returns_it() {
        let only = TreeNode::<i32, ()>::leaf(9);
        assert!(glue::<i32, ()>(None, None).is_none());
        assert_eq!(
            glue(Some(only.clone()), None).map(|n| *n.value()),
            Some(9)
        );
        assert_eq!(glue(None, Some(only)).map(|n| *n.value()), Some(9));
    }
}
