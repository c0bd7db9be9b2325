//! Immutable weight-balanced tree nodes.
//!
//! A [`TreeNode`] owns its two subtrees through [`Link`]s
//! (`Option<Arc<TreeNode>>`), so any number of list versions may share any
//! subtree. A node caches two aggregates at construction time: the element
//! count of its subtree (`size`, used for all indexed navigation) and a
//! caller-defined [`Measure`] (used by specialized lists, e.g. a text-length
//! total when the elements are text chunks). Nodes are never modified after
//! construction.

use std::sync::Arc;

/// A derived per-node aggregate, recomputed bottom-up whenever a node is
/// built.
///
/// The element count is always cached on the node itself; a measure adds a
/// second, domain-specific total. `()` is the trivial measure for lists that
/// need nothing beyond element counts.
pub trait Measure<E>: Clone {
    /// Combines the aggregates of the two subtrees with the node's own value.
    fn measure(value: &E, left: Option<&Self>, right: Option<&Self>) -> Self;
}

impl<E> Measure<E> for () {
    fn measure(_value: &E, _left: Option<&Self>, _right: Option<&Self>) -> Self {}
}

/// An optional, shared edge to a subtree.
pub type Link<E, M> = Option<Arc<TreeNode<E, M>>>;

/// An immutable node in a weight-balanced binary tree.
pub struct TreeNode<E, M> {
    left: Link<E, M>,
    value: E,
    right: Link<E, M>,
    size: usize,
    measure: M,
}

/// Element count of an optional subtree.
pub fn link_size<E, M>(link: Option<&TreeNode<E, M>>) -> usize {
    link.map_or(0, TreeNode::size)
}

impl<E, M: Measure<E>> TreeNode<E, M> {
    /// Builds a node over the given subtrees, computing both cached
    /// aggregates.
    pub fn new(left: Link<E, M>, value: E, right: Link<E, M>) -> Arc<Self> {
        let size = link_size(left.as_deref()) + link_size(right.as_deref()) + 1;
        let measure = M::measure(
            &value,
            left.as_deref().map(TreeNode::measure),
            right.as_deref().map(TreeNode::measure),
        );
        Arc::new(TreeNode {
            left,
            value,
            right,
            size,
            measure,
        })
    }

    /// Builds a childless node.
    pub fn leaf(value: E) -> Arc<Self> {
        Self::new(None, value, None)
    }
}

impl<E, M> TreeNode<E, M> {
    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn left_link(&self) -> &Link<E, M> {
        &self.left
    }

    pub(crate) fn right_link(&self) -> &Link<E, M> {
        &self.right
    }

    /// The element stored in this node.
    pub fn value(&self) -> &E {
        &self.value
    }

    /// The number of elements in this subtree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The cached aggregate for this subtree.
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// The element at `index` within this subtree, navigating by the cached
    /// left-subtree sizes.
    pub fn get(&self, mut index: usize) -> Option<&E> {
        let mut node = self;
        loop {
            if let Some(left) = node.left() {
                if index < left.size {
                    node = left;
                    continue;
                }
                index -= left.size;
            }

            if index == 0 {
                return Some(&node.value);
            }

            index -= 1;
            node = node.right()?;
        }
    }

    /// The index of the first occurrence of `target` in this subtree, where
    /// `index` is the index of the subtree's leftmost element.
    pub fn index_of(&self, target: &E, mut index: usize) -> Option<usize>
    where
        E: PartialEq,
    {
        if let Some(left) = self.left() {
            if let Some(found) = left.index_of(target, index) {
                return Some(found);
            }
            index += left.size;
        }

        if self.value == *target {
            return Some(index);
        }

        self.right().and_then(|right| right.index_of(target, index + 1))
    }

    /// Windowed [`index_of`](Self::index_of): only positions in
    /// `[from, to)` are considered, and the result is relative to `from`.
    pub fn index_of_in(&self, target: &E, mut index: usize, from: usize, to: usize) -> Option<usize>
    where
        E: PartialEq,
    {
        if let Some(left) = self.left() {
            if from < index + left.size {
                if let Some(found) = left.index_of_in(target, index, from, to) {
                    return Some(found);
                }
            }
            index += left.size;
        }

        if index < to {
            if from <= index && self.value == *target {
                return Some(index - from);
            }

            index += 1;
            if index < to {
                if let Some(right) = self.right() {
                    return right.index_of_in(target, index, from, to);
                }
            }
        }

        None
    }

    /// The index of the last occurrence of `target` in this subtree, where
    /// `index` is the index just past the subtree's rightmost element.
    pub fn last_index_of(&self, target: &E, mut index: usize) -> Option<usize>
    where
        E: PartialEq,
    {
        if let Some(right) = self.right() {
            if let Some(found) = right.last_index_of(target, index) {
                return Some(found);
            }
            index -= right.size;
        }

        index -= 1;
        if self.value == *target {
            return Some(index);
        }

        self.left().and_then(|left| left.last_index_of(target, index))
    }

    /// Windowed [`last_index_of`](Self::last_index_of), relative to `from`.
    pub fn last_index_of_in(
        &self,
        target: &E,
        mut index: usize,
        from: usize,
        to: usize,
    ) -> Option<usize>
    where
        E: PartialEq,
    {
        if let Some(right) = self.right() {
            if to > index - right.size {
                if let Some(found) = right.last_index_of_in(target, index, from, to) {
                    return Some(found);
                }
            }
            index -= right.size;
        }

        index -= 1;
        if index < to {
            if from <= index && self.value == *target {
                return Some(index - from);
            }

            if from < index {
                if let Some(left) = self.left() {
                    return left.last_index_of_in(target, index, from, to);
                }
            }
        }

        None
    }

    /// In-order flush of this subtree into `out`.
    pub fn push_to(&self, out: &mut Vec<E>)
    where
        E: Clone,
    {
        if let Some(left) = self.left() {
            left.push_to(out);
        }

        out.push(self.value.clone());

        if let Some(right) = self.right() {
            right.push_to(out);
        }
    }

    /// Windowed in-order flush: elements at positions `[from, to)` are pushed
    /// in order, where `index` is the index of the subtree's leftmost element.
    pub fn push_range_to(&self, out: &mut Vec<E>, mut index: usize, from: usize, to: usize)
    where
        E: Clone,
    {
        if let Some(left) = self.left() {
            if from < index + left.size {
                left.push_range_to(out, index, from, to);
            }
            index += left.size;
        }

        if index < to {
            if from <= index {
                out.push(self.value.clone());
            }

            index += 1;
            if index < to {
                if let Some(right) = self.right() {
                    right.push_range_to(out, index, from, to);
                }
            }
        }
    }
}

impl<E: std::fmt::Debug, M> std::fmt::Debug for TreeNode<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeNode")
            .field("value", &self.value)
            .field("size", &self.size)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
