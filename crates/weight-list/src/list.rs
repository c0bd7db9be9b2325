//! The persistent list facade.
//!
//! A [`TreeList`] is a value: `insert`, `remove`, and `set` return new lists
//! and leave the receiver untouched. Versions share unchanged subtrees, so an
//! edit costs O(log n) new nodes. The optional measure parameter `M` lets
//! specialized lists cache a domain aggregate on every node (see
//! [`Measure`]); plain lists use the trivial `()` measure.

use std::sync::Arc;

use crate::balance::{balance_left, balance_right, glue, subtree_balanced};
use crate::cursor::{Cursor, Iter};
use crate::node::{link_size, Link, Measure, TreeNode};

/// Errors from indexed list operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// An index fell outside the valid range for the operation.
    #[error("index out of bounds: index = {index}, size = {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A range's start exceeded its end.
    #[error("inverted range: start = {start}, end = {end}")]
    InvertedRange { start: usize, end: usize },
}

/// A persistent list backed by a weight-balanced binary tree.
///
/// Indexed reads and edits are O(log n). The list is cheap to clone (one
/// `Arc` bump) and safe to share across threads when `E` and `M` are.
pub struct TreeList<E, M = ()> {
    root: Link<E, M>,
}

impl<E, M> Clone for TreeList<E, M> {
    fn clone(&self) -> Self {
        TreeList {
            root: self.root.clone(),
        }
    }
}

impl<E, M> Default for TreeList<E, M> {
    fn default() -> Self {
        TreeList { root: None }
    }
}

impl<E, M> TreeList<E, M> {
    /// An empty list. Allocation-free.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        link_size(self.root.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, exposing the cached measure of the whole list.
    pub fn root(&self) -> Option<&TreeNode<E, M>> {
        self.root.as_deref()
    }

    /// The element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&E> {
        self.root()?.get(index)
    }

    /// The index of the first element equal to `target`.
    pub fn index_of(&self, target: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        self.root()?.index_of(target, 0)
    }

    /// The index of the last element equal to `target`.
    pub fn last_index_of(&self, target: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        self.root()?.last_index_of(target, self.len())
    }

    pub fn contains(&self, target: &E) -> bool
    where
        E: PartialEq,
    {
        self.index_of(target).is_some()
    }

    /// All elements in order.
    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            root.push_to(&mut out);
        }
        out
    }

    /// A bidirectional cursor positioned before the element at `index`
    /// (`index == len` positions it past the end).
    pub fn cursor(&self, index: usize) -> Result<Cursor<'_, E, M>, ListError> {
        if index > self.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(Cursor::over(self, index, 0, self.len()))
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> Iter<'_, E, M> {
        Iter::new(Cursor::over(self, 0, 0, self.len()))
    }

    /// A read-only window over positions `[from, to)` of this list.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<SubList<E, M>, ListError> {
        if from > to {
            return Err(ListError::InvertedRange {
                start: from,
                end: to,
            });
        }
        if to > self.len() {
            return Err(ListError::IndexOutOfBounds {
                index: to,
                size: self.len(),
            });
        }
        Ok(SubList {
            list: self.clone(),
            from,
            to,
        })
    }

    /// Whether every node satisfies the weight invariant. Test hook.
    pub fn is_balanced(&self) -> bool {
        subtree_balanced(self.root())
    }
}

impl<E: Clone, M: Measure<E>> TreeList<E, M> {
    /// Returns a list with `element` inserted before position `index`.
    /// `index == len` appends.
    pub fn insert(&self, index: usize, element: E) -> Result<Self, ListError> {
        if index > self.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(TreeList {
            root: Some(insert_at(self.root.as_ref(), index, element)),
        })
    }

    /// Returns a list with `element` appended.
    pub fn push(&self, element: E) -> Self {
        TreeList {
            root: Some(insert_at(self.root.as_ref(), self.len(), element)),
        }
    }

    /// Returns a list without the element at `index`.
    pub fn remove(&self, index: usize) -> Result<Self, ListError> {
        let Some(root) = self.root.as_ref() else {
            return Err(ListError::IndexOutOfBounds { index, size: 0 });
        };
        if index >= root.size() {
            return Err(ListError::IndexOutOfBounds {
                index,
                size: root.size(),
            });
        }
        Ok(TreeList {
            root: remove_at(root, index),
        })
    }

    /// Returns a list with the element at `index` replaced. The tree shape
    /// is unchanged, so no rebalancing is needed.
    pub fn set(&self, index: usize, element: E) -> Result<Self, ListError> {
        let Some(root) = self.root.as_ref() else {
            return Err(ListError::IndexOutOfBounds { index, size: 0 });
        };
        if index >= root.size() {
            return Err(ListError::IndexOutOfBounds {
                index,
                size: root.size(),
            });
        }
        Ok(TreeList {
            root: Some(set_at(root, index, element)),
        })
    }

    /// Builds a balanced list from an iterator with a known exact length,
    /// in O(n) without any rebalancing.
    pub fn from_exact_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut iter = iter.into_iter();
        let len = iter.len();
        TreeList {
            root: build_balanced(&mut iter, len),
        }
    }
}

/// Inserts before `index` in the subtree, rebalancing the spine on the way
/// back up.
fn insert_at<E, M>(link: Option<&Arc<TreeNode<E, M>>>, index: usize, element: E) -> Arc<TreeNode<E, M>>
where
    E: Clone,
    M: Measure<E>,
{
    let Some(node) = link else {
        return TreeNode::leaf(element);
    };

    let left_size = link_size(node.left());
    if index <= left_size {
        balance_left(
            Some(insert_at(node.left_link().as_ref(), index, element)),
            node.value().clone(),
            node.right_link().clone(),
        )
    } else {
        balance_right(
            node.left_link().clone(),
            node.value().clone(),
            Some(insert_at(
                node.right_link().as_ref(),
                index - left_size - 1,
                element,
            )),
        )
    }
}

/// Removes the element at `index`, gluing the children where the node itself
/// is removed.
fn remove_at<E, M>(node: &Arc<TreeNode<E, M>>, index: usize) -> Link<E, M>
where
    E: Clone,
    M: Measure<E>,
{
    let left_size = link_size(node.left());
    if index < left_size {
        let left = node
            .left_link()
            .as_ref()
            .and_then(|left| remove_at(left, index));
        Some(balance_right(
            left,
            node.value().clone(),
            node.right_link().clone(),
        ))
    } else if index == left_size {
        glue(node.left_link().clone(), node.right_link().clone())
    } else {
        let right = node
            .right_link()
            .as_ref()
            .and_then(|right| remove_at(right, index - left_size - 1));
        Some(balance_left(node.left_link().clone(), node.value().clone(), right))
    }
}

/// Replaces the element at `index`, copying only the path to it.
fn set_at<E, M>(node: &Arc<TreeNode<E, M>>, index: usize, element: E) -> Arc<TreeNode<E, M>>
where
    E: Clone,
    M: Measure<E>,
{
    let left_size = link_size(node.left());
    if index < left_size {
        let left = node.left_link().as_ref().map(|left| set_at(left, index, element));
        TreeNode::new(left, node.value().clone(), node.right_link().clone())
    } else if index == left_size {
        TreeNode::new(node.left_link().clone(), element, node.right_link().clone())
    } else {
        let right = node
            .right_link()
            .as_ref()
            .map(|right| set_at(right, index - left_size - 1, element));
        TreeNode::new(node.left_link().clone(), node.value().clone(), right)
    }
}

/// Consumes the next `len` elements of `iter` into a perfectly balanced
/// subtree. The split puts `len / 2` elements on the right.
fn build_balanced<E, M, I>(iter: &mut I, len: usize) -> Link<E, M>
where
    E: Clone,
    M: Measure<E>,
    I: Iterator<Item = E>,
{
    if len == 0 {
        return None;
    }

    let size_right = len / 2;
    let size_left = len - size_right - 1;
    let left = build_balanced(iter, size_left);
    let value = iter.next()?;
    let right = build_balanced(iter, size_right);
    Some(TreeNode::new(left, value, right))
}

impl<E: Clone, M: Measure<E>> From<Vec<E>> for TreeList<E, M> {
    fn from(values: Vec<E>) -> Self {
        Self::from_exact_iter(values)
    }
}

impl<E: Clone, M: Measure<E>> FromIterator<E> for TreeList<E, M> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_exact_iter(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<E: PartialEq, M> PartialEq for TreeList<E, M> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter_refs_eq(other)
    }
}

impl<E: Eq, M> Eq for TreeList<E, M> {}

impl<E: PartialEq, M> TreeList<E, M> {
    fn iter_refs_eq(&self, other: &Self) -> bool {
        let mut a = Cursor::over(self, 0, 0, self.len());
        let mut b = Cursor::over(other, 0, 0, other.len());
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => {}
                _ => return false,
            }
        }
    }
}

impl<E: std::fmt::Debug, M> std::fmt::Debug for TreeList<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        let mut cursor = Cursor::over(self, 0, 0, self.len());
        while let Some(value) = cursor.next() {
            list.entry(value);
        }
        list.finish()
    }
}

impl<'a, E, M> IntoIterator for &'a TreeList<E, M> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A read-only window over a range of a [`TreeList`].
///
/// Holds its own clone of the backing list, so it stays valid however the
/// original is used afterwards.
#[derive(Clone)]
pub struct SubList<E, M = ()> {
    list: TreeList<E, M>,
    from: usize,
    to: usize,
}

impl<E, M> SubList<E, M> {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// The window as `(from, to)` positions of the backing list.
    pub fn range(&self) -> (usize, usize) {
        (self.from, self.to)
    }

    /// The element at `index` within the window.
    pub fn get(&self, index: usize) -> Option<&E> {
        if index >= self.len() {
            return None;
        }
        self.list.get(self.from + index)
    }

    /// The first occurrence of `target` within the window, relative to it.
    pub fn index_of(&self, target: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        self.list.root()?.index_of_in(target, 0, self.from, self.to)
    }

    /// The last occurrence of `target` within the window, relative to it.
    pub fn last_index_of(&self, target: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        self.list
            .root()?
            .last_index_of_in(target, self.list.len(), self.from, self.to)
    }

    pub fn contains(&self, target: &E) -> bool
    where
        E: PartialEq,
    {
        self.index_of(target).is_some()
    }

    /// The window's elements in order.
    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.list.root() {
            root.push_range_to(&mut out, 0, self.from, self.to);
        }
        out
    }

    /// A cursor over the window, positioned before its element at `index`.
    pub fn cursor(&self, index: usize) -> Result<Cursor<'_, E, M>, ListError> {
        if index > self.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(Cursor::over(&self.list, self.from + index, self.from, self.to))
    }

    pub fn iter(&self) -> Iter<'_, E, M> {
        Iter::new(Cursor::over(&self.list, self.from, self.from, self.to))
    }

    /// A narrower window within this one, in window-relative positions.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<SubList<E, M>, ListError> {
        if from > to {
            return Err(ListError::InvertedRange {
                start: from,
                end: to,
            });
        }
        if to > self.len() {
            return Err(ListError::IndexOutOfBounds {
                index: to,
                size: self.len(),
            });
        }
        Ok(SubList {
            list: self.list.clone(),
            from: self.from + from,
            to: self.from + to,
        })
    }
}
