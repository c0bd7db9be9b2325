//! Bidirectional list traversal.
//!
//! A [`Cursor`] sits between elements of a [`TreeList`] (or a window of one)
//! and steps in either direction in amortized O(1). It remembers the path
//! from the root to the current node as a stack of ancestor references plus a
//! bit path recording the direction taken at each of them, so a step only
//! touches the fringe of the tree. An empty stack means the cursor is past
//! the end; stepping backward from there re-descends to the rightmost
//! element.

use crate::list::TreeList;
use crate::node::{link_size, TreeNode};

/// A bidirectional cursor over a [`TreeList`], optionally restricted to the
/// window `[from, to)`.
///
/// The cursor is a plain value: cloning it forks the traversal.
pub struct Cursor<'a, E, M> {
    list: &'a TreeList<E, M>,
    /// Ancestors of the current node, root first.
    nodes: Vec<&'a TreeNode<E, M>>,
    /// Direction bits for `nodes`, least significant bit = deepest step,
    /// 1 = went right.
    path: u64,
    /// Absolute position of the element `next` would return.
    index: usize,
    from: usize,
    to: usize,
}

impl<'a, E, M> Cursor<'a, E, M> {
    /// Positions a cursor before the element at absolute position `index`,
    /// restricted to `[from, to)`. Callers validate the positions.
    pub(crate) fn over(list: &'a TreeList<E, M>, index: usize, from: usize, to: usize) -> Self {
        let mut cursor = Cursor {
            list,
            nodes: Vec::new(),
            path: 0,
            index,
            from,
            to,
        };
        cursor.descend_to(index);
        cursor
    }

    /// Rebuilds the ancestor stack for the element at absolute position
    /// `target`, or leaves the past-the-end sentinel when there is none.
    fn descend_to(&mut self, target: usize) {
        self.nodes.clear();
        self.path = 0;

        let mut remaining = target;
        let mut node = self.list.root();
        let mut arrived_right = false;
        while let Some(current) = node {
            self.nodes.push(current);
            self.path = self.path << 1 | u64::from(arrived_right);

            let left_size = link_size(current.left());
            if remaining < left_size {
                arrived_right = false;
                node = current.left();
            } else if remaining == left_size {
                return;
            } else {
                arrived_right = true;
                remaining -= left_size + 1;
                node = current.right();
            }
        }

        // target == len: past-the-end sentinel.
        self.nodes.clear();
        self.path = 0;
    }

    /// Whether a forward step would yield an element.
    pub fn has_next(&self) -> bool {
        self.index < self.to
    }

    /// Whether a backward step would yield an element.
    pub fn has_previous(&self) -> bool {
        self.index > self.from
    }

    /// Window-relative position of the element `next` would return.
    pub fn next_index(&self) -> usize {
        self.index - self.from
    }

    /// Window-relative position of the element `previous` would return.
    pub fn previous_index(&self) -> Option<usize> {
        if self.index > self.from {
            Some(self.index - self.from - 1)
        } else {
            None
        }
    }

    /// Remaining forward elements.
    pub fn remaining(&self) -> usize {
        self.to - self.index
    }

    /// Steps forward, returning the element crossed.
    pub fn next(&mut self) -> Option<&'a E> {
        if self.index >= self.to {
            return None;
        }
        self.index += 1;

        let node = *self.nodes.last()?;
        let value = node.value();

        if let Some(right) = node.right() {
            // Successor is the leftmost element of the right subtree.
            self.path = self.path << 1 | 1;
            self.nodes.push(right);
            let mut current = right;
            while let Some(left) = current.left() {
                self.path <<= 1;
                self.nodes.push(left);
                current = left;
            }
        } else {
            // Climb until a step that came from a left child; that ancestor
            // is the successor. Emptying the stack leaves the sentinel.
            loop {
                self.nodes.pop();
                if self.nodes.is_empty() {
                    self.path = 0;
                    break;
                }
                let came_from_left = self.path & 1 == 0;
                self.path >>= 1;
                if came_from_left {
                    break;
                }
            }
        }

        Some(value)
    }

    /// Steps backward, returning the element crossed.
    pub fn previous(&mut self) -> Option<&'a E> {
        if self.index <= self.from {
            return None;
        }
        self.index -= 1;

        if self.nodes.is_empty() {
            // Past-the-end sentinel: the predecessor is the rightmost
            // element of the whole tree.
            let mut node = self.list.root();
            let mut arrived_right = false;
            while let Some(current) = node {
                self.nodes.push(current);
                self.path = self.path << 1 | u64::from(arrived_right);
                arrived_right = true;
                node = current.right();
            }
            return self.nodes.last().map(|node| node.value());
        }

        let node = *self.nodes.last()?;
        if let Some(left) = node.left() {
            // Predecessor is the rightmost element of the left subtree.
            self.path <<= 1;
            self.nodes.push(left);
            let mut current = left;
            while let Some(right) = current.right() {
                self.path = self.path << 1 | 1;
                self.nodes.push(right);
                current = right;
            }
            return self.nodes.last().map(|node| node.value());
        }

        // Climb until a step that came from a right child; that ancestor is
        // the predecessor.
        loop {
            self.nodes.pop();
            let came_from_right = self.path & 1 == 1;
            self.path >>= 1;
            if came_from_right {
                return self.nodes.last().map(|node| node.value());
            }
        }
    }
}

impl<E, M> Clone for Cursor<'_, E, M> {
    fn clone(&self) -> Self {
        Cursor {
            list: self.list,
            nodes: self.nodes.clone(),
            path: self.path,
            index: self.index,
            from: self.from,
            to: self.to,
        }
    }
}

/// Forward [`Iterator`] adapter over a [`Cursor`].
pub struct Iter<'a, E, M> {
    cursor: Cursor<'a, E, M>,
}

impl<E, M> Clone for Iter<'_, E, M> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor.clone(),
        }
    }
}

impl<'a, E, M> Iter<'a, E, M> {
    pub(crate) fn new(cursor: Cursor<'a, E, M>) -> Self {
        Iter { cursor }
    }
}

impl<'a, E, M> Iterator for Iter<'a, E, M> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        self.cursor.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl<E, M> ExactSizeIterator for Iter<'_, E, M> {}
