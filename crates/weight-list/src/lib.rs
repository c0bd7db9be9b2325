//! Persistent list backed by a weight-balanced binary tree.
//!
//! A [`TreeList`] is an immutable sequence: every edit returns a new list
//! and leaves the old one intact, sharing all unchanged subtrees through
//! `Arc` links. Indexed access, insertion, and removal are O(log n); a
//! whole-list copy is a pointer bump.
//!
//! Balance follows the weight rule (neither subtree more than [`DELTA`]
//! times heavier than its sibling), repaired by the rotations in
//! [`balance`]. The per-node [`Measure`] hook lets a specialized list cache
//! a second aggregate next to the element count; `rope-doc` uses it to keep
//! text lengths on a chunk tree.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`node`] | [`TreeNode`], cached size and measure, indexed read helpers |
//! | [`balance`] | rotations, `glue`, the `DELTA`/`RATIO` constants |
//! | [`list`] | [`TreeList`] / [`SubList`] facades and [`ListError`] |
//! | [`cursor`] | bidirectional [`Cursor`] and the [`Iter`] adapter |

pub mod balance;
pub mod cursor;
pub mod list;
pub mod node;

pub use balance::{DELTA, RATIO};
pub use cursor::{Cursor, Iter};
pub use list::{ListError, SubList, TreeList};
pub use node::{Link, Measure, TreeNode};
