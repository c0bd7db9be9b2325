//! Text chunks and the chunk tree.
//!
//! Document text is stored as UTF-16 code units, split into immutable chunks
//! of at most [`CHUNK_SIZE`] units. The chunks sit in a [`weight_list`]
//! tree whose nodes carry a [`TextLen`] measure, so the tree answers both
//! "which chunk is at chunk index i" (by element count) and "which chunk
//! holds code unit p" (by text length) in O(log chunks).

use std::sync::Arc;

use weight_list::{Measure, TreeList, TreeNode};

/// Maximum number of code units per chunk.
pub const CHUNK_SIZE: usize = 32_000;

/// An immutable run of UTF-16 code units, shared between document versions.
pub type Chunk = Arc<[u16]>;

/// Per-node aggregate: total code units in the subtree's chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLen(pub usize);

impl Measure<Chunk> for TextLen {
    fn measure(value: &Chunk, left: Option<&Self>, right: Option<&Self>) -> Self {
        TextLen(left.map_or(0, |m| m.0) + value.len() + right.map_or(0, |m| m.0))
    }
}

/// The chunk tree of one document version.
pub type ChunkList = TreeList<Chunk, TextLen>;

/// Total code units held by the chunk tree.
pub fn text_len(chunks: &ChunkList) -> usize {
    chunks.root().map_or(0, |root| root.measure().0)
}

fn link_text_len(node: Option<&TreeNode<Chunk, TextLen>>) -> usize {
    node.map_or(0, |node| node.measure().0)
}

/// The code unit at text position `position`, navigating by the cached
/// text lengths.
pub fn unit_at(chunks: &ChunkList, position: usize) -> Option<u16> {
    let mut node = chunks.root()?;
    let mut position = position;
    loop {
        let left_len = link_text_len(node.left());
        if position < left_len {
            node = node.left()?;
            continue;
        }
        position -= left_len;

        let chunk = node.value();
        if position < chunk.len() {
            return Some(chunk[position]);
        }
        position -= chunk.len();
        node = node.right()?;
    }
}

/// Locates the chunk holding text position `position`: returns the chunk's
/// index in the tree, the text position of its first unit, and the offset of
/// `position` within it.
///
/// A position on a chunk boundary resolves to the following chunk, so the
/// returned offset is strictly less than the chunk length except for an
/// empty tree or `position == text_len`.
pub fn locate(chunks: &ChunkList, position: usize) -> Option<(usize, usize, usize)> {
    let mut node = chunks.root()?;
    let mut remaining = position;
    let mut chunk_index = 0;
    let mut chunk_start = 0;
    loop {
        let left_len = link_text_len(node.left());
        if remaining < left_len {
            node = node.left()?;
            continue;
        }

        let left_count = node.left().map_or(0, TreeNode::size);
        let chunk = node.value();
        if remaining - left_len < chunk.len() {
            return Some((
                chunk_index + left_count,
                chunk_start + left_len,
                remaining - left_len,
            ));
        }

        chunk_index += left_count + 1;
        chunk_start += left_len + chunk.len();
        remaining -= left_len + chunk.len();
        node = node.right()?;
    }
}

/// Splits `units` into maximal chunks and appends them to `out`.
pub fn push_chunks(out: &mut Vec<Chunk>, units: &[u16]) {
    for piece in units.chunks(CHUNK_SIZE) {
        out.push(Arc::from(piece));
    }
}

/// The code units in text positions `[start, end)`, in order.
///
/// Callers validate the range against [`text_len`].
pub fn collect_units(chunks: &ChunkList, start: usize, end: usize) -> Vec<u16> {
    let mut out = Vec::with_capacity(end - start);
    if start >= end {
        return out;
    }

    let Some((first_chunk, chunk_start, offset)) = locate(chunks, start) else {
        return out;
    };

    let mut remaining = end - (chunk_start + offset);
    let mut cursor = match chunks.cursor(first_chunk) {
        Ok(cursor) => cursor,
        Err(_) => return out,
    };
    let mut offset = offset;
    while remaining > 0 {
        let Some(chunk) = cursor.next() else {
            break;
        };
        let take = remaining.min(chunk.len() - offset);
        out.extend_from_slice(&chunk[offset..offset + take]);
        remaining -= take;
        offset = 0;
    }
    out
}
