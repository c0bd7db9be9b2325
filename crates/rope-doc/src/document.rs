//! Immutable text documents.
//!
//! A [`Document`] holds UTF-16 text as a balanced tree of shared chunks
//! (see [`crate::chunk`]). `replace` is the only edit: it returns a new
//! document that reuses every chunk the edit did not touch. As a side
//! effect it also re-chunks the *receiver* around the edit seam, so the old
//! and new versions share slices of split chunks instead of keeping whole
//! pre-split chunks alive; the receiver's content never changes, only its
//! chunk boundaries. That swap makes the chunk list an RCU cell
//! ([`ArcSwap`]) rather than a plain field.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::chunk::{self, Chunk, ChunkList};
use crate::seq::{SubSeq, UnitSeq};

/// Errors from indexed document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// An offset fell outside the document.
    #[error("offset out of bounds: offset = {offset}, length = {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// A range's end fell outside the document.
    #[error("range end out of bounds: end = {end}, length = {len}")]
    RangeOutOfBounds { end: usize, len: usize },

    /// A range's start exceeded its end.
    #[error("inverted range: start = {start}, end = {end}")]
    InvertedRange { start: usize, end: usize },
}

/// An immutable UTF-16 text document with O(log n) indexed access and
/// structure-sharing edits.
pub struct Document {
    chunks: ArcSwap<ChunkList>,
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Document {
            chunks: ArcSwap::new(self.chunks.load_full()),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// The empty document.
    pub fn empty() -> Self {
        Document {
            chunks: ArcSwap::new(Arc::new(ChunkList::new())),
        }
    }

    /// A document holding the UTF-16 encoding of `text`.
    pub fn new(text: &str) -> Self {
        Self::from_units_vec(text.encode_utf16().collect())
    }

    /// A document holding the given code units verbatim. Lone surrogates are
    /// kept as-is; they read back as single code points.
    pub fn from_units(units: &[u16]) -> Self {
        let mut chunks = Vec::new();
        chunk::push_chunks(&mut chunks, units);
        Self::from_chunks(chunks)
    }

    fn from_units_vec(units: Vec<u16>) -> Self {
        Self::from_units(&units)
    }

    fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Document {
            chunks: ArcSwap::new(Arc::new(ChunkList::from_exact_iter(chunks))),
        }
    }

    /// The current chunk tree. Snapshots stay valid after later `replace`
    /// calls re-chunk the document.
    pub(crate) fn chunk_list(&self) -> Arc<ChunkList> {
        self.chunks.load_full()
    }

    /// The document length in UTF-16 code units.
    pub fn len(&self) -> usize {
        chunk::text_len(&self.chunks.load())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The code unit at `index`, or `None` past the end.
    pub fn unit_at(&self, index: usize) -> Option<u16> {
        chunk::unit_at(&self.chunks.load(), index)
    }

    /// The code units in `[start, end)`.
    pub fn units(&self, start: usize, end: usize) -> Result<Vec<u16>, DocumentError> {
        let len = self.len();
        if end > len {
            return Err(DocumentError::RangeOutOfBounds { end, len });
        }
        if start > end {
            return Err(DocumentError::InvertedRange { start, end });
        }
        Ok(chunk::collect_units(&self.chunks.load(), start, end))
    }

    /// All code units of the document.
    pub fn to_units(&self) -> Vec<u16> {
        let chunks = self.chunks.load();
        chunk::collect_units(&chunks, 0, chunk::text_len(&chunks))
    }

    /// The text in `[start, end)` as a `String`. Lone surrogates become
    /// replacement characters.
    pub fn substring(&self, start: usize, end: usize) -> Result<String, DocumentError> {
        Ok(String::from_utf16_lossy(&self.units(start, end)?))
    }

    /// A lightweight view of `[start, end)` borrowing this document.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<SubSeq<&Document>, DocumentError> {
        SubSeq::new(self, start, end)
    }

    /// A standalone document holding the text of `[start, end)`, sharing
    /// chunks with this one where possible.
    pub fn sub_document(&self, start: usize, end: usize) -> Result<Document, DocumentError> {
        let len = self.len();
        if end > len {
            return Err(DocumentError::RangeOutOfBounds { end, len });
        }
        if start > end {
            return Err(DocumentError::InvertedRange { start, end });
        }
        let trimmed = self.replace_units(end, len - end, &[])?;
        trimmed.replace_units(0, start, &[])
    }

    /// Whether two documents share their entire chunk tree. A cheap
    /// identity test; equal content does not imply `ptr_eq`.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        let a = self.chunks.load();
        let b = other.chunks.load();
        match (a.root(), b.root()) {
            (None, None) => true,
            (Some(x), Some(y)) => std::ptr::eq(x, y),
            _ => false,
        }
    }

    /// Replaces `[offset, offset + remove)` with the UTF-16 encoding of
    /// `insert`, returning the new document.
    pub fn replace(&self, offset: usize, remove: usize, insert: &str) -> Result<Document, DocumentError> {
        self.replace_units(offset, remove, &insert.encode_utf16().collect::<Vec<_>>())
    }

    /// Replaces `[offset, offset + remove)` with the given code units.
    ///
    /// Chunks untouched by the edit are shared with the result. The
    /// receiver's chunk list is re-chunked along the edit seam so that both
    /// versions share the split fragments; its content is unchanged.
    pub fn replace_units(
        &self,
        offset: usize,
        remove: usize,
        insert: &[u16],
    ) -> Result<Document, DocumentError> {
        let snapshot = self.chunks.load_full();
        let len = chunk::text_len(&snapshot);
        if offset > len {
            return Err(DocumentError::OffsetOutOfBounds { offset, len });
        }
        let end = offset + remove;
        if end > len {
            return Err(DocumentError::RangeOutOfBounds { end, len });
        }

        if remove == 0 && insert.is_empty() {
            return Ok(self.clone());
        }

        if chunk::collect_units(&snapshot, offset, end) == insert {
            // Replacing text with identical text.
            return Ok(self.clone());
        }

        if offset == 0 && remove == len {
            return Ok(Document::from_units(insert));
        }

        // One pass over the chunks, reusing every chunk the edit does not
        // touch. `current` rebuilds the receiver's content with chunk
        // boundaries aligned to the edit seam; `new` is the result. Both
        // lists share all fragments except the removed and inserted text.
        let mut current: Vec<Chunk> = Vec::new();
        let mut new: Vec<Chunk> = Vec::new();
        let mut iter = snapshot.to_vec().into_iter();
        let mut chunk = iter.next();
        let mut text_offset = 0;

        // Whole chunks before the edit are shared untouched.
        while text_offset < offset {
            match chunk {
                Some(ref c) if text_offset + c.len() <= offset => {
                    text_offset += c.len();
                    current.push(c.clone());
                    new.push(c.clone());
                    chunk = iter.next();
                }
                _ => break,
            }
        }

        let mut offset_into_chunk = 0;
        if text_offset < offset {
            // The edit starts inside this chunk: the head is shared.
            offset_into_chunk = offset - text_offset;
            if let Some(c) = chunk.as_ref() {
                let head: Chunk = Arc::from(&c[..offset_into_chunk]);
                current.push(head.clone());
                new.push(head);
            }
        }

        if remove > 0 {
            if let Some(c) = chunk.clone() {
                if offset_into_chunk + remove < c.len() {
                    // Removal confined to this chunk.
                    current.push(Arc::from(&c[offset_into_chunk..offset_into_chunk + remove]));
                    offset_into_chunk += remove;
                } else {
                    // Removal runs to at least the end of this chunk.
                    current.push(Arc::from(&c[offset_into_chunk..]));
                    let mut remaining = offset_into_chunk + remove - c.len();
                    chunk = iter.next();

                    while remaining > 0 {
                        match chunk {
                            Some(ref c) if remaining >= c.len() => {
                                remaining -= c.len();
                                current.push(c.clone());
                                chunk = iter.next();
                            }
                            _ => break,
                        }
                    }

                    offset_into_chunk = remaining;
                    if remaining > 0 {
                        if let Some(c) = chunk.as_ref() {
                            current.push(Arc::from(&c[..remaining]));
                        }
                    }
                }
            }
        }

        // Inserted text becomes fresh chunks in the new document only.
        chunk::push_chunks(&mut new, insert);

        if offset_into_chunk > 0 {
            // The rest of the chunk at the edit seam is shared.
            if let Some(c) = chunk.as_ref() {
                let tail: Chunk = Arc::from(&c[offset_into_chunk..]);
                current.push(tail.clone());
                new.push(tail);
            }
            chunk = iter.next();
        }

        // Whole chunks after the edit are shared untouched.
        while let Some(c) = chunk {
            current.push(c.clone());
            new.push(c);
            chunk = iter.next();
        }

        debug_assert_eq!(
            flatten(&current),
            chunk::collect_units(&snapshot, 0, len),
            "re-chunked receiver must keep its content"
        );

        self.chunks.store(Arc::new(ChunkList::from_exact_iter(current)));
        Ok(Document {
            chunks: ArcSwap::new(Arc::new(ChunkList::from_exact_iter(new))),
        })
    }
}

fn flatten(chunks: &[Chunk]) -> Vec<u16> {
    chunks.iter().flat_map(|chunk| chunk.iter().copied()).collect()
}

impl UnitSeq for Document {
    fn len(&self) -> usize {
        Document::len(self)
    }

    fn unit_at(&self, index: usize) -> Option<u16> {
        Document::unit_at(self, index)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf16_lossy(&self.to_units()))
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("chunks", &self.chunks.load().len())
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_units() == other.to_units()
    }
}

impl Eq for Document {}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::new(text)
    }
}
