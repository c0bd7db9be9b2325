//! Chunk-caching document reader.
//!
//! [`DocumentReader`] keeps a cursor into the document's chunk tree instead
//! of resolving every position from the root, so sequential `advance` and
//! `rewind` touch the tree only on chunk boundaries. It captures the chunk
//! list at construction time; later edits re-chunk the document, and the
//! cursor's chunk indices are only meaningful against the captured snapshot.
//!
//! The reader tracks two unit positions: the `current` one (where
//! [`current_code_point`](CodePointReader::current_code_point) reads) and
//! the `next` one (just past the current code point). Stepping forward
//! promotes `next` to `current`; stepping backward re-reads behind
//! `current`.

use std::sync::Arc;

use crate::chunk::{self, Chunk, ChunkList};
use crate::document::Document;
use crate::reader::{combine, is_high_surrogate, is_low_surrogate, push_units, CodePointReader, ReaderError};

/// A [`CodePointReader`] over a [`Document`], optimized for sequential
/// reads.
pub struct DocumentReader {
    document: Document,
    chunks: Arc<ChunkList>,
    current_chunk_index: usize,
    current_chunk: Option<Chunk>,
    next_chunk_index: usize,
    next_chunk: Option<Chunk>,
    current_chunk_start: isize,
    current_pos_in_chunk: isize,
    next_pos_in_chunk: isize,
    current_code_point: Option<u32>,
    current_unit: Option<u16>,
}

impl DocumentReader {
    /// A reader positioned at the first code unit of `document`.
    pub fn new(document: &Document) -> Self {
        let chunks = document.chunk_list();
        let mut reader = DocumentReader {
            document: document.clone(),
            chunks,
            current_chunk_index: 0,
            current_chunk: None,
            next_chunk_index: 0,
            next_chunk: None,
            current_chunk_start: 0,
            current_pos_in_chunk: 0,
            next_pos_in_chunk: 0,
            current_code_point: None,
            current_unit: None,
        };
        reader.seek(0, 0, 0);
        reader
    }

    /// A reader at an arbitrary position in `[-1, len]`.
    pub fn with_position(document: &Document, position: isize) -> Result<Self, ReaderError> {
        let mut reader = Self::new(document);
        reader.set_position(position)?;
        Ok(reader)
    }

    /// The document this reader was built over.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Repositions the cursor on the chunk at `chunk_index`, with
    /// `chunk_start` the text position of the chunk's first unit and
    /// `pos_in_chunk` the offset within it, then reads the code point
    /// there. An out-of-range chunk index leaves no cached chunk, which is
    /// the past-the-end state.
    fn seek(&mut self, chunk_index: usize, chunk_start: isize, pos_in_chunk: isize) {
        self.current_chunk_index = chunk_index;
        self.current_chunk = self.chunks.get(chunk_index).cloned();
        self.current_chunk_start = chunk_start;
        self.next_chunk_index = chunk_index;
        self.next_chunk = self.current_chunk.clone();
        self.current_pos_in_chunk = pos_in_chunk;
        self.next_pos_in_chunk = pos_in_chunk;
        self.read_next_code_point();
    }

    /// Reads the unit at the `next` position and moves it one unit forward.
    fn read_next_unit(&mut self) -> Option<u16> {
        if self.next_pos_in_chunk < 0 {
            self.next_pos_in_chunk = 0;
            return None;
        }

        let exhausted = match self.next_chunk.as_ref() {
            None => true,
            Some(chunk) => self.next_pos_in_chunk as usize >= chunk.len(),
        };
        if exhausted {
            if self.next_chunk_index + 1 >= self.chunks.len() {
                return None;
            }
            self.next_chunk_index += 1;
            self.next_chunk = self.chunks.get(self.next_chunk_index).cloned();
            self.next_pos_in_chunk = 0;
        }

        let unit = self
            .next_chunk
            .as_ref()
            .map(|chunk| chunk[self.next_pos_in_chunk as usize]);
        if unit.is_some() {
            self.next_pos_in_chunk += 1;
        }
        unit
    }

    /// Reads the unit just before the `current` position and moves it one
    /// unit backward.
    fn read_previous_unit(&mut self) -> Option<u16> {
        if self.current_pos_in_chunk < 0 {
            return None;
        }

        let at_chunk_start = match self.current_chunk.as_ref() {
            None => true,
            Some(_) => self.current_pos_in_chunk == 0,
        };
        if at_chunk_start {
            if self.current_chunk_index == 0 {
                self.current_pos_in_chunk = -1;
                return None;
            }
            self.current_chunk_index -= 1;
            self.current_chunk = self.chunks.get(self.current_chunk_index).cloned();
            let len = self.current_chunk.as_ref().map_or(0, |chunk| chunk.len() as isize);
            self.current_chunk_start -= len;
            self.current_pos_in_chunk = len;
        }

        self.current_pos_in_chunk -= 1;
        self.current_chunk
            .as_ref()
            .map(|chunk| chunk[self.current_pos_in_chunk as usize])
    }

    /// Decodes the code point at the `next` position into the current
    /// fields, leaving `next` just past it.
    fn read_next_code_point(&mut self) {
        let c1 = self.read_next_unit();
        self.current_unit = c1;
        self.current_code_point = c1.map(u32::from);
        if let Some(high) = c1 {
            if is_high_surrogate(high) {
                if let Some(c2) = self.read_next_unit() {
                    if is_low_surrogate(c2) {
                        self.current_code_point = Some(combine(high, c2));
                    } else {
                        // Un-read the unit that did not complete a pair.
                        self.next_pos_in_chunk -= 1;
                    }
                }
            }
        }
    }

    /// Decodes the code point just before the `current` position, leaving
    /// `current` at its first unit.
    fn read_previous_code_point(&mut self) {
        let c2 = self.read_previous_unit();
        self.current_unit = c2;
        self.current_code_point = c2.map(u32::from);
        if let Some(low) = c2 {
            if is_low_surrogate(low) {
                match self.read_previous_unit() {
                    Some(high) if is_high_surrogate(high) => {
                        self.current_unit = Some(high);
                        self.current_code_point = Some(combine(high, low));
                    }
                    Some(_) => {
                        // Un-read the unit that did not complete a pair.
                        self.current_pos_in_chunk += 1;
                    }
                    None => {
                        // The low surrogate is the first unit of the text.
                        self.current_pos_in_chunk = 0;
                    }
                }
            }
        }
    }
}

impl CodePointReader for DocumentReader {
    fn advance(&mut self) {
        self.current_pos_in_chunk = self.next_pos_in_chunk;
        if self.current_chunk_index != self.next_chunk_index {
            self.current_chunk_start += self
                .current_chunk
                .as_ref()
                .map_or(0, |chunk| chunk.len() as isize);
            self.current_chunk_index = self.next_chunk_index;
            self.current_chunk = self.next_chunk.clone();
        }

        self.read_next_code_point();
    }

    fn rewind(&mut self) {
        self.next_pos_in_chunk = self.current_pos_in_chunk;
        self.next_chunk_index = self.current_chunk_index;
        self.next_chunk = self.current_chunk.clone();

        self.read_previous_code_point();
    }

    fn current_code_point(&self) -> Option<u32> {
        self.current_code_point
    }

    fn current_position(&self) -> isize {
        self.current_chunk_start + self.current_pos_in_chunk
    }

    fn sequence_len(&self) -> usize {
        chunk::text_len(&self.chunks)
    }

    fn current_unit(&self) -> Option<u16> {
        self.current_unit
    }

    fn set_position_raw(&mut self, position: isize) {
        // Fast path: the position lies within the cached chunk.
        if let Some(chunk) = self.current_chunk.as_ref() {
            let chunk_len = chunk.len() as isize;
            if position >= self.current_chunk_start
                && position <= self.current_chunk_start + chunk_len
            {
                self.next_chunk_index = self.current_chunk_index;
                self.next_chunk = self.current_chunk.clone();
                self.next_pos_in_chunk = position - self.current_chunk_start;
                self.advance();
                return;
            }
        }

        if position < 0 {
            self.seek(0, 0, position);
            return;
        }

        let text_len = chunk::text_len(&self.chunks);
        if position as usize >= text_len {
            self.seek(
                self.chunks.len(),
                text_len as isize,
                position - text_len as isize,
            );
            return;
        }

        if let Some((chunk_index, chunk_start, pos_in_chunk)) =
            chunk::locate(&self.chunks, position as usize)
        {
            self.seek(chunk_index, chunk_start as isize, pos_in_chunk as isize);
        }
    }

    fn read_substring_core(&mut self, length: usize) -> Result<String, ReaderError> {
        let Some(code_point) = self.current_code_point else {
            return Err(ReaderError::LengthOutOfRange { length });
        };

        let start = self.current_position();
        let mut units = Vec::with_capacity(length + 1);
        push_units(code_point, &mut units);

        // Past the current code point, read raw units off the chunk cursor
        // instead of re-decoding every code point.
        while units.len() < length {
            let Some(unit) = self.read_next_unit() else {
                self.set_position_raw(start);
                return Err(ReaderError::LengthOutOfRange { length });
            };
            units.push(unit);
        }

        self.set_position_raw(start + length as isize);
        units.truncate(length);
        Ok(String::from_utf16_lossy(&units))
    }
}
