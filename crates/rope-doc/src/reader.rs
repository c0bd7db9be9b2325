//! Code-point readers.
//!
//! A reader walks a UTF-16 sequence one *code point* at a time, pairing
//! surrogates on the fly, including pairs that straddle chunk boundaries.
//! An unpaired surrogate reads as its own code point. The position domain
//! is `[-1, len]`: `-1` is before the first unit and `len` past the last;
//! at both sentinels `current_code_point` is `None`.
//!
//! [`CodePointReader`] carries the shared contract as provided methods
//! (`set_position` validation, the `read_substring` protocol) over a small
//! required core. [`GenericReader`] is the plain implementation over any
//! [`UnitSeq`]; `DocumentReader` overrides the hot paths with a
//! chunk-caching cursor.

use crate::seq::UnitSeq;

/// Errors from reader positioning and substring extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReaderError {
    /// A position outside `[-1, len]`.
    #[error("position out of bounds: position = {position}, length = {len}")]
    PositionOutOfBounds { position: isize, len: usize },

    /// A reader window that does not fit its sequence.
    #[error("invalid range: start = {start}, end = {end}, length = {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// `read_substring` while positioned before the start of the sequence.
    #[error("read_substring: positioned before start of input")]
    BeforeStart,

    /// `read_substring` asked for more units than remain.
    #[error("substring length out of range: length = {length}")]
    LengthOutOfRange { length: usize },
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combines a surrogate pair into the code point it encodes.
pub(crate) fn combine(high: u16, low: u16) -> u32 {
    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
}

/// Appends the UTF-16 encoding of `code_point` (one or two units).
pub(crate) fn push_units(code_point: u32, out: &mut Vec<u16>) {
    if code_point <= 0xFFFF {
        out.push(code_point as u16);
    } else {
        out.push(0xD7C0 + (code_point >> 10) as u16);
        out.push(0xDC00 + (code_point & 0x3FF) as u16);
    }
}

/// A bidirectional code-point reader over a UTF-16 sequence.
pub trait CodePointReader {
    /// Moves to the next code point. Saturates at `len`; from `-1` moves
    /// to `0`.
    fn advance(&mut self);

    /// Moves to the previous code point. Saturates at `-1`.
    fn rewind(&mut self);

    /// The code point at the current position, or `None` at either
    /// sentinel.
    fn current_code_point(&self) -> Option<u32>;

    /// The current position in code units, in `[-1, len]`.
    fn current_position(&self) -> isize;

    /// The sequence length in code units.
    fn sequence_len(&self) -> usize;

    /// Sets the position without validation. A position inside a surrogate
    /// pair is kept as-is, so the current code point will read the pair
    /// halves separately; use values previously returned by
    /// [`current_position`](Self::current_position).
    fn set_position_raw(&mut self, position: isize);

    /// Whether the reader sits at either sentinel.
    fn at_end(&self) -> bool {
        self.current_code_point().is_none()
    }

    /// The first code unit of the current code point, or `None` at either
    /// sentinel.
    fn current_unit(&self) -> Option<u16> {
        self.current_code_point().map(|code_point| {
            if code_point <= 0xFFFF {
                code_point as u16
            } else {
                0xD7C0 + (code_point >> 10) as u16
            }
        })
    }

    /// Validated [`set_position_raw`](Self::set_position_raw): the position
    /// must lie in `[-1, len]`.
    fn set_position(&mut self, position: isize) -> Result<(), ReaderError> {
        if position < -1 || position > self.sequence_len() as isize {
            return Err(ReaderError::PositionOutOfBounds {
                position,
                len: self.sequence_len(),
            });
        }
        self.set_position_raw(position);
        Ok(())
    }

    /// Reads exactly `length` code units from the current position as a
    /// string and leaves the reader positioned after them.
    ///
    /// Fails with [`ReaderError::BeforeStart`] when positioned at `-1`
    /// (even for a zero length), and with
    /// [`ReaderError::LengthOutOfRange`] when fewer than `length` units
    /// remain; on failure the position is unchanged.
    fn read_substring(&mut self, length: usize) -> Result<String, ReaderError> {
        if self.current_position() < 0 {
            return Err(ReaderError::BeforeStart);
        }

        if length == 0 {
            return Ok(String::new());
        }

        self.read_substring_core(length)
    }

    /// The workhorse behind [`read_substring`](Self::read_substring);
    /// arguments are pre-validated. Implementations may override this with
    /// a faster path but must keep the rollback-on-failure contract.
    fn read_substring_core(&mut self, length: usize) -> Result<String, ReaderError> {
        let start = self.current_position();

        // One spare slot in case the last unit turns out to be the high
        // half of a surrogate pair.
        let mut units = Vec::with_capacity(length + 1);
        while units.len() < length {
            let Some(code_point) = self.current_code_point() else {
                self.set_position_raw(start);
                return Err(ReaderError::LengthOutOfRange { length });
            };
            push_units(code_point, &mut units);
            self.advance();
        }

        self.set_position_raw(start + length as isize);
        units.truncate(length);
        Ok(String::from_utf16_lossy(&units))
    }
}

/// The straightforward reader: an index into any [`UnitSeq`].
#[derive(Clone, Debug)]
pub struct GenericReader<S> {
    seq: S,
    position: isize,
}

impl<S: UnitSeq> GenericReader<S> {
    /// A reader positioned at the first code unit.
    pub fn new(seq: S) -> Self {
        GenericReader { seq, position: 0 }
    }

    /// A reader at an arbitrary position. The position is not validated;
    /// out-of-domain values behave as the nearest sentinel.
    pub fn with_position(seq: S, position: isize) -> Self {
        GenericReader { seq, position }
    }

    /// The underlying sequence.
    pub fn sequence(&self) -> &S {
        &self.seq
    }

    fn unit(&self, position: isize) -> Option<u16> {
        usize::try_from(position).ok().and_then(|p| self.seq.unit_at(p))
    }
}

impl<S: UnitSeq> CodePointReader for GenericReader<S> {
    fn advance(&mut self) {
        let len = self.seq.len() as isize;
        if self.position < 0 {
            self.position = 0;
        } else if self.position < len {
            let step = match (self.unit(self.position), self.unit(self.position + 1)) {
                (Some(high), Some(low)) if is_high_surrogate(high) && is_low_surrogate(low) => 2,
                _ => 1,
            };
            self.position += step;
        } else {
            self.position = len;
        }
    }

    fn rewind(&mut self) {
        if self.position > 0 {
            let step = match (self.unit(self.position - 2), self.unit(self.position - 1)) {
                (Some(high), Some(low)) if is_high_surrogate(high) && is_low_surrogate(low) => 2,
                _ => 1,
            };
            self.position -= step;
        } else {
            self.position = -1;
        }
    }

    fn current_code_point(&self) -> Option<u32> {
        let unit = self.unit(self.position)?;
        if is_high_surrogate(unit) {
            if let Some(low) = self.unit(self.position + 1) {
                if is_low_surrogate(low) {
                    return Some(combine(unit, low));
                }
            }
        }
        Some(u32::from(unit))
    }

    fn current_position(&self) -> isize {
        self.position
    }

    fn sequence_len(&self) -> usize {
        self.seq.len()
    }

    fn set_position_raw(&mut self, position: isize) {
        self.position = position;
    }
}
