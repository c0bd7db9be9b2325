//! Windowed reader decorator.
//!
//! [`RangedReader`] wraps any [`CodePointReader`] and restricts it to the
//! units in `[start, end)` of the underlying sequence, re-basing positions
//! so the window reads like a sequence of its own.

use crate::reader::{CodePointReader, ReaderError};

/// A [`CodePointReader`] over the window `[start, end)` of another reader's
/// sequence.
pub struct RangedReader<R> {
    reader: R,
    start: usize,
    end: usize,
}

impl<R: CodePointReader> RangedReader<R> {
    /// Wraps `reader`, restricted to `[start, end)` of its sequence, and
    /// positions it at the window's first unit.
    pub fn new(mut reader: R, start: usize, end: usize) -> Result<Self, ReaderError> {
        let len = reader.sequence_len();
        if start > len || end < start || end > len {
            return Err(ReaderError::InvalidRange { start, end, len });
        }

        reader.set_position_raw(start as isize);
        Ok(RangedReader { reader, start, end })
    }

    /// The window's starting position in the underlying sequence.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The window's ending position in the underlying sequence.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The wrapped reader, positioned wherever the window left it.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: CodePointReader> CodePointReader for RangedReader<R> {
    fn advance(&mut self) {
        if self.reader.current_position() < self.end as isize {
            self.reader.advance();
        }
    }

    fn rewind(&mut self) {
        if self.reader.current_position() >= self.start as isize {
            self.reader.rewind();
        }
    }

    fn current_code_point(&self) -> Option<u32> {
        let position = self.reader.current_position();
        if position < self.start as isize || position >= self.end as isize {
            return None;
        }
        self.reader.current_code_point()
    }

    fn current_position(&self) -> isize {
        let position = self.reader.current_position();
        if position < self.start as isize {
            return -1;
        }
        position - self.start as isize
    }

    fn sequence_len(&self) -> usize {
        self.end - self.start
    }

    fn current_unit(&self) -> Option<u16> {
        let position = self.reader.current_position();
        if position < self.start as isize || position >= self.end as isize {
            return None;
        }
        self.reader.current_unit()
    }

    fn set_position_raw(&mut self, position: isize) {
        self.reader.set_position_raw(position + self.start as isize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::GenericReader;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn window_rebases_positions() {
        let reader = GenericReader::new(units("hello world"));
        let mut ranged = RangedReader::new(reader, 6, 11).unwrap();
        assert_eq!(ranged.sequence_len(), 5);
        assert_eq!(ranged.current_position(), 0);
        assert_eq!(ranged.current_code_point(), Some('w' as u32));

        for _ in 0..5 {
            ranged.advance();
        }
        assert_eq!(ranged.current_position(), 5);
        assert!(ranged.at_end());
        ranged.advance();
        assert_eq!(ranged.current_position(), 5);
    }

    #[test]
    fn rewind_stops_before_the_window() {
        let reader = GenericReader::new(units("abcdef"));
        let mut ranged = RangedReader::new(reader, 2, 4).unwrap();
        ranged.rewind();
        assert_eq!(ranged.current_position(), -1);
        assert_eq!(ranged.current_code_point(), None);
        ranged.rewind();
        assert_eq!(ranged.current_position(), -1);
        ranged.advance();
        assert_eq!(ranged.current_code_point(), Some('c' as u32));
    }

    #[test]
    fn invalid_windows_are_rejected() {
        let reader = GenericReader::new(units("abc"));
        assert_eq!(
            RangedReader::new(reader, 2, 5).err(),
            Some(ReaderError::InvalidRange { start: 2, end: 5, len: 3 })
        );
    }

    #[test]
    fn read_substring_respects_the_window() {
        let reader = GenericReader::new(units("hello world"));
        let mut ranged = RangedReader::new(reader, 6, 11).unwrap();
        assert_eq!(ranged.read_substring(5).unwrap(), "world");
        assert_eq!(
            ranged.read_substring(1),
            Err(ReaderError::LengthOutOfRange { length: 1 })
        );
    }
}
