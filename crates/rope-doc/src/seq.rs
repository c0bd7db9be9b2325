//! The code-unit sequence seam.
//!
//! Readers do not care where their text lives; they only need length and
//! indexed access to UTF-16 code units. [`UnitSeq`] is that seam, and
//! [`SubSeq`] is a windowed view over any implementor.

use crate::document::DocumentError;

/// A random-access sequence of UTF-16 code units.
pub trait UnitSeq {
    /// Sequence length in code units.
    fn len(&self) -> usize;

    /// The unit at `index`, or `None` past the end.
    fn unit_at(&self, index: usize) -> Option<u16>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UnitSeq for Vec<u16> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn unit_at(&self, index: usize) -> Option<u16> {
        self.as_slice().get(index).copied()
    }
}

impl UnitSeq for [u16] {
    fn len(&self) -> usize {
        self.len()
    }

    fn unit_at(&self, index: usize) -> Option<u16> {
        self.get(index).copied()
    }
}

impl<S: UnitSeq + ?Sized> UnitSeq for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn unit_at(&self, index: usize) -> Option<u16> {
        (**self).unit_at(index)
    }
}

/// A window `[start, end)` over a [`UnitSeq`], itself a [`UnitSeq`].
#[derive(Clone, Debug)]
pub struct SubSeq<S> {
    seq: S,
    start: usize,
    end: usize,
}

impl<S: UnitSeq> SubSeq<S> {
    /// Validates the window against the backing sequence.
    pub fn new(seq: S, start: usize, end: usize) -> Result<Self, DocumentError> {
        let len = seq.len();
        if end > len {
            return Err(DocumentError::RangeOutOfBounds { end, len });
        }
        if start > end {
            return Err(DocumentError::InvertedRange { start, end });
        }
        Ok(SubSeq { seq, start, end })
    }

    /// The window's position within the backing sequence.
    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// A narrower window, in window-relative positions.
    pub fn slice(&self, start: usize, end: usize) -> Result<SubSeq<S>, DocumentError>
    where
        S: Clone,
    {
        if end > self.end - self.start {
            return Err(DocumentError::RangeOutOfBounds {
                end,
                len: self.end - self.start,
            });
        }
        if start > end {
            return Err(DocumentError::InvertedRange { start, end });
        }
        Ok(SubSeq {
            seq: self.seq.clone(),
            start: self.start + start,
            end: self.start + end,
        })
    }

    /// The window's code units.
    pub fn to_units(&self) -> Vec<u16> {
        (self.start..self.end)
            .filter_map(|index| self.seq.unit_at(index))
            .collect()
    }
}

impl<S: UnitSeq> UnitSeq for SubSeq<S> {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn unit_at(&self, index: usize) -> Option<u16> {
        if index >= self.end - self.start {
            return None;
        }
        self.seq.unit_at(self.start + index)
    }
}

impl<S: UnitSeq> std::fmt::Display for SubSeq<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf16_lossy(&self.to_units()))
    }
}
