//! Immutable UTF-16 text documents with structure-sharing edits.
//!
//! A [`Document`] stores text as chunks of code units in a weight-balanced
//! tree (from the `weight-list` crate), so documents of any size support
//! O(log n) indexed access and O(log n + edit) `replace`, with every
//! untouched chunk shared between versions. Readers decode the unit stream
//! into code points, pairing surrogates across chunk boundaries and passing
//! unpaired surrogates through as-is.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`chunk`] | [`Chunk`], [`CHUNK_SIZE`], the measured chunk tree |
//! | [`document`] | [`Document`], `replace`, [`DocumentError`] |
//! | [`seq`] | [`UnitSeq`] seam and [`SubSeq`] windows |
//! | [`reader`] | [`CodePointReader`] contract, [`GenericReader`] |
//! | [`doc_reader`] | chunk-caching [`DocumentReader`] |
//! | [`ranged`] | [`RangedReader`] window decorator |

pub mod chunk;
pub mod doc_reader;
pub mod document;
pub mod ranged;
pub mod reader;
pub mod seq;

pub use chunk::{Chunk, ChunkList, TextLen, CHUNK_SIZE};
pub use doc_reader::DocumentReader;
pub use document::{Document, DocumentError};
pub use ranged::RangedReader;
pub use reader::{CodePointReader, GenericReader, ReaderError};
pub use seq::{SubSeq, UnitSeq};
