//! Contract matrix run against every reader implementation.

use rope_doc::{CodePointReader, Document, DocumentReader, GenericReader, RangedReader, ReaderError};

fn units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn generic(units: &[u16], position: isize) -> GenericReader<Vec<u16>> {
    GenericReader::with_position(units.to_vec(), position)
}

fn document(units: &[u16], position: isize) -> DocumentReader {
    DocumentReader::with_position(&Document::from_units(units), position).unwrap()
}

fn ranged(units: &[u16], position: isize) -> RangedReader<GenericReader<Vec<u16>>> {
    let mut reader = RangedReader::new(GenericReader::new(units.to_vec()), 0, units.len()).unwrap();
    reader.set_position(position).unwrap();
    reader
}

/// Runs `check` against all three reader implementations.
fn for_each_reader(units: &[u16], position: isize, check: impl Fn(&mut dyn CodePointReader)) {
    check(&mut generic(units, position));
    check(&mut document(units, position));
    check(&mut ranged(units, position));
}

#[test]
fn ascii_walk() {
    for_each_reader(&units("bar"), 0, |reader| {
        assert_eq!(reader.current_position(), 0);
        assert_eq!(reader.current_code_point(), Some('b' as u32));
        assert_eq!(reader.current_unit(), Some(b'b' as u16));
        reader.advance();
        assert_eq!(reader.current_code_point(), Some('a' as u32));
        reader.advance();
        assert_eq!(reader.current_code_point(), Some('r' as u32));
        reader.advance();
        assert_eq!(reader.current_position(), 3);
        assert_eq!(reader.current_code_point(), None);
        assert!(reader.at_end());

        reader.advance();
        assert_eq!(reader.current_position(), 3);
    });
}

#[test]
fn surrogate_pair_positions() {
    // "x🍁y": positions 0, 1, 3, 4.
    for_each_reader(&units("x\u{1F341}y"), 0, |reader| {
        assert_eq!(reader.sequence_len(), 4);
        assert_eq!(reader.current_code_point(), Some('x' as u32));
        reader.advance();
        assert_eq!(reader.current_position(), 1);
        assert_eq!(reader.current_code_point(), Some(0x1F341));
        assert_eq!(reader.current_unit(), Some(0xD83C));
        reader.advance();
        assert_eq!(reader.current_position(), 3);
        assert_eq!(reader.current_code_point(), Some('y' as u32));
        reader.advance();
        assert_eq!(reader.current_position(), 4);
        assert!(reader.at_end());

        reader.rewind();
        assert_eq!(reader.current_position(), 3);
        reader.rewind();
        assert_eq!(reader.current_position(), 1);
        assert_eq!(reader.current_code_point(), Some(0x1F341));
        reader.rewind();
        assert_eq!(reader.current_position(), 0);
        reader.rewind();
        assert_eq!(reader.current_position(), -1);
        assert_eq!(reader.current_code_point(), None);
        reader.rewind();
        assert_eq!(reader.current_position(), -1);
    });
}

#[test]
fn lone_surrogate_is_a_code_point() {
    let broken = [b'x' as u16, 0xD83C, b'y' as u16];
    for_each_reader(&broken, 0, |reader| {
        reader.advance();
        assert_eq!(reader.current_position(), 1);
        assert_eq!(reader.current_code_point(), Some(0xD83C));
        reader.advance();
        assert_eq!(reader.current_position(), 2);
        assert_eq!(reader.current_code_point(), Some(b'y' as u32));
        reader.rewind();
        assert_eq!(reader.current_position(), 1);
        assert_eq!(reader.current_code_point(), Some(0xD83C));
    });
}

#[test]
fn before_start_sentinel() {
    for_each_reader(&units("ab"), -1, |reader| {
        assert_eq!(reader.current_position(), -1);
        assert_eq!(reader.current_code_point(), None);
        assert_eq!(reader.current_unit(), None);
        reader.advance();
        assert_eq!(reader.current_position(), 0);
        assert_eq!(reader.current_code_point(), Some('a' as u32));
    });
}

#[test]
fn set_position_validates_domain() {
    for_each_reader(&units("abc"), 0, |reader| {
        assert_eq!(reader.set_position(3), Ok(()));
        assert_eq!(reader.set_position(-1), Ok(()));
        assert_eq!(
            reader.set_position(4),
            Err(ReaderError::PositionOutOfBounds { position: 4, len: 3 })
        );
        assert_eq!(
            reader.set_position(-2),
            Err(ReaderError::PositionOutOfBounds { position: -2, len: 3 })
        );
        // Failed calls leave the position untouched.
        assert_eq!(reader.current_position(), -1);
    });
}

#[test]
fn read_substring_counts_units() {
    for_each_reader(&units("x\u{1F341}y"), 0, |reader| {
        assert_eq!(reader.read_substring(1).unwrap(), "x");
        assert_eq!(reader.current_position(), 1);
        assert_eq!(reader.read_substring(2).unwrap(), "\u{1F341}");
        assert_eq!(reader.current_position(), 3);
        assert_eq!(reader.read_substring(1).unwrap(), "y");
        assert_eq!(reader.current_position(), 4);
    });
}

#[test]
fn read_substring_zero_length() {
    for_each_reader(&units("abc"), 1, |reader| {
        assert_eq!(reader.read_substring(0).unwrap(), "");
        assert_eq!(reader.current_position(), 1);
    });
    for_each_reader(&units("abc"), 3, |reader| {
        // Zero length succeeds even at the end sentinel.
        assert_eq!(reader.read_substring(0).unwrap(), "");
    });
}

#[test]
fn read_substring_before_start_fails_even_for_zero_length() {
    for_each_reader(&units("abc"), -1, |reader| {
        assert_eq!(reader.read_substring(0), Err(ReaderError::BeforeStart));
        assert_eq!(reader.read_substring(2), Err(ReaderError::BeforeStart));
        assert_eq!(reader.current_position(), -1);
    });
}

#[test]
fn read_substring_rolls_back_on_overrun() {
    for_each_reader(&units("abc"), 0, |reader| {
        assert_eq!(
            reader.read_substring(4),
            Err(ReaderError::LengthOutOfRange { length: 4 })
        );
        assert_eq!(reader.current_position(), 0);
        assert_eq!(reader.current_code_point(), Some('a' as u32));
        // The reader still works after the failure.
        assert_eq!(reader.read_substring(3).unwrap(), "abc");
    });
}

#[test]
fn read_substring_may_split_a_pair() {
    // Asking for 2 of the 4 units stops inside the surrogate pair.
    for_each_reader(&units("x\u{1F341}y"), 0, |reader| {
        assert_eq!(reader.read_substring(2).unwrap(), "x\u{FFFD}");
        assert_eq!(reader.current_position(), 2);
        // The second half of the pair now reads as a lone surrogate.
        assert_eq!(reader.current_code_point(), Some(0xDF41));
    });
}

#[test]
fn document_reader_pairs_across_chunk_boundary() {
    let mut text: Vec<u16> = vec![b'a' as u16; rope_doc::CHUNK_SIZE - 1];
    text.push(0xD83C);
    text.push(0xDF41);
    let doc = Document::from_units(&text);
    let mut reader = DocumentReader::with_position(&doc, (rope_doc::CHUNK_SIZE - 1) as isize).unwrap();
    assert_eq!(reader.current_code_point(), Some(0x1F341));
    reader.advance();
    assert!(reader.at_end());
    reader.rewind();
    assert_eq!(reader.current_position(), (rope_doc::CHUNK_SIZE - 1) as isize);
    assert_eq!(reader.current_code_point(), Some(0x1F341));
}

#[test]
fn ranged_reader_over_document_reader() {
    let doc = Document::new("hello world");
    let reader = DocumentReader::new(&doc);
    let mut ranged = RangedReader::new(reader, 6, 11).unwrap();
    assert_eq!(ranged.sequence_len(), 5);
    assert_eq!(ranged.read_substring(5).unwrap(), "world");
    assert!(ranged.at_end());
}

#[test]
fn ranged_window_hides_outside_text() {
    let all = units("abcdef");
    let mut reader = RangedReader::new(GenericReader::new(all), 2, 4).unwrap();
    assert_eq!(reader.current_code_point(), Some('c' as u32));
    reader.advance();
    assert_eq!(reader.current_code_point(), Some('d' as u32));
    reader.advance();
    assert_eq!(reader.current_code_point(), None);
    assert_eq!(reader.current_position(), 2);
}
