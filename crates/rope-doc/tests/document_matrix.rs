use rope_doc::{Document, DocumentError, UnitSeq, CHUNK_SIZE};

#[test]
fn empty_document() {
    let doc = Document::empty();
    assert_eq!(doc.len(), 0);
    assert!(doc.is_empty());
    assert_eq!(doc.to_string(), "");
    assert_eq!(doc.unit_at(0), None);
}

#[test]
fn small_document_round_trips() {
    let doc = Document::new("hello world");
    assert_eq!(doc.len(), 11);
    assert_eq!(doc.to_string(), "hello world");
    assert_eq!(doc.unit_at(4), Some(b'o' as u16));
    assert_eq!(doc.unit_at(11), None);
}

#[test]
fn large_document_spans_chunks() {
    let text = "a".repeat(2 * CHUNK_SIZE + 16);
    let doc = Document::new(&text);
    assert_eq!(doc.len(), 2 * CHUNK_SIZE + 16);
    assert_eq!(doc.unit_at(0), Some(b'a' as u16));
    assert_eq!(doc.unit_at(2 * CHUNK_SIZE + 15), Some(b'a' as u16));
    assert_eq!(doc.unit_at(2 * CHUNK_SIZE + 16), None);
    assert_eq!(doc.to_string(), text);
}

#[test]
fn replace_no_op_returns_same_version() {
    let doc = Document::new("foobar");
    let noop = doc.replace(3, 0, "").unwrap();
    assert!(doc.ptr_eq(&noop));
}

#[test]
fn replace_identical_text_returns_same_version() {
    let doc = Document::new("foobar");
    let same = doc.replace(2, 2, "ob").unwrap();
    assert!(doc.ptr_eq(&same));
}

#[test]
fn replace_within_a_chunk() {
    let doc = Document::new("The quick brown fox");
    let edited = doc.replace(4, 5, "slow").unwrap();
    assert_eq!(edited.to_string(), "The slow brown fox");
    assert_eq!(doc.to_string(), "The quick brown fox");
}

#[test]
fn insert_only_and_remove_only() {
    let doc = Document::new("ace");
    let inserted = doc.replace(1, 0, "b").unwrap().replace(3, 0, "d").unwrap();
    assert_eq!(inserted.to_string(), "abcde");

    let removed = inserted.replace(1, 3, "").unwrap();
    assert_eq!(removed.to_string(), "ae");
}

#[test]
fn replace_across_chunk_boundary() {
    let text = "a".repeat(CHUNK_SIZE + 16);
    let doc = Document::new(&text);

    let edited = doc
        .replace(doc.len() - 24, 16, &"b".repeat(16))
        .unwrap();

    let mut expected = "a".repeat(CHUNK_SIZE - 8);
    expected.push_str(&"b".repeat(16));
    expected.push_str(&"a".repeat(8));
    assert_eq!(edited.len(), CHUNK_SIZE + 16);
    assert_eq!(edited.to_string(), expected);
    assert_eq!(doc.to_string(), text);
}

#[test]
fn replace_spanning_many_chunks() {
    let text = "a".repeat(2 * CHUNK_SIZE + 16);
    let doc = Document::new(&text);

    let edited = doc.replace(8, doc.len() - 8, "bbbb").unwrap();
    assert_eq!(edited.to_string(), format!("{}bbbb", "a".repeat(8)));
    assert_eq!(doc.to_string(), text);
}

#[test]
fn whole_document_replacement() {
    let doc = Document::new("short");
    let edited = doc.replace(0, 5, "completely different").unwrap();
    assert_eq!(edited.to_string(), "completely different");

    let cleared = doc.replace(0, 5, "").unwrap();
    assert!(cleared.is_empty());
}

#[test]
fn append_and_prepend() {
    let doc = Document::new("middle");
    let appended = doc.replace(6, 0, " end").unwrap();
    assert_eq!(appended.to_string(), "middle end");
    let prepended = doc.replace(0, 0, "start ").unwrap();
    assert_eq!(prepended.to_string(), "start middle");
}

#[test]
fn replace_validates_bounds() {
    let doc = Document::new("abc");
    assert_eq!(
        doc.replace(4, 0, ""),
        Err(DocumentError::OffsetOutOfBounds { offset: 4, len: 3 })
    );
    assert_eq!(
        doc.replace(2, 2, ""),
        Err(DocumentError::RangeOutOfBounds { end: 4, len: 3 })
    );
}

#[test]
fn substring_and_units_windows() {
    let doc = Document::new("hello world");
    assert_eq!(doc.substring(0, 5).unwrap(), "hello");
    assert_eq!(doc.substring(6, 11).unwrap(), "world");
    assert_eq!(doc.substring(4, 4).unwrap(), "");
    assert_eq!(
        doc.units(3, 5).unwrap(),
        "lo".encode_utf16().collect::<Vec<_>>()
    );
    assert_eq!(
        doc.substring(0, 12),
        Err(DocumentError::RangeOutOfBounds { end: 12, len: 11 })
    );
    assert_eq!(
        doc.substring(5, 2),
        Err(DocumentError::InvertedRange { start: 5, end: 2 })
    );
}

#[test]
fn sub_sequence_views() {
    let doc = Document::new("hello world");
    let view = doc.sub_sequence(6, 11).unwrap();
    assert_eq!(view.len(), 5);
    assert_eq!(view.unit_at(0), Some(b'w' as u16));
    assert_eq!(view.unit_at(5), None);
    assert_eq!(view.to_string(), "world");

    let nested = view.slice(1, 4).unwrap();
    assert_eq!(nested.to_string(), "orl");
}

#[test]
fn sub_document_shares_unchanged_chunks() {
    let text = format!("{}{}", "a".repeat(CHUNK_SIZE), "b".repeat(CHUNK_SIZE));
    let doc = Document::new(&text);
    let sub = doc.sub_document(0, CHUNK_SIZE).unwrap();
    assert_eq!(sub.len(), CHUNK_SIZE);
    assert_eq!(sub.unit_at(0), Some(b'a' as u16));
    assert_eq!(sub.unit_at(CHUNK_SIZE - 1), Some(b'a' as u16));
    assert_eq!(doc.len(), 2 * CHUNK_SIZE);
}

#[test]
fn surrogate_pairs_are_preserved_by_edits() {
    let doc = Document::new("x\u{1F341}y");
    assert_eq!(doc.len(), 4);

    let edited = doc.replace(1, 2, "\u{1F342}").unwrap();
    assert_eq!(edited.to_string(), "x\u{1F342}y");

    // Split a pair: the halves survive as lone surrogates.
    let broken = doc.replace(2, 1, "").unwrap();
    assert_eq!(broken.len(), 3);
    assert_eq!(broken.unit_at(1), Some(0xD83C));
}

#[test]
fn equality_is_by_content() {
    let a = Document::new("same");
    let b = Document::new("same");
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
    assert_ne!(a, Document::new("other"));
}
