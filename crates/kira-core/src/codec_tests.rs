// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const SAMPLE: &str = "---\nid: task-20250115-0930-a7f2\nentity_type: task\ntitle: Review design doc\ntags: [work, urgent]\nstatus: doing\ncreated_at: 2025-01-15T09:30:00Z\nupdated_at: 2025-01-15T09:45:12Z\n---\n\n# Review design doc\n\nDepends on [[task-20250114-1400-xxxx]].\n";

#[test]
fn parses_sample_document_from_spec() {
    let doc = parse(SAMPLE.as_bytes()).unwrap();
    assert_eq!(
        doc.front_matter.get("id").unwrap().as_str(),
        Some("task-20250115-0930-a7f2")
    );
    assert_eq!(
        doc.front_matter.get("tags").unwrap().as_seq().unwrap().len(),
        2
    );
    assert!(doc.body.starts_with("# Review design doc"));
}

#[test]
fn round_trip_is_byte_stable_after_normalization() {
    let doc = parse(SAMPLE.as_bytes()).unwrap();
    let out = serialize(&doc);
    assert_eq!(out, SAMPLE);
}

#[test]
fn crlf_is_normalized_to_lf_before_parsing() {
    let crlf = SAMPLE.replace('\n', "\r\n");
    let doc = parse(crlf.as_bytes()).unwrap();
    assert_eq!(serialize(&doc), SAMPLE);
}

#[test]
fn missing_opening_fence_is_malformed() {
    let err = parse(b"id: x\n---\n\nbody\n").unwrap_err();
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn unterminated_fence_is_malformed() {
    let err = parse(b"---\nid: x\n\nbody\n").unwrap_err();
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = parse(b"---\nid: a\nid: b\n---\n\nbody\n").unwrap_err();
    assert_eq!(
        err,
        CodecError::Malformed("duplicate key: id".to_string())
    );
}

#[test]
fn invalid_utf8_is_malformed() {
    let bytes = [0xff, 0xfe, 0xfd];
    let err = parse(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn booleans_and_nulls_round_trip() {
    let raw = "---\nflag: true\nother: false\nblank:\n---\n\nbody\n";
    let doc = parse(raw.as_bytes()).unwrap();
    assert_eq!(doc.front_matter.get("flag").unwrap().as_bool(), Some(true));
    assert_eq!(serialize(&doc), raw);
}

#[test]
fn strings_needing_quotes_are_quoted_on_serialize() {
    let mut fm = FrontMatter::new();
    fm.insert("weird".to_string(), Value::from("has, a comma"));
    let doc = Document {
        front_matter: fm,
        body: "x".to_string(),
    };
    let out = serialize(&doc);
    assert!(out.contains("weird: \"has, a comma\""));
}

#[test]
fn colons_in_scalar_values_do_not_trigger_quoting() {
    // RFC-3339 timestamps (and any other colon-bearing scalar) must stay
    // unquoted: the parser only splits on the line's first colon, so a
    // colon elsewhere in the value is never ambiguous.
    let mut fm = FrontMatter::new();
    fm.insert(
        "created_at".to_string(),
        Value::from("2025-01-15T09:30:00Z"),
    );
    let doc = Document {
        front_matter: fm,
        body: "x".to_string(),
    };
    let out = serialize(&doc);
    assert!(out.contains("created_at: 2025-01-15T09:30:00Z\n"));
}

#[test]
fn empty_sequence_round_trips() {
    let raw = "---\ntags: []\n---\n\nbody\n";
    let doc = parse(raw.as_bytes()).unwrap();
    assert_eq!(doc.front_matter.get("tags").unwrap().as_seq(), Some(&[][..]));
    assert_eq!(serialize(&doc), raw);
}

#[test]
fn key_order_is_preserved_through_round_trip() {
    let doc = parse(SAMPLE.as_bytes()).unwrap();
    let keys: Vec<&str> = doc.front_matter.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "id",
            "entity_type",
            "title",
            "tags",
            "status",
            "created_at",
            "updated_at"
        ]
    );
}
