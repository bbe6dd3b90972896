use super::*;
use crate::net::types::NfcAccess;

#[test]
fn single_event_in_one_chunk() {
    let mut decoder = EventStreamDecoder::new();
    let out = decoder.push(b"data: {\"type\":\"alert_request\"}\n\n");
    assert_eq!(out, vec![r#"{"type":"alert_request"}"#.to_owned()]);
}

#[test]
fn event_split_across_chunks() {
    let mut decoder = EventStreamDecoder::new();
    assert!(decoder.push(b"data: {\"type\":\"nfc_").is_empty());
    assert!(decoder.push(b"access\",\"id\":\"04A1\"}\r\n").is_empty());
    let out = decoder.push(b"\r\n");
    assert_eq!(out, vec![r#"{"type":"nfc_access","id":"04A1"}"#.to_owned()]);
}

#[test]
fn utf8_sequence_split_across_chunks_survives() {
    let payload = "data: {\"type\":\"alert_request\",\"message\":\"Timbre 🔔\"}\n\n".as_bytes();
    let split = payload.len() - 5;
    let mut decoder = EventStreamDecoder::new();
    assert!(decoder.push(&payload[..split]).is_empty());
    let out = decoder.push(&payload[split..]);
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("Timbre 🔔"));
}

#[test]
fn multiline_data_is_joined_with_newline() {
    let mut decoder = EventStreamDecoder::new();
    let out = decoder.push(b"data: first\ndata:second\n\n");
    assert_eq!(out, vec!["first\nsecond".to_owned()]);
}

#[test]
fn comments_and_other_fields_are_ignored() {
    let mut decoder = EventStreamDecoder::new();
    let out = decoder.push(b": keepalive\n\nevent: message\nid: 7\nretry: 1000\ndata: x\n\n");
    assert_eq!(out, vec!["x".to_owned()]);
}

#[test]
fn blank_lines_without_data_emit_nothing() {
    let mut decoder = EventStreamDecoder::new();
    assert!(decoder.push(b"\n\n\n").is_empty());
}

#[test]
fn several_events_in_one_chunk() {
    let mut decoder = EventStreamDecoder::new();
    let out = decoder.push(b"data: a\n\ndata: b\n\ndata: c");
    assert_eq!(out, vec!["a".to_owned(), "b".to_owned()]);
    assert_eq!(decoder.push(b"\n\n"), vec!["c".to_owned()]);
}

#[test]
fn parse_event_reads_nfc_access() {
    let event = parse_event(r#"{"type":"nfc_access","id":"04A1","activo":"0"}"#).unwrap();
    assert_eq!(event, ServerEvent::NfcAccess(NfcAccess { id: "04A1".into(), nombre: None, activo: false }));
}

#[test]
fn parse_event_skips_garbage() {
    assert!(parse_event("not json").is_none());
}
