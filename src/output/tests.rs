//! Tests for the output module

use super::*;
use crate::engine::Message;
use crate::streams::get_stream;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

fn lines(buf: &[u8]) -> Vec<Value> {
    String::from_utf8(buf.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_record_line() {
    let mut writer = JsonLinesWriter::new(Vec::new());
    let extracted = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    writer
        .emit(&Message::record("products", json!({"product_id": 7}), extracted))
        .unwrap();

    assert_eq!(writer.messages_written(), 1);
    let out = lines(&writer.into_inner());
    assert_eq!(
        out,
        vec![json!({
            "type": "RECORD",
            "stream": "products",
            "record": {"product_id": 7},
            "time_extracted": "2024-05-01T09:30:00Z"
        })]
    );
}

#[test]
fn test_schema_line() {
    let mut writer = JsonLinesWriter::new(Vec::new());
    let stream = get_stream("buy_orders").unwrap();
    writer.emit(&Message::schema(stream)).unwrap();

    let out = lines(&writer.into_inner());
    assert_eq!(out[0]["type"], "SCHEMA");
    assert_eq!(out[0]["stream"], "buy_orders");
    assert_eq!(out[0]["key_properties"], json!(["po_id"]));
    assert_eq!(out[0]["bookmark_properties"], json!(["po_updated_date"]));
    assert_eq!(
        out[0]["schema"]["properties"]["po_id"]["type"],
        json!(["integer", "null"])
    );
}

#[test]
fn test_schema_without_replication_key() {
    let mut writer = JsonLinesWriter::new(Vec::new());
    writer
        .emit(&Message::schema(get_stream("suppliers").unwrap()))
        .unwrap();

    let out = lines(&writer.into_inner());
    assert!(out[0].get("bookmark_properties").is_none());
}

#[test]
fn test_state_line() {
    let mut writer = JsonLinesWriter::new(Vec::new());
    writer
        .emit(&Message::state(json!({"bookmarks": {}})))
        .unwrap();

    let out = lines(&writer.into_inner());
    assert_eq!(out, vec![json!({"type": "STATE", "value": {"bookmarks": {}}})]);
}

#[test]
fn test_pretty_format() {
    let mut writer = JsonLinesWriter::with_format(Vec::new(), OutputFormat::Pretty);
    writer.emit(&Message::state(json!({"bookmarks": {}}))).unwrap();

    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert!(text.contains("\n  \"type\": \"STATE\""));
}

#[test]
fn test_vec_sink_collects() {
    let mut sink: Vec<Message> = Vec::new();
    sink.emit(&Message::state(json!({}))).unwrap();
    assert_eq!(sink.len(), 1);
    assert!(sink[0].is_state());
}
