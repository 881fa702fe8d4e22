//! Tests for decoder module

use super::*;
use serde_json::json;

#[test]
fn test_json_decoder_array() {
    let decoder = JsonDecoder::new();
    let body = r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[2]["id"], 3);
}

#[test]
fn test_json_decoder_object() {
    let decoder = JsonDecoder::new();
    let records = decoder.decode(r#"{"id": 1, "name": "test"}"#).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 1);
}

#[test]
fn test_json_decoder_top_level_data() {
    let decoder = JsonDecoder::with_path("$.data[*]");
    let body = r#"{"code": 200, "data": [{"product_id": 1}, {"product_id": 2}], "nextUrl": null}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["product_id"], 2);
}

#[test]
fn test_json_decoder_nested_orders() {
    let decoder = JsonDecoder::with_path("$.data.orders[*]");
    let body = json!({
        "data": {
            "orders": [{"order_id": 10}, {"order_id": 11}],
            "nextUrl": "/orders/V2/getAllOrders?cursor=abc"
        }
    });

    let records = decoder.extract(&body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["order_id"], 10);
}

#[test]
fn test_json_decoder_missing_path_is_empty() {
    let decoder = JsonDecoder::with_path("$.data.credit_notes[*]");
    let records = decoder.extract(&json!({"data": []})).unwrap();
    assert!(records.is_empty());

    let decoder = JsonDecoder::with_path("data.credit_notes");
    assert!(decoder.extract(&json!({"message": "none"})).unwrap().is_empty());
}

#[test]
fn test_json_decoder_simple_path() {
    let decoder = JsonDecoder::with_path("data.credit_notes");
    let body = json!({"data": {"credit_notes": [{"credit_note_id": 7}]}});

    let records = decoder.extract(&body).unwrap();
    assert_eq!(records, vec![json!({"credit_note_id": 7})]);
}

#[test]
fn test_json_decoder_array_index() {
    let decoder = JsonDecoder::with_path("data[1]");
    let records = decoder
        .extract(&json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]}))
        .unwrap();
    assert_eq!(records, vec![json!({"id": 2})]);
}

#[test]
fn test_json_decoder_raw() {
    let decoder = JsonDecoder::new();
    let raw = decoder.decode_raw(r#"{"status": "ok", "data": []}"#).unwrap();
    assert_eq!(raw["status"], "ok");
}

#[test]
fn test_json_decoder_invalid() {
    let decoder = JsonDecoder::with_path("$.data[*]");
    let err = decoder.decode("<html>gateway timeout</html>").unwrap_err();
    assert!(err.to_string().starts_with("Failed to decode response"));
}

#[test]
fn test_find_matches_keeps_document_order() {
    let body = json!({"data": [{"sku": "a"}, {"sku": "b"}]});
    let skus = find_matches(&body, "$.data[*].sku").unwrap();
    assert_eq!(skus, vec![json!("a"), json!("b")]);
}

#[test]
fn test_find_matches_string_leaf() {
    let body = json!({"nextUrl": "https://api.easyecom.io/x?cursor=ABC"});
    let found = find_matches(&body, "$.nextUrl").unwrap();
    assert_eq!(found.first(), Some(&json!("https://api.easyecom.io/x?cursor=ABC")));
}

#[test]
fn test_find_matches_invalid_path() {
    let result = find_matches(&json!({}), "$.data[");
    assert!(matches!(result, Err(crate::Error::JsonPath { .. })));
}
