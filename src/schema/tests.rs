//! Schema rendering tests

use super::*;
use serde_json::json;

const FIELDS: FieldTable = &[
    ("order_id", FieldType::Integer),
    ("last_update_date", FieldType::DateTime),
    ("grn_invoice_date", FieldType::Date),
    ("total_amount", FieldType::Number),
    ("active", FieldType::Boolean),
    ("vendor_code", FieldType::StringArray),
    ("meta", FieldType::Object(&[])),
    ("documents", FieldType::Object(&[("label", FieldType::String)])),
    (
        "shipping_history",
        FieldType::ObjectArray(&[("qc_pass_datetime", FieldType::DateTime)]),
    ),
    ("custom_fields", FieldType::AnyOf(&[JsonType::Array, JsonType::Object])),
];

#[test]
fn test_schema_from_fields() {
    let schema = schema_from_fields(FIELDS);
    assert_eq!(schema.properties.len(), FIELDS.len());
    assert!(schema.properties.values().all(SchemaProperty::is_nullable));

    let order_id = schema.get_property("order_id").unwrap();
    assert_eq!(order_id.json_type.primary(), Some(JsonType::Integer));
}

#[test]
fn test_schema_json_shape() {
    let value = schema_from_fields(FIELDS).to_json();

    assert_eq!(value["type"], "object");
    assert_eq!(value["properties"]["order_id"], json!({"type": ["integer", "null"]}));
    assert_eq!(
        value["properties"]["last_update_date"],
        json!({"type": ["string", "null"], "format": "date-time"})
    );
    assert_eq!(
        value["properties"]["grn_invoice_date"],
        json!({"type": ["string", "null"], "format": "date"})
    );
    assert_eq!(
        value["properties"]["vendor_code"],
        json!({"type": ["array", "null"], "items": {"type": ["string", "null"]}})
    );
    assert_eq!(
        value["properties"]["custom_fields"],
        json!({"type": ["array", "object", "null"]})
    );
    assert_eq!(value["properties"]["meta"], json!({"type": ["object", "null"]}));
}

#[test]
fn test_nested_fields_keep_their_types() {
    let value = schema_from_fields(FIELDS).to_json();

    assert_eq!(
        value["properties"]["documents"],
        json!({
            "type": ["object", "null"],
            "properties": {"label": {"type": ["string", "null"]}}
        })
    );
    assert_eq!(
        value["properties"]["shipping_history"],
        json!({
            "type": ["array", "null"],
            "items": {
                "type": ["object", "null"],
                "properties": {
                    "qc_pass_datetime": {"type": ["string", "null"], "format": "date-time"}
                }
            }
        })
    );
}

#[test]
fn test_nullable_unions() {
    assert!(SchemaType::nullable(&[JsonType::String]).allows_null());
    assert!(!SchemaType::One(JsonType::String).allows_null());
    assert_eq!(
        SchemaType::nullable(&[JsonType::Null]),
        SchemaType::One(JsonType::Null)
    );
    assert_eq!(
        SchemaType::nullable(&[JsonType::String, JsonType::Null, JsonType::Number]),
        SchemaType::Union(vec![JsonType::String, JsonType::Number, JsonType::Null])
    );
    assert_eq!(
        SchemaType::nullable(&[JsonType::String, JsonType::Number]).primary(),
        Some(JsonType::String)
    );
}

#[test]
fn test_json_type_display() {
    assert_eq!(JsonType::Integer.to_string(), "integer");
    assert_eq!(JsonType::Null.to_string(), "null");
}
