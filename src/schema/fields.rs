//! Field type tags used by the stream catalog

use super::types::{JsonSchema, JsonType, SchemaProperty};
use std::collections::BTreeMap;

/// Type of one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    /// ISO-8601 timestamp string
    DateTime,
    /// ISO-8601 calendar date string
    Date,
    /// Object with the given fields; an empty table leaves it free-form
    Object(FieldTable),
    /// Array of strings
    StringArray,
    /// Array of objects with the given fields
    ObjectArray(FieldTable),
    /// Value the API sends with varying types
    AnyOf(&'static [JsonType]),
}

impl FieldType {
    /// JSON Schema property for this field; every field is nullable
    pub fn to_property(self) -> SchemaProperty {
        match self {
            FieldType::String => SchemaProperty::nullable(&[JsonType::String]),
            FieldType::Integer => SchemaProperty::nullable(&[JsonType::Integer]),
            FieldType::Number => SchemaProperty::nullable(&[JsonType::Number]),
            FieldType::Boolean => SchemaProperty::nullable(&[JsonType::Boolean]),
            FieldType::DateTime => FieldType::String.to_property().with_format("date-time"),
            FieldType::Date => FieldType::String.to_property().with_format("date"),
            FieldType::Object(&[]) => SchemaProperty::nullable(&[JsonType::Object]),
            FieldType::Object(fields) => SchemaProperty::object_of(properties(fields)),
            FieldType::StringArray => SchemaProperty::array_of(FieldType::String.to_property()),
            FieldType::ObjectArray(fields) => {
                SchemaProperty::array_of(FieldType::Object(fields).to_property())
            }
            FieldType::AnyOf(types) => SchemaProperty::nullable(types),
        }
    }
}

/// Field table of a stream
pub type FieldTable = &'static [(&'static str, FieldType)];

fn properties(fields: FieldTable) -> BTreeMap<String, SchemaProperty> {
    fields
        .iter()
        .map(|(name, field_type)| ((*name).to_string(), field_type.to_property()))
        .collect()
}

/// Render a field table as a record schema
pub fn schema_from_fields(fields: FieldTable) -> JsonSchema {
    JsonSchema {
        properties: properties(fields),
        ..JsonSchema::default()
    }
}
