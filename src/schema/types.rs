//! JSON Schema value types
//!
//! Only the subset SCHEMA messages need: an object of properties, each a
//! union of primitive types, optionally with a format, an item schema or
//! nested properties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl JsonType {
    /// Name as written in a schema
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Null => "null",
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a `"type"` keyword: one type, or a union written as a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    One(JsonType),
    Union(Vec<JsonType>),
}

impl SchemaType {
    /// `types` plus `null`, in the given order, `null` last.
    ///
    /// With nothing but `null` left the result is the single `null` type.
    pub fn nullable(types: &[JsonType]) -> Self {
        let mut union: Vec<JsonType> = types
            .iter()
            .copied()
            .filter(|t| *t != JsonType::Null)
            .collect();
        if union.is_empty() {
            return SchemaType::One(JsonType::Null);
        }
        union.push(JsonType::Null);
        SchemaType::Union(union)
    }

    /// Whether `null` is accepted
    pub fn allows_null(&self) -> bool {
        match self {
            SchemaType::One(t) => *t == JsonType::Null,
            SchemaType::Union(types) => types.contains(&JsonType::Null),
        }
    }

    /// First non-null type
    pub fn primary(&self) -> Option<JsonType> {
        match self {
            SchemaType::One(t) => Some(*t),
            SchemaType::Union(types) => types.iter().copied().find(|t| *t != JsonType::Null),
        }
    }
}

/// Schema of one record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub json_type: SchemaType,

    /// Format hint (`date-time`, `date`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Element schema of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,

    /// Properties of an object; `None` leaves the object free-form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaProperty>>,
}

impl SchemaProperty {
    /// Nullable property accepting any of `types`
    pub fn nullable(types: &[JsonType]) -> Self {
        Self {
            json_type: SchemaType::nullable(types),
            format: None,
            items: None,
            properties: None,
        }
    }

    /// Nullable array of `items`
    pub fn array_of(items: SchemaProperty) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::nullable(&[JsonType::Array])
        }
    }

    /// Nullable object with the given properties
    pub fn object_of(properties: BTreeMap<String, SchemaProperty>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::nullable(&[JsonType::Object])
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Whether `null` is accepted
    pub fn is_nullable(&self) -> bool {
        self.json_type.allows_null()
    }
}

/// Record schema sent in SCHEMA messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object`
    #[serde(rename = "type")]
    pub json_type: JsonType,

    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: BTreeMap::new(),
        }
    }
}

impl JsonSchema {
    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
