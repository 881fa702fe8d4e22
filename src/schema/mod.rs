//! Record schema module
//!
//! Stream schemas are declared as flat `(field, FieldType)` tables and
//! rendered into the JSON Schema carried by SCHEMA messages.

mod fields;
mod types;

pub use fields::{schema_from_fields, FieldTable, FieldType};
pub use types::{JsonSchema, JsonType, SchemaProperty, SchemaType};

#[cfg(test)]
mod tests;
