//! State types for tracking sync progress
//!
//! Singer state: `{"bookmarks": {"<stream>": {...}}}`. Keys the tap does not
//! manage are carried through unchanged.

use crate::types::{parse_timestamp, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Complete tap state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, StreamState>,

    /// Every other top-level key
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.bookmarks.get(stream)
    }

    /// Bookmark value of a stream
    pub fn get_bookmark(&self, stream: &str) -> Option<&JsonValue> {
        self.bookmarks
            .get(stream)?
            .replication_key_value
            .as_ref()
            .filter(|v| !v.is_null())
    }

    /// Collapse the partition bookmarks of `stream` to an empty list
    pub fn prune_partitions(&mut self, stream: &str) {
        if let Some(stream_state) = self.bookmarks.get_mut(stream) {
            if stream_state.partitions.is_some() {
                stream_state.partitions = Some(Vec::new());
            }
        }
    }
}

/// Bookmark of a single stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamState {
    /// Field the bookmark tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// Highest replication-key value emitted so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key_value: Option<JsonValue>,

    /// Per-partition bookmarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions: Option<Vec<PartitionState>>,

    /// Every other key
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl StreamState {
    /// Create a new empty stream state
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the bookmark forward to `value` if it is newer.
    ///
    /// Returns whether the bookmark changed.
    pub fn advance(&mut self, key: &str, value: &JsonValue) -> bool {
        if value.is_null() {
            return false;
        }

        let newer = match &self.replication_key_value {
            Some(current) if self.replication_key.as_deref() == Some(key) => {
                compare_bookmarks(value, current) == Ordering::Greater
            }
            _ => true,
        };

        if newer {
            self.replication_key = Some(key.to_string());
            self.replication_key_value = Some(value.clone());
        }
        newer
    }
}

/// Bookmark of one partition of a stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionState {
    /// Partition identity
    #[serde(default)]
    pub context: JsonObject,

    /// Every other key
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Order two bookmark values.
///
/// Timestamps compare chronologically, numbers numerically, anything else
/// by its string form.
pub fn compare_bookmarks(a: &JsonValue, b: &JsonValue) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }

    let (a, b) = (bookmark_text(a), bookmark_text(b));
    match (parse_timestamp(&a), parse_timestamp(&b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(&b),
    }
}

fn bookmark_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.bookmarks.is_empty());
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({"bookmarks": {}}));
    }

    #[test]
    fn test_state_round_trip_keeps_unknown_keys() {
        let raw = json!({
            "bookmarks": {
                "products": {
                    "replication_key": "updated_at",
                    "replication_key_value": "2024-02-01 10:00:00",
                    "starting_replication_value": "2024-01-01"
                }
            },
            "currently_syncing": null
        });

        let state: State = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            state.get_bookmark("products"),
            Some(&json!("2024-02-01 10:00:00"))
        );
        assert_eq!(serde_json::to_value(&state).unwrap(), raw);
    }

    #[test]
    fn test_stream_state_advance() {
        let mut stream = StreamState::new();
        assert!(stream.advance("updated_at", &json!("2024-01-02 00:00:00")));
        assert!(!stream.advance("updated_at", &json!("2024-01-01 23:59:59")));
        assert!(!stream.advance("updated_at", &JsonValue::Null));
        assert!(stream.advance("updated_at", &json!("2024-01-02T00:00:01Z")));
        assert_eq!(
            stream.replication_key_value,
            Some(json!("2024-01-02T00:00:01Z"))
        );
    }

    #[test]
    fn test_compare_bookmarks() {
        assert_eq!(compare_bookmarks(&json!(10), &json!(9)), Ordering::Greater);
        assert_eq!(
            compare_bookmarks(&json!("2024-01-01 00:00:00"), &json!("2024-01-01T00:00:00Z")),
            Ordering::Equal
        );
        assert_eq!(compare_bookmarks(&json!("b"), &json!("a")), Ordering::Greater);
    }

    #[test]
    fn test_prune_partitions() {
        let mut state: State = serde_json::from_value(json!({
            "bookmarks": {
                "report": {"partitions": [{"context": {"day": "2024-01-01"}, "replication_key_value": 3}]},
                "products": {"replication_key": "updated_at", "replication_key_value": "x"}
            }
        }))
        .unwrap();

        state.prune_partitions("report");
        state.prune_partitions("products");
        state.prune_partitions("missing");

        assert_eq!(state.get_stream("report").unwrap().partitions, Some(vec![]));
        assert_eq!(state.get_stream("products").unwrap().partitions, None);
    }
}
