//! State manager implementation
//!
//! Loads the incoming state, tracks bookmarks while streams are extracted
//! and renders the state carried by STATE messages.
//!
//! Bookmarks advance in a pending slot per stream. Only [`StateManager::commit`]
//! moves them into the state that STATE messages carry, so a stream that
//! fails halfway never publishes progress past records it did not emit.

use super::types::{State, StreamState};
use crate::error::{Error, Result};
use crate::types::{parse_timestamp, JsonValue};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared, in-memory tap state
#[derive(Debug, Clone, Default)]
pub struct StateManager {
    /// Committed state
    state: Arc<RwLock<State>>,
    /// Progress of streams still being extracted
    pending: Arc<RwLock<BTreeMap<String, StreamState>>>,
    /// Streams whose partition bookmarks are collapsed on output
    pruned_streams: BTreeSet<String>,
}

impl StateManager {
    /// Create a state manager starting from empty state
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a state manager from a state object
    pub fn from_state(state: State) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            ..Self::default()
        }
    }

    /// Create a state manager from a file, starting empty if the file is missing
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::in_memory());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::State {
            message: format!("Failed to read state file: {e}"),
        })?;
        Self::from_json(&contents)
    }

    /// Create a state manager from inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::in_memory());
        }

        let state: State = serde_json::from_str(json).map_err(|e| Error::State {
            message: format!("Failed to parse state JSON: {e}"),
        })?;
        Ok(Self::from_state(state))
    }

    /// Collapse partition bookmarks of these streams in every emitted state
    #[must_use]
    pub fn with_pruned_streams<I, S>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pruned_streams = streams.into_iter().map(Into::into).collect();
        self
    }

    /// Get a read lock on the current state
    pub async fn state(&self) -> tokio::sync::RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Bookmark value of a stream
    pub async fn get_bookmark(&self, stream: &str) -> Option<JsonValue> {
        self.state.read().await.get_bookmark(stream).cloned()
    }

    /// Timestamp a stream resumes from: its bookmark, else `start_date`
    pub async fn starting_timestamp(
        &self,
        stream: &str,
        start_date: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        let bookmark = self
            .get_bookmark(stream)
            .await
            .and_then(|value| match value {
                JsonValue::String(s) => parse_timestamp(&s),
                _ => None,
            });
        bookmark.or(start_date)
    }

    /// Move a stream's pending bookmark forward; returns whether it changed
    pub async fn advance_bookmark(&self, stream: &str, key: &str, value: &JsonValue) -> bool {
        let mut pending = self.pending.write().await;
        if !pending.contains_key(stream) {
            let committed = self
                .state
                .read()
                .await
                .get_stream(stream)
                .cloned()
                .unwrap_or_default();
            pending.insert(stream.to_string(), committed);
        }

        pending
            .get_mut(stream)
            .is_some_and(|progress| progress.advance(key, value))
    }

    /// Promote a stream's pending bookmark into the committed state.
    ///
    /// Returns whether there was anything to promote.
    pub async fn commit(&self, stream: &str) -> bool {
        let Some(progress) = self.pending.write().await.remove(stream) else {
            return false;
        };
        self.state
            .write()
            .await
            .bookmarks
            .insert(stream.to_string(), progress);
        true
    }

    /// Drop a stream's pending bookmark, keeping the committed one
    pub async fn discard(&self, stream: &str) -> bool {
        self.pending.write().await.remove(stream).is_some()
    }

    /// State as it should appear in a STATE message
    pub async fn snapshot(&self) -> State {
        let mut state = self.state.read().await.clone();
        for stream in &self.pruned_streams {
            state.prune_partitions(stream);
        }
        state
    }

    /// Export the emitted state as JSON value
    pub async fn to_value(&self) -> Result<JsonValue> {
        let state = self.snapshot().await;
        serde_json::to_value(&state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })
    }
}
