//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Pages through streams and tracks bookmarks
//! - `SyncConfig` - Configuration for sync operations
//! - Singer message types for output (Schema, Record, State)

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::output::MessageSink;
use crate::pagination::PageToken;
use crate::state::StateManager;
use crate::streams::StreamDefinition;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Replication start for streams without a bookmark
    start_date: Option<DateTime<Utc>>,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager) -> Self {
        Self {
            client,
            state,
            start_date: None,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the configured start date
    #[must_use]
    pub fn with_start_date(mut self, start_date: Option<DateTime<Utc>>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync streams one after another.
    ///
    /// A failing stream is logged and recorded in the stats; with
    /// `fail_fast` its error is returned immediately.
    pub async fn sync_all(
        &mut self,
        streams: &[&StreamDefinition],
        sink: &mut dyn MessageSink,
    ) -> Result<SyncStats> {
        let start = Instant::now();

        for stream in streams {
            if let Err(e) = self.sync_stream(stream, sink).await {
                error!("Stream '{}' failed: {e}", stream.name);
                self.stats.add_error(stream.name);
                if self.config.fail_fast {
                    return Err(e);
                }
            }
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        Ok(self.stats.clone())
    }

    /// Sync a single stream, returning the number of records emitted.
    ///
    /// The stream's bookmark is committed once extraction succeeds; sorted
    /// streams also commit after every page. A failing stream leaves its
    /// committed bookmark where it was.
    pub async fn sync_stream(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut dyn MessageSink,
    ) -> Result<usize> {
        info!("Starting sync for stream: {}", stream.name);

        let extracted = match self.extract(stream, sink).await {
            Ok(extracted) => extracted,
            Err(e) => {
                if self.state.discard(stream.name).await {
                    warn!("Dropping unfinished bookmark of {}", stream.name);
                }
                return Err(e);
            }
        };

        if extracted.truncated && !stream.is_sorted() {
            // Unsorted pages past the limit may hold older records
            debug!("Keeping previous bookmark of truncated {}", stream.name);
            self.state.discard(stream.name).await;
        } else {
            self.state.commit(stream.name).await;
        }

        sink.emit(&Message::state(self.state.to_value().await?))?;
        self.stats.add_stream();

        info!(
            "Completed sync for {}: {} records in {} pages",
            stream.name, extracted.records, extracted.pages
        );

        Ok(extracted.records)
    }

    /// Page through a stream, emitting its SCHEMA and RECORD messages
    async fn extract(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut dyn MessageSink,
    ) -> Result<Extracted> {
        sink.emit(&Message::schema(stream))?;

        let starting = self
            .state
            .starting_timestamp(stream.name, self.start_date)
            .await;
        let context = stream.context(starting);
        let decoder = JsonDecoder::with_path(stream.records_path);
        let mut paginator = stream.pagination.build();

        let mut token: Option<PageToken> = None;
        let mut extracted = Extracted::default();

        loop {
            let params = paginator.build_params(&context, token.as_ref())?;
            let body: Value = self
                .client
                .get_json_with_config(stream.path, RequestConfig::new().query_all(params))
                .await?;
            let time_extracted = Utc::now();

            extracted.pages += 1;
            self.stats.add_page();

            let records = decoder.extract(&body)?;
            debug!(
                "Page {} of {}: fetched {} records",
                extracted.pages,
                stream.name,
                records.len()
            );

            for record in records {
                if let Some(key) = stream.replication_key {
                    if let Some(value) = record.get(key) {
                        self.state.advance_bookmark(stream.name, key, value).await;
                    }
                }

                sink.emit(&Message::record(stream.name, record, time_extracted))?;
                extracted.records += 1;
                self.stats.add_records(1);

                if self.config.max_records > 0 && extracted.records >= self.config.max_records {
                    debug!("Record limit reached for {}", stream.name);
                    extracted.truncated = true;
                    return Ok(extracted);
                }
            }

            let next = paginator.next_token(&body, token.as_ref())?;
            if next.is_done() {
                return Ok(extracted);
            }

            if stream.is_sorted() {
                self.state.commit(stream.name).await;
            }

            // Unsorted streams repeat their last committed bookmark
            if self.config.emit_state_per_page {
                sink.emit(&Message::state(self.state.to_value().await?))?;
            }

            token = Some(next);
        }
    }

    /// Fetch the first page of a stream without emitting anything
    pub async fn fetch_first_page(&self, stream: &StreamDefinition) -> Result<Vec<Value>> {
        let starting = self
            .state
            .starting_timestamp(stream.name, self.start_date)
            .await;
        let context = stream.context(starting);
        let params = stream.pagination.build().build_params(&context, None)?;

        let body: Value = self
            .client
            .get_json_with_config(stream.path, RequestConfig::new().query_all(params))
            .await?;
        JsonDecoder::with_path(stream.records_path).extract(&body)
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = SyncStats::default();
    }
}

/// Outcome of paging through one stream
#[derive(Debug, Default)]
struct Extracted {
    records: usize,
    pages: usize,
    /// Stopped at the record limit before the last page
    truncated: bool,
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("client", &self.client)
            .field("start_date", &self.start_date)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
