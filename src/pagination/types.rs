//! Pagination types and traits
//!
//! Defines the page token, the per-stream request context and the trait
//! both strategies implement.

use crate::error::Result;
use crate::types::StringMap;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token handed from one page to the next
///
/// Produced after every response, consumed by the next request and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    /// Last page reached
    NoMore,
    /// Opaque cursor for the next page of the current query
    Cursor(String),
    /// Current date window is exhausted, slide to the next one
    AdvanceWindow,
}

impl PageToken {
    /// Create a cursor token
    pub fn cursor(value: impl Into<String>) -> Self {
        Self::Cursor(value.into())
    }

    /// Check if pagination is finished
    pub fn is_done(&self) -> bool {
        matches!(self, Self::NoMore)
    }

    /// Check if another request should be made
    pub fn is_continue(&self) -> bool {
        !self.is_done()
    }

    /// Cursor value, if this is a cursor token
    pub fn as_cursor(&self) -> Option<&str> {
        match self {
            Self::Cursor(value) => Some(value),
            _ => None,
        }
    }
}

/// Pagination scheme of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
    /// Follow `nextUrl` cursors until the API stops returning one
    #[default]
    Cursor,
    /// Cursor pagination inside sliding seven-day windows
    TimeWindow,
}

/// Per-stream inputs to parameter construction
#[derive(Debug, Clone, Default)]
pub struct StreamContext {
    /// Stream name, for logging
    pub stream: String,
    /// Replication key, if the stream is incremental
    pub replication_key: Option<String>,
    /// Records per page (`limit`)
    pub page_size: u32,
    /// Static parameters sent with every request
    pub extra_params: StringMap,
    /// Bookmark to resume from, or the configured start date
    pub starting_timestamp: Option<DateTime<Utc>>,
}

impl StreamContext {
    /// Create a context with the default page size
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
            page_size: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    /// Set the replication key
    #[must_use]
    pub fn replication_key(mut self, key: impl Into<String>) -> Self {
        self.replication_key = Some(key.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Add a static request parameter
    #[must_use]
    pub fn extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    /// Set the starting timestamp
    #[must_use]
    pub fn starting_at(mut self, ts: DateTime<Utc>) -> Self {
        self.starting_timestamp = Some(ts);
        self
    }
}

/// Page size used when a stream does not set one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Width of one date window
pub const WINDOW_DAYS: i64 = 7;

/// Date range queried by the time-window strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive lower bound (`updated_after`)
    pub start: DateTime<Utc>,
    /// Upper bound (`updated_before`)
    pub end: DateTime<Utc>,
    /// Wall clock frozen when the run started
    pub today: DateTime<Utc>,
}

impl DateWindow {
    /// First window of a run
    pub fn new(start: DateTime<Utc>, today: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + Duration::days(WINDOW_DAYS),
            today,
        }
    }

    /// Slide to the next window.
    ///
    /// Consecutive windows overlap by one second.
    pub fn advance(&mut self) {
        self.start = self.end - Duration::seconds(1);
        self.end = self.start + Duration::days(WINDOW_DAYS) + Duration::seconds(1);
    }

    /// Whether there is time left after this window
    pub fn has_next(&self) -> bool {
        self.end < self.today
    }
}

/// Where a time-window paginator is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPhase {
    /// No request built yet
    #[default]
    Uninitialized,
    /// Following cursors inside the current window
    Paging,
    /// Window exhausted, next request slides it
    Advancing,
    /// Last window exhausted
    Done,
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Build the query parameters of the next request.
    ///
    /// `previous` is `None` for the first page of a run.
    fn build_params(
        &mut self,
        context: &StreamContext,
        previous: Option<&PageToken>,
    ) -> Result<StringMap>;

    /// Derive the token for the next page from a decoded response body
    fn next_token(&mut self, body: &Value, previous: Option<&PageToken>) -> Result<PageToken>;
}

impl PaginationKind {
    /// Fresh paginator for one run of a stream
    pub fn build(self) -> Box<dyn Paginator> {
        match self {
            Self::Cursor => Box::new(super::CursorPaginator::new()),
            Self::TimeWindow => Box::new(super::TimeWindowPaginator::new()),
        }
    }
}
