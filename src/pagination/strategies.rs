//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{DateWindow, PageToken, Paginator, StreamContext, WindowPhase};
use crate::decode::find_matches;
use crate::error::{Error, Result};
use crate::types::{format_api_datetime, StringMap};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Query parameter carrying the cursor, both in requests and in `nextUrl`
pub const CURSOR_PARAM: &str = "cursor";

/// Base used to resolve relative next URLs
const RELATIVE_BASE: &str = "http://localhost/";

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor pagination over `nextUrl`
///
/// The API returns the link to the following page either at the top level
/// of the body or inside the `data` object. Only the `cursor` query
/// parameter of that link is reused; the rest of the request is rebuilt
/// from the stream context.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorPaginator;

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new() -> Self {
        Self
    }
}

impl Paginator for CursorPaginator {
    fn build_params(
        &mut self,
        context: &StreamContext,
        previous: Option<&PageToken>,
    ) -> Result<StringMap> {
        let mut params = StringMap::new();
        params.insert("limit".to_string(), context.page_size.to_string());

        if let Some(cursor) = previous.and_then(PageToken::as_cursor) {
            params.insert(CURSOR_PARAM.to_string(), cursor.to_string());
        }

        if let Some(key) = &context.replication_key {
            params.insert("sort".to_string(), "asc".to_string());
            params.insert("order_by".to_string(), key.clone());
        }

        for (key, value) in &context.extra_params {
            params.insert(key.clone(), value.clone());
        }

        Ok(params)
    }

    fn next_token(&mut self, body: &Value, _previous: Option<&PageToken>) -> Result<PageToken> {
        match extract_next_url(body)? {
            Some(next_url) => cursor_from_url(&next_url).map(PageToken::Cursor),
            None => Ok(PageToken::NoMore),
        }
    }
}

/// Locate the next-page URL in a response body.
///
/// Returns `None` when the body says there is no next page, including
/// bodies whose envelope does not have the expected shape.
pub fn extract_next_url(body: &Value) -> Result<Option<String>> {
    if let Some(found) = first_match(body, "$.nextUrl")? {
        return url_value(&found);
    }

    match body.get("data") {
        Some(Value::Object(_)) => match first_match(body, "$.data.nextUrl")? {
            Some(found) => url_value(&found),
            None => Ok(None),
        },
        Some(Value::Array(_)) => {
            debug!("Response data is a list without nextUrl, last page");
            Ok(None)
        }
        Some(other) => {
            warn!(
                "Malformed response envelope, 'data' is {}; treating as last page",
                json_kind(other)
            );
            Ok(None)
        }
        None => {
            warn!("Malformed response envelope, no 'data' key; treating as last page");
            Ok(None)
        }
    }
}

/// First non-null match of `path`
fn first_match(body: &Value, path: &str) -> Result<Option<Value>> {
    Ok(find_matches(body, path)?
        .into_iter()
        .find(|value| !value.is_null()))
}

/// Interpret a matched `nextUrl` value
fn url_value(value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(Error::pagination(format!(
            "nextUrl must be a string, got {}",
            json_kind(other)
        ))),
    }
}

/// Pull the `cursor` query parameter out of a next-page URL.
///
/// Relative URLs are accepted.
pub fn cursor_from_url(next_url: &str) -> Result<String> {
    let parsed = match Url::parse(next_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)?.join(next_url)?,
        Err(e) => return Err(e.into()),
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == CURSOR_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            Error::pagination(format!(
                "Next page URL '{next_url}' has no '{CURSOR_PARAM}' parameter"
            ))
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Time Window Pagination
// ============================================================================

/// Cursor pagination inside sliding date windows
///
/// The first request of a run opens a seven-day window at the starting
/// bookmark and freezes "today". Cursors are followed inside the window;
/// once a window has no more pages the paginator asks for the next one,
/// until a window reaches today.
#[derive(Debug, Clone, Default)]
pub struct TimeWindowPaginator {
    window: Option<DateWindow>,
    phase: WindowPhase,
    today_override: Option<DateTime<Utc>>,
}

impl TimeWindowPaginator {
    /// Create a new time-window paginator
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed "today" instead of the wall clock
    #[must_use]
    pub fn with_today(mut self, today: DateTime<Utc>) -> Self {
        self.today_override = Some(today);
        self
    }

    /// Current window, once the first request has been built
    pub fn window(&self) -> Option<&DateWindow> {
        self.window.as_ref()
    }

    /// Current phase
    pub fn phase(&self) -> WindowPhase {
        self.phase
    }
}

impl Paginator for TimeWindowPaginator {
    fn build_params(
        &mut self,
        context: &StreamContext,
        previous: Option<&PageToken>,
    ) -> Result<StringMap> {
        let mut params = StringMap::new();
        params.insert("limit".to_string(), context.page_size.to_string());

        if let Some(cursor) = previous.and_then(PageToken::as_cursor) {
            params.insert(CURSOR_PARAM.to_string(), cursor.to_string());
        }

        if self.phase == WindowPhase::Uninitialized {
            let start = context.starting_timestamp.ok_or_else(|| {
                Error::config(format!(
                    "Stream '{}' has neither a bookmark nor a start_date",
                    context.stream
                ))
            })?;
            let today = self.today_override.unwrap_or_else(Utc::now);
            self.window = Some(DateWindow::new(start, today));
            self.phase = WindowPhase::Paging;
        }

        let window = self
            .window
            .as_mut()
            .ok_or_else(|| Error::pagination("Date window used before initialisation"))?;

        // Sliding only from the advancing phase keeps repeated calls stable
        if self.phase == WindowPhase::Advancing && previous == Some(&PageToken::AdvanceWindow) {
            window.advance();
            self.phase = WindowPhase::Paging;
            debug!(
                "Stream '{}' moved to window {} .. {}",
                context.stream, window.start, window.end
            );
        }

        params.insert("updated_after".to_string(), format_api_datetime(&window.start));
        params.insert("updated_before".to_string(), format_api_datetime(&window.end));

        Ok(params)
    }

    fn next_token(&mut self, body: &Value, previous: Option<&PageToken>) -> Result<PageToken> {
        if let PageToken::Cursor(cursor) = CursorPaginator.next_token(body, previous)? {
            return Ok(PageToken::Cursor(cursor));
        }

        if self.window.as_ref().is_some_and(DateWindow::has_next) {
            self.phase = WindowPhase::Advancing;
            Ok(PageToken::AdvanceWindow)
        } else {
            self.phase = WindowPhase::Done;
            Ok(PageToken::NoMore)
        }
    }
}
