//! Pagination module
//!
//! Supports: `nextUrl` cursors and cursors inside sliding date windows
//!
//! # Overview
//!
//! For every page the stream driver asks the paginator for the request
//! parameters, performs the call, then hands the decoded body back to derive
//! the [`PageToken`] of the next page. The loop ends on [`PageToken::NoMore`].

mod strategies;
mod types;

pub use strategies::{
    cursor_from_url, extract_next_url, CursorPaginator, TimeWindowPaginator, CURSOR_PARAM,
};
pub use types::{
    DateWindow, PageToken, PaginationKind, Paginator, StreamContext, WindowPhase,
    DEFAULT_PAGE_SIZE, WINDOW_DAYS,
};
