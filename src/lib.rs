//! # tap-easyecom
//!
//! Singer tap for the EasyEcom API: products, kits, suppliers, sell and
//! purchase orders, goods receipts and returns.
//!
//! ## Features
//!
//! - **Token management**: JWT login with expiry tracking, refreshed
//!   credentials written back to the config file
//! - **Pagination**: `nextUrl` cursors, and cursors inside sliding
//!   seven-day windows for sell orders
//! - **Incremental sync**: bookmarks per stream, Singer state in and out
//! - **HTTP**: retries with backoff, `Retry-After` and rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tap_easyecom::auth::TokenManager;
//! use tap_easyecom::config::{ConfigStore, FileConfigStore};
//! use tap_easyecom::engine::SyncEngine;
//! use tap_easyecom::http::{HttpClient, HttpClientConfig};
//! use tap_easyecom::state::StateManager;
//!
//! #[tokio::main]
//! async fn main() -> tap_easyecom::Result<()> {
//!     let store: Arc<dyn ConfigStore> = Arc::new(FileConfigStore::new("config.json"));
//!     let config = store.load().await?;
//!     let tokens = Arc::new(TokenManager::from_store(store).await?);
//!
//!     let http = HttpClientConfig::builder().base_url(config.base_url()).build();
//!     let client = HttpClient::with_config(http)?.with_token_manager(tokens);
//!
//!     let mut engine = SyncEngine::new(client, StateManager::in_memory())
//!         .with_start_date(config.start_timestamp());
//!     let mut messages = Vec::new();
//!     engine.sync_all(&tap_easyecom::streams::select_streams(None)?, &mut messages).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    CLI (read / check / streams)              │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │ SyncEngine: SCHEMA → RECORD* → STATE per stream              │
//! └──────┬──────────────┬───────────────┬──────────────┬─────────┘
//!        │              │               │              │
//! ┌──────┴─────┐ ┌──────┴──────┐ ┌──────┴──────┐ ┌─────┴───────┐
//! │ Streams    │ │ Pagination  │ │ HTTP        │ │ State       │
//! │ catalog    │ │ Cursor      │ │ Retry       │ │ Bookmarks   │
//! │ schemas    │ │ TimeWindow  │ │ Rate limit  │ │ Pruning     │
//! └────────────┘ └─────────────┘ └──────┬──────┘ └─────────────┘
//!                                ┌──────┴──────┐
//!                                │ TokenManager│──▶ ConfigStore
//!                                └─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration and config store
pub mod config;

/// Token manager
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Response decoders
pub mod decode;

/// JSON Schema types
pub mod schema;

/// Stream catalog
pub mod streams;

/// State management and bookmarks
pub mod state;

/// Main execution engine
pub mod engine;

/// Singer message output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::TokenManager;
pub use config::{ConfigStore, FileConfigStore, MemoryConfigStore, TapConfig};
pub use engine::{Message, SyncEngine};
pub use pagination::{PageToken, Paginator};
pub use streams::{get_stream, list_streams, StreamDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
