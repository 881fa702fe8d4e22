//! State management module
//!
//! Tracks Singer bookmarks so that incremental streams resume where the
//! previous run stopped.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - Singer state with per-stream bookmarks
//! - `StateManager` - Shared bookmark tracking during a run

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{compare_bookmarks, PartitionState, State, StreamState};
