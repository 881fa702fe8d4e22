//! CLI module
//!
//! Command-line interface of the tap.
//!
//! # Commands
//!
//! - `read` - Extract records as Singer messages (the default when only
//!   `--config`/`--state` flags are given)
//! - `check` - Test credentials and connectivity
//! - `streams` - List stream names

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, ReadArgs};
pub use runner::Runner;
