//! CLI commands and argument parsing
//!
//! `tap-easyecom --config c.json [--state s.json]` reads like any Singer
//! tap; the same flags are accepted under the explicit `read` subcommand.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// EasyEcom Singer tap
#[derive(Parser, Debug)]
#[command(name = "tap-easyecom")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Read flags given without a subcommand
    #[command(flatten)]
    pub read: ReadArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Command to run; no subcommand means `read`
    pub fn resolved_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Read(self.read.clone()))
    }
}

/// Flags of the `read` command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadArgs {
    /// Configuration file (JSON); refreshed credentials are written back to it
    #[arg(short, long, required = true)]
    pub config: Option<PathBuf>,

    /// State file (JSON)
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Streams to sync (comma-separated, empty = all)
    #[arg(long, value_delimiter = ',')]
    pub streams: Vec<String>,

    /// Maximum records per stream
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Emit state after each page
    #[arg(long)]
    pub state_per_page: bool,

    /// Stop at the first failing stream
    #[arg(long)]
    pub fail_fast: bool,
}

impl ReadArgs {
    /// Config path; clap enforces it, so `None` only comes from hand-built args
    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Extract records and emit Singer messages on stdout
    Read(ReadArgs),

    /// Log in if needed and fetch one page to test the connection
    Check {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// List available stream names
    Streams,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

impl From<OutputFormat> for crate::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Pretty => Self::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read() {
        let cli = Cli::parse_from([
            "tap-easyecom",
            "read",
            "--config",
            "config.json",
            "--streams",
            "products,returns",
            "--state-per-page",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.resolved_command() {
            Commands::Read(args) => {
                assert_eq!(args.config_path(), Some(Path::new("config.json")));
                assert!(args.state.is_none());
                assert_eq!(args.streams, vec!["products", "returns"]);
                assert!(args.state_per_page);
                assert!(args.max_records.is_none());
                assert!(!args.fail_fast);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_bare_flags_default_to_read() {
        let cli = Cli::parse_from([
            "tap-easyecom",
            "--config",
            "config.json",
            "--state",
            "state.json",
        ]);

        assert!(cli.command.is_none());
        assert_eq!(
            cli.resolved_command(),
            Commands::Read(ReadArgs {
                config: Some(PathBuf::from("config.json")),
                state: Some(PathBuf::from("state.json")),
                ..ReadArgs::default()
            })
        );
    }

    #[test]
    fn test_bare_invocation_requires_config() {
        assert!(Cli::try_parse_from(["tap-easyecom"]).is_err());
        assert!(Cli::try_parse_from(["tap-easyecom", "read"]).is_err());
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::parse_from(["tap-easyecom", "streams", "--format", "pretty"]);
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert_eq!(cli.resolved_command(), Commands::Streams);
    }

    #[test]
    fn test_check_requires_config() {
        assert!(Cli::try_parse_from(["tap-easyecom", "check"]).is_err());
    }
}
