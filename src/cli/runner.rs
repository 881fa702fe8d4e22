//! CLI runner - executes commands

use crate::auth::TokenManager;
use crate::cli::commands::{Cli, Commands, ReadArgs};
use crate::config::{ConfigStore, FileConfigStore, TapConfig};
use crate::engine::{SyncConfig, SyncEngine, SyncStats};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::{JsonLinesWriter, MessageSink, OutputFormat};
use crate::state::StateManager;
use crate::streams::{get_stream, list_streams, select_streams};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Stream fetched by `check`
const CHECK_STREAM: &str = "products";

/// CLI runner
#[derive(Debug)]
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.cli.resolved_command() {
            Commands::Read(args) => {
                let mut sink = JsonLinesWriter::with_format(std::io::stdout(), self.format());
                let stats = Self::read(&args, &mut sink).await?;
                if stats.errors() > 0 {
                    return Err(Error::Other(format!(
                        "{} stream(s) failed: {}",
                        stats.errors(),
                        stats.failed_streams.join(", ")
                    )));
                }
                Ok(())
            }
            Commands::Check { config } => self.check(&config).await,
            Commands::Streams => self.streams(),
        }
    }

    /// Run the `read` command, sending messages to `sink`
    pub async fn read_into(&self, sink: &mut dyn MessageSink) -> Result<SyncStats> {
        match self.cli.resolved_command() {
            Commands::Read(args) => Self::read(&args, sink).await,
            _ => Err(Error::config("read_into called for a non-read command")),
        }
    }

    async fn read(args: &ReadArgs, sink: &mut dyn MessageSink) -> Result<SyncStats> {
        let config = args
            .config_path()
            .ok_or_else(|| Error::config("--config is required to read"))?;
        let selected = select_streams(Some(args.streams.as_slice()))?;
        let (tap_config, client) = Self::connect(config).await?;

        let state = match &args.state {
            Some(path) => StateManager::from_file(path)
                .context(format!("Loading state from {}", path.display()))?,
            None => StateManager::in_memory(),
        }
        .with_pruned_streams(tap_config.partition_pruned_streams.iter().cloned());

        let sync_config = SyncConfig::new()
            .with_state_per_page(args.state_per_page)
            .with_max_records(args.max_records.unwrap_or(0))
            .with_fail_fast(args.fail_fast);

        let mut engine = SyncEngine::new(client, state)
            .with_config(sync_config)
            .with_start_date(tap_config.start_timestamp());

        let stats = engine.sync_all(&selected, sink).await?;

        info!(
            "Sync finished: {} records, {} pages, {} streams in {}ms",
            stats.records_synced, stats.pages_fetched, stats.streams_synced, stats.duration_ms
        );

        Ok(stats)
    }

    /// Check connection
    async fn check(&self, config_path: &Path) -> Result<()> {
        let result = self.check_connection(config_path).await;

        let status = match &result {
            Ok(count) => json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "SUCCEEDED",
                    "message": format!("Connection successful, {count} records on first page")
                }
            }),
            Err(e) => json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "FAILED",
                    "message": format!("Connection failed: {e}")
                }
            }),
        };
        self.output_message(&status);

        result.map(|_| ())
    }

    async fn check_connection(&self, config_path: &Path) -> Result<usize> {
        let stream = get_stream(CHECK_STREAM).ok_or_else(|| Error::StreamNotFound {
            stream: CHECK_STREAM.to_string(),
        })?;
        let (tap_config, client) = Self::connect(config_path).await?;

        let engine = SyncEngine::new(client, StateManager::in_memory())
            .with_start_date(tap_config.start_timestamp());
        let records = engine.fetch_first_page(stream).await?;
        Ok(records.len())
    }

    /// List available streams
    fn streams(&self) -> Result<()> {
        self.output_message(&json!({
            "type": "STREAMS",
            "streams": list_streams(),
        }));
        Ok(())
    }

    /// Load and validate the config, then build an authenticated client
    async fn connect(config_path: &Path) -> Result<(TapConfig, HttpClient)> {
        let store: Arc<dyn ConfigStore> = Arc::new(FileConfigStore::new(config_path));
        let tap_config = store.load().await?;
        tap_config.validate()?;

        let token_manager = Arc::new(TokenManager::from_store(Arc::clone(&store)).await?);

        let mut builder = HttpClientConfig::builder().base_url(tap_config.base_url());
        if let Some(agent) = tap_config.user_agent.as_deref().filter(|a| !a.is_empty()) {
            builder = builder.user_agent(agent);
        }
        let client = HttpClient::with_config(builder.build())?.with_token_manager(token_manager);

        Ok((tap_config, client))
    }

    fn format(&self) -> OutputFormat {
        self.cli.format.into()
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.format() {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
