//! Tap configuration and its backing store
//!
//! The config file doubles as the credential cache: every token refresh
//! writes the new credential back into it. Access goes through the
//! [`ConfigStore`] trait so the token manager only ever sees a narrow
//! load/save capability.

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::types::{parse_timestamp, JsonObject, OptionStringExt};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.easyecom.io";

/// Path of the login endpoint, relative to the base URL
pub const TOKEN_PATH: &str = "/access/token";

// ============================================================================
// TapConfig
// ============================================================================

/// Tap configuration as stored in the config file
///
/// Keys the tap does not know about are kept in `extra` and written back
/// untouched when the credential is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TapConfig {
    /// Login email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Login password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Warehouse location key sent with the login request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_key: Option<String>,

    /// Cached bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Lifetime of the cached token in seconds
    #[serde(default)]
    pub expires_in: i64,

    /// Unix timestamp (seconds) of the login that produced the cached token
    #[serde(default)]
    pub created_at: i64,

    /// Replication start for streams without a bookmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Optional User-Agent header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// API root override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Streams whose partition bookmarks are collapsed before every STATE message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partition_pruned_streams: Vec<String>,

    /// Every other key in the file
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl TapConfig {
    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid config JSON: {e}")))
    }

    /// Check that the login fields are present
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("email", &self.email),
            ("password", &self.password),
            ("location_key", &self.location_key),
        ] {
            if value.as_deref().map_or(true, str::is_empty) {
                return Err(Error::missing_field(field));
            }
        }

        if let Some(start) = &self.start_date {
            if parse_timestamp(start).is_none() {
                return Err(Error::invalid_value(
                    "start_date",
                    format!("cannot parse '{start}' as a timestamp"),
                ));
            }
        }

        Ok(())
    }

    /// API root, without trailing slash
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Full URL of the login endpoint
    pub fn token_url(&self) -> String {
        format!("{}{TOKEN_PATH}", self.base_url())
    }

    /// Parsed `start_date`
    pub fn start_timestamp(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_timestamp)
    }

    /// The cached credential
    pub fn credential(&self) -> Credential {
        Credential {
            access_token: self.access_token.clone().unwrap_or_default(),
            expires_in: self.expires_in,
            created_at: self.created_at,
        }
    }

    /// Replace the cached credential
    pub fn set_credential(&mut self, credential: &Credential) {
        self.access_token = Some(credential.access_token.clone());
        self.expires_in = credential.expires_in;
        self.created_at = credential.created_at;
    }

    /// Login form fields
    pub fn login_form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("email", self.email.clone().unwrap_or_default()),
            ("password", self.password.clone().unwrap_or_default()),
            ("location_key", self.location_key.clone().unwrap_or_default()),
        ]
    }
}

// ============================================================================
// ConfigStore
// ============================================================================

/// Read/write access to the persisted config object
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the whole config
    async fn load(&self) -> Result<TapConfig>;

    /// Replace the whole config
    async fn save(&self, config: &TapConfig) -> Result<()>;
}

/// Config persisted as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a store backed by the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self) -> Result<TapConfig> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                self.path.display()
            ))
        })?;
        TapConfig::from_json(&contents)
    }

    async fn save(&self, config: &TapConfig) -> Result<()> {
        let contents = to_pretty_json(config)?;

        // Write to temp file first, then rename over the config file
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await.map_err(|e| {
            Error::config(format!("Failed to write config file: {e}"))
        })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::config(format!("Failed to rename config file: {e}")))?;

        Ok(())
    }
}

/// Serialize with four-space indentation, matching hand-edited config files
fn to_pretty_json(config: &TapConfig) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config.serialize(&mut serializer)?;
    Ok(buf)
}

/// In-memory config store, used when no file should be touched
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    config: RwLock<TapConfig>,
    saves: std::sync::atomic::AtomicUsize,
}

impl MemoryConfigStore {
    /// Create a store holding the given config
    pub fn new(config: TapConfig) -> Self {
        Self {
            config: RwLock::new(config),
            saves: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Current stored config
    pub async fn snapshot(&self) -> TapConfig {
        self.config.read().await.clone()
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> usize {
        self.saves.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> Result<TapConfig> {
        Ok(self.config.read().await.clone())
    }

    async fn save(&self, config: &TapConfig) -> Result<()> {
        *self.config.write().await = config.clone();
        self.saves
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> TapConfig {
        TapConfig::from_json(
            r#"{
                "email": "ops@example.com",
                "password": "hunter2",
                "location_key": "ne1234",
                "start_date": "2024-01-01T00:00:00Z",
                "custom_setting": {"nested": true}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_config_parse_keeps_unknown_keys() {
        let config = sample();
        assert_eq!(config.email.as_deref(), Some("ops@example.com"));
        assert_eq!(config.expires_in, 0);
        assert_eq!(config.created_at, 0);
        assert_eq!(config.extra.get("custom_setting"), Some(&json!({"nested": true})));
    }

    #[test]
    fn test_config_validate() {
        assert!(sample().validate().is_ok());

        let mut config = sample();
        config.location_key = None;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required config field: location_key");

        let mut config = sample();
        config.password = Some(String::new());
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { .. })
        ));

        let mut config = sample();
        config.start_date = Some("not a date".to_string());
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_config_urls() {
        let mut config = sample();
        assert_eq!(config.base_url(), "https://api.easyecom.io");
        assert_eq!(config.token_url(), "https://api.easyecom.io/access/token");

        config.base_url = Some("http://127.0.0.1:9000/".to_string());
        assert_eq!(config.token_url(), "http://127.0.0.1:9000/access/token");
    }

    #[test]
    fn test_config_credential_round_trip() {
        let mut config = sample();
        let credential = Credential {
            access_token: "jwt".to_string(),
            expires_in: 3600,
            created_at: 1_700_000_000,
        };
        config.set_credential(&credential);
        assert_eq!(config.credential(), credential);
    }

    #[tokio::test]
    async fn test_file_store_overwrites_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, serde_json::to_string(&sample()).unwrap()).unwrap();

        let store = FileConfigStore::new(&path);
        let mut config = store.load().await.unwrap();
        config.set_credential(&Credential {
            access_token: "fresh".to_string(),
            expires_in: 86_400,
            created_at: 1_700_000_000,
        });
        store.save(&config).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"access_token\": \"fresh\""));

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["access_token"], "fresh");
        assert_eq!(value["expires_in"], 86_400);
        assert_eq!(value["created_at"], 1_700_000_000);
        assert_eq!(value["email"], "ops@example.com");
        assert_eq!(value["custom_setting"], json!({"nested": true}));
        assert!(!dir.path().join("config.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_missing_file() {
        let store = FileConfigStore::new("/nonexistent/tap-easyecom/config.json");
        assert!(matches!(store.load().await, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_memory_store_counts_saves() {
        let store = MemoryConfigStore::new(sample());
        assert_eq!(store.save_count(), 0);

        let mut config = store.load().await.unwrap();
        config.access_token = Some("abc".to_string());
        store.save(&config).await.unwrap();

        assert_eq!(store.save_count(), 1);
        assert_eq!(store.snapshot().await.access_token.as_deref(), Some("abc"));
    }
}
