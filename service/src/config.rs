//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use envelope_eligibility::{PageProbe, ReconcilerConfig};
use envelope_feed::source::DEFAULT_PAGE_SIZE;
use envelope_types::GRACE_PERIOD_MS;
use envelope_utils::LogFormat;

use crate::ServiceError;

/// Configuration for an [`crate::EnvelopeService`].
///
/// Can be loaded from a TOML file via [`EnvelopeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Base URL of the transaction feed API.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Per-request timeout for feed calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Destination chain a bridge transaction must target to count.
    #[serde(default = "default_target_chain_id")]
    pub target_chain_id: u16,

    /// Records requested per feed page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Slack after the window end for still in-flight transactions.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,

    /// Page screening strategy: "edges" or "exhaustive".
    #[serde(default)]
    pub page_probe: PageProbe,

    /// Directory holding the LMDB wallet state database.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_feed_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_target_chain_id() -> u16 {
    2
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_grace_period_ms() -> u64 {
    GRACE_PERIOD_MS
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./envelope_data")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EnvelopeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        let config: Self = toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))?;
        if config.page_size == 0 {
            return Err(ServiceError::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn reconciler_config(&self) -> ReconcilerConfig {
        ReconcilerConfig {
            target_chain_id: self.target_chain_id,
            page_size: self.page_size,
            grace_period_ms: self.grace_period_ms,
            page_probe: self.page_probe,
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            request_timeout_secs: default_request_timeout_secs(),
            target_chain_id: default_target_chain_id(),
            page_size: default_page_size(),
            grace_period_ms: default_grace_period_ms(),
            page_probe: PageProbe::default(),
            data_dir: default_data_dir(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
