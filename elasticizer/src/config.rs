//! Configuration for the translator and the HTTP adapter
//!
//! Loaded from a TOML file; every section and field has a default so an
//! empty (or missing) file yields a usable configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Refresh mode used for writes unless configured otherwise.
pub const REFRESH_WAIT_FOR: &str = "wait_for";

/// Page size sent to the engine when the caller did not ask for pagination.
pub const MAX_RESULTS: u64 = 2_147_483_519;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings a translator instance is built from. Immutable once handed over.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Engine endpoint, e.g. `http://localhost:9200`
    #[serde(default = "default_host")]
    pub host: String,
    /// Document type every request is issued against
    #[serde(default = "default_document_type")]
    pub document_type: String,
    /// Namespace prepended to every logical index name
    #[serde(default)]
    pub prefix: String,
    /// Write visibility mode (`wait_for`, `true`, `false`)
    #[serde(default = "default_refresh")]
    pub refresh: String,
    /// Transport-level timeout. The translator itself never times out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "http://localhost:9200".to_string()
}

fn default_document_type() -> String {
    "_doc".to_string()
}

fn default_refresh() -> String {
    REFRESH_WAIT_FOR.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            document_type: default_document_type(),
            prefix: String::new(),
            refresh: default_refresh(),
            request_timeout_secs: None,
        }
    }
}

impl EngineConfig {
    pub fn new(host: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            document_type: document_type.into(),
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = refresh.into();
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Reject configurations no engine client can be built from
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("engine.host must not be empty".to_string()));
        }
        if self.document_type.trim().is_empty() {
            return Err(Error::Config(
                "engine.document_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Path the item routes are nested under; empty mounts them at the root.
    #[serde(default)]
    pub base_path: String,
    /// Maximum request body size in bytes (default: 10MB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:7071".to_string()
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            base_path: String::new(),
            max_body_size: default_max_body_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info,elasticizer=debug".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
