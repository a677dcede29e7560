//! # Dashboard Configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML file
//! 3. `DASHBOARD_*` environment variables
//!
//! ## YAML Format
//!
//! ```yaml
//! api:
//!   base_url: "http://localhost:3000/api"
//!   token: null
//!   timeout_secs: 15
//! ledger:
//!   unknown_child_policy: accept_and_create
//!   recent_limit: 5
//! log_level: info
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::coin_ledger::{UnknownChildPolicy, DEFAULT_RECENT_LIMIT};

pub const ENV_API_URL: &str = "DASHBOARD_API_URL";
pub const ENV_API_TOKEN: &str = "DASHBOARD_API_TOKEN";
pub const ENV_LOG_LEVEL: &str = "DASHBOARD_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token attached to every request when set
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token: None,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub unknown_child_policy: UnknownChildPolicy,
    pub recent_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            unknown_child_policy: UnknownChildPolicy::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub ledger: LedgerConfig,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ledger: LedgerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the YAML file when it exists, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                info!("Config file {:?} not found, using defaults", path);
                Self::default()
            }
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&yaml_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded dashboard config from {:?}", path);
        Ok(config)
    }

    /// Apply `DASHBOARD_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(token) = non_empty(ENV_API_TOKEN) {
            self.api.token = Some(token);
        }
        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self
    }
}
