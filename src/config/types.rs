use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persist::DEFAULT_KEY;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the list collection is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the blob files (default: platform data dir).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Blob key the collection is stored under (default: "shoppingLists").
    #[serde(default = "default_key")]
    pub key: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl StorageConfig {
    /// Configured data directory, or `{data_dir}/shoplist`.
    ///
    /// Falls back to the current directory if data_dir is unavailable.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shoplist")
        })
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
