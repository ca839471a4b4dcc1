//! Read-only application configuration.
//!
//! The config file supplies the dataset base URL and, optionally, the
//! selectable dataset list. Review decisions are never persisted, so the app
//! only ever reads this file; it is never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

use super::catalog::{self, DatasetOption};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Base URL used when no config file exists.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8701";

/// Application configuration loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL every dataset and relative media path resolves against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Selectable datasets; empty lists fall back to the built-in catalog.
    #[serde(default = "catalog::built_in")]
    pub datasets: Vec<DatasetOption>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            datasets: catalog::built_in(),
        }
    }
}

impl AppConfig {
    /// Replace degenerate values with usable defaults.
    fn normalized(mut self) -> Self {
        if self.base_url.trim().is_empty() {
            self.base_url = default_base_url();
        }
        if self.datasets.is_empty() {
            self.datasets = catalog::built_in();
        }
        self
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Errors that may occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No suitable application directory could be resolved.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for the expected schema.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Resolve the configuration file path inside the app root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir()?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load configuration from a specific path, defaulting when absent.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&text)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
        .map(AppConfig::normalized)
}
