//! User settings and preferences
//!
//! Manages application settings stored in ~/.pgdba/config.toml

use crate::config::ConnectionConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where tracing output goes; defaults to ~/.pgdba/pgdba.log
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rows moved by PageUp/PageDown in table screens
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: default_log_level(),
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    /// Resolve the log file path, falling back to the config directory.
    /// `None` when neither is available.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_path_in(ConnectionConfig::config_dir())
    }

    fn log_path_in(&self, config_dir: ConfigResult<PathBuf>) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(path.clone()),
            None => config_dir.ok().map(|dir| dir.join("pgdba.log")),
        }
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        if settings.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        Ok(settings)
    }
}

/// Default settings file path (~/.pgdba/config.toml)
pub fn settings_file() -> ConfigResult<PathBuf> {
    Ok(ConnectionConfig::config_dir()?.join("config.toml"))
}

/// Load settings from a file; a missing file yields defaults
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::NotFound(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Settings::from_toml(&content)
}

/// Load settings from the default location; no home directory means defaults
pub fn load_settings() -> ConfigResult<Settings> {
    load_settings_at(settings_file())
}

fn load_settings_at(file: ConfigResult<PathBuf>) -> ConfigResult<Settings> {
    match file {
        Ok(path) => load_settings_from(&path),
        Err(ConfigError::NoHomeDir) => Ok(Settings::default()),
        Err(e) => Err(e),
    }
}
