//! Configuration management for Scorepad

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Create a default configuration.
    pub fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                path: "~/.local/share/scorepad/scorepad.db".to_string(),
            },
        }
    }
}

/// Resolve the configuration file path following the XDG Base Directory spec.
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SCOREPAD_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("scorepad").join("config.toml"))
}

/// Expand the configured database path, defaulting under the XDG data dir.
pub fn resolve_db_path(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return Ok(PathBuf::from(shellexpand::tilde(path).to_string()));
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("scorepad").join("scorepad.db"))
}
