//! Core configuration types and loading.

use super::defaults::default_channel_prefixes;
use super::permissions::PermissionsConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid permissions: {0}")]
    Permissions(#[from] crate::error::PermissionError),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Command recognition settings.
    pub bot: BotConfig,
    /// Permission tables. Absent means no resolver is configured, and any
    /// command that requires permissions fails with a configuration error.
    pub permissions: Option<PermissionsConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Command recognition configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Marker that starts a prefix-style invocation (e.g., "~").
    pub prefix: String,
    /// Nickname for `nick: command` style invocation.
    pub nickname: Option<String>,
    /// Characters that start a channel name.
    #[serde(default = "default_channel_prefixes")]
    pub channel_prefixes: String,
}
