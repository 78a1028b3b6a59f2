//! Configuration schema definitions.

use crate::error::ConfigError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main PassVault configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Key and database locations.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vault storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Raw master key file. Defaults to `~/.passvault/secret.key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    /// SQLite database file. Defaults to `~/.passvault/passwords.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// How long a writer waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            key_file: None,
            database: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl VaultConfig {
    /// Resolved key file path, with `~/` expanded.
    pub fn key_file_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.key_file {
            Some(path) => Ok(paths::expand_tilde(&path.to_string_lossy())),
            None => paths::key_file(),
        }
    }

    /// Resolved database path, with `~/` expanded.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database {
            Some(path) => Ok(paths::expand_tilde(&path.to_string_lossy())),
            None => paths::database_file(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The level name as understood by `tracing` env filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Raise verbosity by `steps` levels, saturating at `Trace`.
    pub fn raised(self, steps: u8) -> Self {
        let order = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = order.iter().position(|l| *l == self).unwrap_or(2);
        let idx = (current + steps as usize).min(order.len() - 1);
        order[idx]
    }
}
