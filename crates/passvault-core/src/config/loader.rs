//! Configuration loading and persistence.

use super::Config;
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.vault.busy_timeout_ms == 0 {
            errors.push("vault.busy_timeout_ms must be greater than 0".to_string());
        }

        if let Some(key_file) = &self.vault.key_file {
            if key_file.as_os_str().is_empty() {
                errors.push("vault.key_file must not be empty".to_string());
            }
        }
        if let Some(database) = &self.vault.database {
            if database.as_os_str().is_empty() {
                errors.push("vault.database must not be empty".to_string());
            }
        }

        // The key must never share a file with the ciphertext it protects.
        match (self.vault.key_file_path(), self.vault.database_path()) {
            (Ok(key), Ok(db)) if key == db => {
                errors.push(format!(
                    "vault.key_file and vault.database both point to {}",
                    key.display()
                ));
            }
            (Err(e), _) | (_, Err(e)) => errors.push(e.to_string()),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Apply `PASSVAULT_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = env::get_var(env::vars::KEY_FILE) {
            self.vault.key_file = Some(PathBuf::from(path));
        }
        if let Some(path) = env::get_var(env::vars::DATABASE) {
            self.vault.database = Some(PathBuf::from(path));
        }
        if let Some(ms) = env::get_u64(env::vars::BUSY_TIMEOUT_MS) {
            self.vault.busy_timeout_ms = ms;
        }
    }

    /// Load configuration from the default path, falling back to defaults if no file exists.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    /// Environment overrides are applied on success.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load_or_default_at(&path)
    }

    /// Like [`Config::load_or_default`], with the default location given explicitly.
    pub fn load_or_default_at(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit path, or the default location when `None`.
    ///
    /// Unlike the default location, an explicit path that is missing is an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let mut config = Self::load(path)?;
                config.apply_env_overrides();
                Ok(config)
            }
            None => Self::load_or_default(),
        }
    }
}

/// Configuration builder for creating configs programmatically.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key file path.
    pub fn key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vault.key_file = Some(path.into());
        self
    }

    /// Set the database path.
    pub fn database(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vault.database = Some(path.into());
        self
    }

    /// Set the database busy timeout.
    pub fn busy_timeout_ms(mut self, ms: u64) -> Self {
        self.config.vault.busy_timeout_ms = ms;
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: super::LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Build the config.
    pub fn build(self) -> Config {
        self.config
    }
}
