//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the PassVault base directory (~/.passvault).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".passvault"))
}

/// Get the main config file path (~/.passvault/passvault.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("passvault.json5"))
}

/// Get the default key file path (~/.passvault/secret.key).
pub fn key_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("secret.key"))
}

/// Get the default database path (~/.passvault/passwords.db).
pub fn database_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("passwords.db"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
