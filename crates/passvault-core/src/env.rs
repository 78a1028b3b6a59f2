//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable as a u64.
pub fn get_u64(name: &str) -> Option<u64> {
    get_var(name).and_then(|v| v.parse().ok())
}

/// Environment variable names recognised by PassVault.
pub mod vars {
    /// Path to the config file.
    pub const CONFIG: &str = "PASSVAULT_CONFIG";

    /// Hex-encoded master key. Takes priority over the key file.
    pub const MASTER_KEY: &str = "PASSVAULT_MASTER_KEY";

    /// Overrides `vault.key_file`.
    pub const KEY_FILE: &str = "PASSVAULT_KEY_FILE";

    /// Overrides `vault.database`.
    pub const DATABASE: &str = "PASSVAULT_DATABASE";

    /// Overrides `vault.busy_timeout_ms`.
    pub const BUSY_TIMEOUT_MS: &str = "PASSVAULT_BUSY_TIMEOUT_MS";
}
