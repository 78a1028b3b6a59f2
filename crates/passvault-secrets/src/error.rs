//! Error types for secret management.

use thiserror::Error;

/// Errors that can occur during vault operations.
///
/// Messages carry operation context and owner ids only, never plaintext or
/// key bytes. A missing record is not an error: retrieval returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("Integrity check failed: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Invalid owner id: {0}")]
    InvalidOwner(String),

    #[error("Configuration error: {0}")]
    Config(#[from] passvault_core::ConfigError),
}

impl From<sqlx::Error> for SecretError {
    fn from(e: sqlx::Error) -> Self {
        SecretError::Storage(e.to_string())
    }
}

/// Convenience result alias for vault operations.
pub type Result<T> = std::result::Result<T, SecretError>;
