//! # passvault-core
//!
//! Core types, configuration, and utilities for PassVault.
//!
//! This crate provides shared functionality used across all PassVault crates:
//!
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Paths**: Resolution of the key file, database, and config locations
//! - **Secrets**: A zero-on-drop string type for plaintext passwords

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;
