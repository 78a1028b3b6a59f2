//! Shared fixtures for PassVault integration tests.

use std::path::PathBuf;

use passvault_core::config::VaultConfig;
use passvault_secrets::SecretVault;
use tempfile::TempDir;

/// A throwaway deployment: key file and database inside one temp dir.
pub struct Deployment {
    pub dir: TempDir,
    pub config: VaultConfig,
}

impl Deployment {
    /// Create a fresh deployment with nothing on disk yet.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = VaultConfig {
            key_file: Some(dir.path().join("secret.key")),
            database: Some(dir.path().join("passwords.db")),
            ..Default::default()
        };
        Self { dir, config }
    }

    /// Path of the key file.
    pub fn key_path(&self) -> PathBuf {
        self.dir.path().join("secret.key")
    }

    /// Path of the database.
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("passwords.db")
    }

    /// Open the vault, simulating a process start.
    pub async fn start(&self) -> SecretVault {
        SecretVault::open(&self.config).await.expect("open vault")
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}
