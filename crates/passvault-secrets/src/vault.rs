//! The vault: password generation plus encrypted, append-only storage.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use passvault_core::config::VaultConfig;
use passvault_core::SecretString;
use tracing::info;

use crate::error::{Result, SecretError};
use crate::keys::KeyManager;
use crate::password;
use crate::store::{SecretStore, SqliteSecretStore};
use crate::types::{validate_owner, OwnerSummary, SecretRecord};

/// Generates passwords and stores them encrypted per owner id.
///
/// Cloning is cheap; clones share the same key and store.
#[derive(Clone)]
pub struct SecretVault {
    keys: Arc<KeyManager>,
    store: Arc<dyn SecretStore>,
}

impl SecretVault {
    /// Build a vault from an already-loaded key and an open store.
    pub fn new(keys: Arc<KeyManager>, store: Arc<dyn SecretStore>) -> Self {
        Self { keys, store }
    }

    /// Load (or create) the master key and open the SQLite store named by `config`.
    pub async fn open(config: &VaultConfig) -> Result<Self> {
        let key_path = config.key_file_path()?;
        let db_path = config.database_path()?;

        let keys = KeyManager::load_or_create(&key_path)?;
        let store = SqliteSecretStore::open(
            &db_path,
            Duration::from_millis(config.busy_timeout_ms),
        )
        .await?;

        Ok(Self::new(Arc::new(keys), Arc::new(store)))
    }

    /// The key manager backing this vault.
    pub fn keys(&self) -> &KeyManager {
        &self.keys
    }

    /// Generate a password; see [`password::generate_password`].
    pub fn generate_password(&self, requested_length: Option<i64>) -> SecretString {
        password::generate_password(requested_length)
    }

    /// Encrypt `plaintext` and append it as a new record for `owner_id`.
    pub async fn store_secret(&self, owner_id: &str, plaintext: &str) -> Result<()> {
        validate_owner(owner_id)?;

        let blob = self.keys.encrypt(plaintext.as_bytes())?;
        let record = SecretRecord {
            owner_id: owner_id.to_string(),
            ciphertext: STANDARD.encode(blob),
        };
        self.store.append(&record).await?;

        info!(owner_id, "stored secret");
        Ok(())
    }

    /// Decrypt the earliest secret stored for `owner_id`.
    ///
    /// Returns `Ok(None)` when the owner has no records.
    pub async fn retrieve_secret(&self, owner_id: &str) -> Result<Option<SecretString>> {
        validate_owner(owner_id)?;

        let Some(record) = self.store.first_for_owner(owner_id).await? else {
            info!(owner_id, "no secret stored for owner");
            return Ok(None);
        };

        let blob = STANDARD
            .decode(record.ciphertext.as_bytes())
            .map_err(|e| SecretError::Integrity(format!("stored ciphertext is not base64: {e}")))?;
        let plaintext = self.keys.decrypt(&blob)?;
        let value = String::from_utf8(plaintext)
            .map_err(|_| SecretError::Integrity("decrypted secret is not UTF-8".to_string()))?;

        info!(owner_id, "retrieved secret");
        Ok(Some(SecretString::new(value)))
    }

    /// Generate a password and store it for `owner_id` in one step.
    ///
    /// Nothing is returned unless the store succeeded.
    pub async fn issue_password(
        &self,
        owner_id: &str,
        requested_length: Option<i64>,
    ) -> Result<SecretString> {
        validate_owner(owner_id)?;
        let password = self.generate_password(requested_length);
        self.store_secret(owner_id, password.expose_secret()).await?;
        Ok(password)
    }

    /// Number of records stored for `owner_id`.
    pub async fn record_count(&self, owner_id: &str) -> Result<u64> {
        validate_owner(owner_id)?;
        self.store.count_for_owner(owner_id).await
    }

    /// All owners with at least one record.
    pub async fn owners(&self) -> Result<Vec<OwnerSummary>> {
        self.store.owners().await
    }
}
