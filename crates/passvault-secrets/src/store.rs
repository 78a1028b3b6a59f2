//! Secret storage backends.
//!
//! Defines the [`SecretStore`] trait and provides [`SqliteSecretStore`], an
//! append-only SQLite table of `(owner_id, password)` rows. The store only
//! ever sees ciphertext.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::{Result, SecretError};
use crate::types::{OwnerSummary, SecretRecord};

const MAX_CONNECTIONS: u32 = 4;

/// Async trait for append-only ciphertext storage.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Append a record. Existing records for the same owner are left alone.
    async fn append(&self, record: &SecretRecord) -> Result<()>;

    /// The earliest record stored for `owner_id`, if any.
    ///
    /// A stored value that is not valid text is an `Integrity` error.
    async fn first_for_owner(&self, owner_id: &str) -> Result<Option<SecretRecord>>;

    /// Number of records stored for `owner_id`.
    async fn count_for_owner(&self, owner_id: &str) -> Result<u64>;

    /// Every owner with at least one record, sorted by owner id.
    async fn owners(&self) -> Result<Vec<OwnerSummary>>;
}

/// A SQLite-backed secret store.
///
/// Rows are returned in insertion (`rowid`) order, which is what makes
/// "first stored" well defined for owners with several records.
#[derive(Debug, Clone)]
pub struct SqliteSecretStore {
    pool: SqlitePool,
}

impl SqliteSecretStore {
    /// Open (creating if needed) the database at `path`.
    pub async fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                SecretError::Storage(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        debug!(path = %path.display(), "opened secret database");
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if absent.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS passwords (
                owner_id TEXT NOT NULL,
                password TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_passwords_owner_id ON passwords (owner_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl SecretStore for SqliteSecretStore {
    async fn append(&self, record: &SecretRecord) -> Result<()> {
        sqlx::query("INSERT INTO passwords (owner_id, password) VALUES (?, ?)")
            .bind(&record.owner_id)
            .bind(&record.ciphertext)
            .execute(&self.pool)
            .await?;

        debug!(owner_id = %record.owner_id, "appended secret record");
        Ok(())
    }

    async fn first_for_owner(&self, owner_id: &str) -> Result<Option<SecretRecord>> {
        // Raw bytes: a corrupted TEXT value may not be valid UTF-8.
        let row: Option<(String, Vec<u8>)> = sqlx::query_as(
            "SELECT owner_id, CAST(password AS BLOB) FROM passwords
             WHERE owner_id = ?
             ORDER BY rowid ASC
             LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((owner_id, raw)) = row else {
            return Ok(None);
        };
        let ciphertext = String::from_utf8(raw).map_err(|_| {
            SecretError::Integrity("stored ciphertext is not valid text".to_string())
        })?;

        Ok(Some(SecretRecord {
            owner_id,
            ciphertext,
        }))
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passwords WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn owners(&self) -> Result<Vec<OwnerSummary>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT owner_id, COUNT(*) FROM passwords GROUP BY owner_id ORDER BY owner_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(owner_id, records)| OwnerSummary {
                owner_id,
                records: records.max(0) as u64,
            })
            .collect())
    }
}
