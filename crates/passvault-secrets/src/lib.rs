//! Password generation and encrypted secret storage for PassVault.
//!
//! A single AES-256-GCM master key, held by [`KeyManager`], protects every
//! stored password. [`SecretVault`] generates passwords, encrypts them for an
//! owner id and appends the ciphertext to a SQLite table; retrieval returns
//! the earliest record stored for that owner.

pub mod crypto;
pub mod error;
pub mod keys;
pub mod password;
pub mod store;
pub mod types;
pub mod vault;

pub use error::{Result, SecretError};
pub use keys::{KeyManager, KeySource};
pub use password::{generate_password, MAX_LENGTH, MIN_LENGTH};
pub use store::{SecretStore, SqliteSecretStore};
pub use types::{OwnerSummary, SecretRecord};
pub use vault::SecretVault;

pub use passvault_core::SecretString;
