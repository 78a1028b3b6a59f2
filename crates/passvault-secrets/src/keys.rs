//! Master key lifecycle.
//!
//! The master key is resolved once per process, in priority order:
//! 1. `PASSVAULT_MASTER_KEY` environment variable (hex-encoded)
//! 2. The raw key file at the configured path
//! 3. A freshly generated key, written to that path
//!
//! An existing key file is returned byte-for-byte. Malformed key material is
//! only reported when it is first used to encrypt or decrypt.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use passvault_core::env;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto;
use crate::error::{Result, SecretError};

/// Where the loaded master key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// `PASSVAULT_MASTER_KEY`; nothing on disk was touched.
    Environment,
    /// An existing key file.
    File(PathBuf),
    /// Generated on this call and written to the given path.
    Generated(PathBuf),
    /// Supplied directly by the caller.
    Provided,
}

/// Owns the single master key and performs all encryption with it.
///
/// The key is read-only after construction, so one `KeyManager` can be
/// shared behind an `Arc` by any number of concurrent callers.
pub struct KeyManager {
    key: Zeroizing<Vec<u8>>,
    source: KeySource,
}

impl KeyManager {
    /// Resolve the master key, creating and persisting one at `path` if none exists.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        Self::resolve(env::get_var(env::vars::MASTER_KEY), path)
    }

    /// Wrap key bytes supplied by the caller.
    pub fn from_bytes(key: Vec<u8>) -> Self {
        Self {
            key: Zeroizing::new(key),
            source: KeySource::Provided,
        }
    }

    fn resolve(env_key: Option<String>, path: &Path) -> Result<Self> {
        if let Some(hex_key) = env_key {
            debug!("using master key from environment variable");
            return Self::from_hex(&hex_key);
        }
        Self::load_or_create_file(path)
    }

    fn from_hex(hex_key: &str) -> Result<Self> {
        let key = Zeroizing::new(hex::decode(hex_key.trim()).map_err(|e| {
            SecretError::KeyUnavailable(format!(
                "invalid hex in {}: {e}",
                env::vars::MASTER_KEY
            ))
        })?);
        if key.len() != crypto::KEY_SIZE {
            return Err(SecretError::KeyUnavailable(format!(
                "{} must decode to exactly {} bytes, got {}",
                env::vars::MASTER_KEY,
                crypto::KEY_SIZE,
                key.len()
            )));
        }
        Ok(Self {
            key,
            source: KeySource::Environment,
        })
    }

    /// Load the key file at `path`, generating it first if it does not exist.
    pub fn load_or_create_file(path: &Path) -> Result<Self> {
        match std::fs::read(path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "loaded master key from file");
                Ok(Self {
                    key: Zeroizing::new(bytes),
                    source: KeySource::File(path.to_path_buf()),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Self::create_file(path),
            Err(e) => Err(SecretError::KeyUnavailable(format!(
                "cannot read key file {}: {e}",
                path.display()
            ))),
        }
    }

    fn create_file(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;

        let key = crypto::generate_master_key();
        match write_key_file(path, &key) {
            Ok(()) => {
                info!(path = %path.display(), "generated new master key");
                Ok(Self {
                    key,
                    source: KeySource::Generated(path.to_path_buf()),
                })
            }
            // Another process created the file first; use theirs.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "key file appeared concurrently, loading it");
                Self::load_or_create_file(path)
            }
            Err(e) => Err(SecretError::KeyUnavailable(format!(
                "cannot write key file {}: {e}",
                path.display()
            ))),
        }
    }

    /// Where the key came from.
    pub fn source(&self) -> &KeySource {
        &self.source
    }

    /// Encrypt `plaintext` with fresh randomness.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        crypto::encrypt(&self.key, plaintext)
    }

    /// Decrypt and authenticate a blob produced by [`KeyManager::encrypt`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        crypto::decrypt(&self.key, ciphertext)
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("key", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Create the key's parent directory, restricted to the owner, if missing.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }

    std::fs::create_dir_all(parent).map_err(|e| {
        SecretError::KeyUnavailable(format!("cannot create {}: {e}", parent.display()))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        std::fs::set_permissions(parent, perms).map_err(|e| {
            SecretError::KeyUnavailable(format!("cannot restrict {}: {e}", parent.display()))
        })?;
    }

    Ok(())
}

/// Write `key` to a new file at `path` with mode 0600 on Unix.
///
/// The key is written and synced to a temp file in the same directory, then
/// linked into place. Readers never see a partial key. Fails with
/// `AlreadyExists` rather than replacing an existing key.
fn write_key_file(path: &Path, key: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // NamedTempFile is created 0600 and removed on drop if never persisted.
    let mut tmp = tempfile::Builder::new()
        .prefix(".secret.key.")
        .tempfile_in(dir)?;
    tmp.write_all(key)?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}
