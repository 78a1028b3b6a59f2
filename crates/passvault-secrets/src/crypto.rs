//! AES-256-GCM encryption with HKDF-SHA256 key derivation.
//!
//! Each ciphertext gets its own random salt and nonce; the master key is
//! never used directly as a cipher key. Everything needed to decrypt,
//! apart from the master key, travels inside the output blob:
//!
//! ```text
//! version (1) || salt (32) || nonce (12) || ciphertext || tag (16)
//! ```

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Result, SecretError};

/// Master key length in bytes.
pub const KEY_SIZE: usize = 32;

const VERSION: u8 = 1;
const SALT_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;
const HEADER_SIZE: usize = 1 + SALT_SIZE + NONCE_SIZE;

/// HKDF info string used to domain-separate derived keys.
const HKDF_INFO: &[u8] = b"passvault-secret-v1";

fn check_master_key(master_key: &[u8]) -> Result<()> {
    if master_key.len() != KEY_SIZE {
        return Err(SecretError::KeyUnavailable(format!(
            "malformed key material: expected {KEY_SIZE} bytes, found {}",
            master_key.len()
        )));
    }
    Ok(())
}

/// Derive a 256-bit cipher from `master_key` and `salt` via HKDF-SHA256.
fn derive_cipher(master_key: &[u8], salt: &[u8]) -> Result<Aes256Gcm> {
    let hk = Hkdf::<Sha256>::new(Some(salt), master_key);
    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    hk.expand(HKDF_INFO, okm.as_mut_slice())
        .map_err(|e| SecretError::Encryption(format!("key derivation failed: {e}")))?;
    Aes256Gcm::new_from_slice(okm.as_slice())
        .map_err(|e| SecretError::Encryption(e.to_string()))
}

/// Encrypt `plaintext` under a key derived from `master_key`.
///
/// Salt and nonce are fresh per call, so encrypting the same plaintext twice
/// yields different blobs.
pub fn encrypt(master_key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_master_key(master_key)?;

    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = derive_cipher(master_key, &salt)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| SecretError::Encryption(e.to_string()))?;

    let mut blob = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    blob.push(VERSION);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob previously produced by [`encrypt`].
///
/// Truncation, an unknown version byte, a wrong key, or any modified byte
/// fails with [`SecretError::Integrity`].
pub fn decrypt(master_key: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    check_master_key(master_key)?;

    if blob.len() < HEADER_SIZE + TAG_SIZE {
        return Err(SecretError::Integrity("ciphertext truncated".to_string()));
    }
    if blob[0] != VERSION {
        return Err(SecretError::Integrity(format!(
            "unsupported ciphertext version {}",
            blob[0]
        )));
    }

    let (salt, rest) = blob[1..].split_at(SALT_SIZE);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let cipher = derive_cipher(master_key, salt)?;
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| SecretError::Integrity("authentication failed".to_string()))
}

/// Generate a new random 256-bit master key.
pub fn generate_master_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; KEY_SIZE]);
    OsRng.fill_bytes(key.as_mut_slice());
    key
}
