//! Core types for secret storage.
//!
//! Neither type ever holds plaintext, so both are safe to log or print.

/// One persisted row: an owner id and the base64 ciphertext stored for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// Caller-supplied owner id. Not unique across records.
    pub owner_id: String,

    /// Base64 of the encrypted blob.
    pub ciphertext: String,
}

/// Per-owner metadata, used for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    /// Owner id.
    pub owner_id: String,

    /// Number of records appended for this owner.
    pub records: u64,
}

/// Reject owner ids that are empty or whitespace-only.
pub(crate) fn validate_owner(owner_id: &str) -> crate::Result<()> {
    if owner_id.trim().is_empty() {
        return Err(crate::SecretError::InvalidOwner(
            "owner id must not be empty".to_string(),
        ));
    }
    Ok(())
}
