//! Checksum calculation for dataset deduplication.

use sha2::{Digest, Sha256};

use crate::models::ContentSet;

/// Calculate SHA-256 checksum of a string.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Checksum of a normalized dataset.
///
/// Hashes the compact JSON of the [`ContentSet`], so two uploads that
/// normalize to the same records share a checksum even when their raw
/// documents differ (key order, drafts, skipped documents).
pub fn content_checksum(content: &ContentSet) -> serde_json::Result<String> {
    let json = serde_json::to_string(content)?;
    Ok(calculate_checksum(&json))
}
