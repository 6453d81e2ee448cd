//! Canonical ID derivation.
//!
//! Cable and session identifiers are derived from a pipe-delimited canonical
//! string by taking the first 32 hex characters of its SHA-256 digest. Equal
//! canonical strings always yield equal IDs; this is what makes a rerun of
//! the allocator byte-identical to the last.

use sha2::{Digest, Sha256};

/// A 32-hex-character identifier derived from a canonical string.
pub fn canonical_id(fields: &[&str]) -> String {
    let canonical = fields.join("|");
    let digest = Sha256::digest(canonical.as_bytes());
    let hex = format!("{digest:x}");
    hex[..32].to_string()
}
