//! SHA-256 helpers.
//!
//! Callers hash the canonical UTF-8 bytes of a document and sign the digest.

use sha2::{Digest, Sha256};

/// SHA-256 digest of arbitrary bytes.
pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 digest, hex-encoded (64 lowercase hex chars).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256_digest(data))
}
