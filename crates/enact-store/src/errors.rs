//! Store error types.

use thiserror::Error;

/// Errors surfaced by store write paths.
///
/// Read paths degrade instead: absent results, skipped entries, or default
/// values.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A key with this id already exists and would be overwritten
    #[error("key '{0}' already exists")]
    KeyExists(String),

    /// No key with this id is stored
    #[error("key '{0}' not found")]
    KeyNotFound(String),

    /// Key material could not be encoded or decoded
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The host root directory could not be determined
    #[error("cannot determine home directory for the key store")]
    HomeDirNotFound,

    /// Filesystem failure
    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("store serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}
