//! # Canonical Document Serialization
//!
//! Deterministic, byte-exact JSON form of a projected document. This is
//! what gets hashed and signed, so it must be stable across
//! implementations and platforms.
//!
//! Format contract:
//! - UTF-8, no insignificant whitespace
//! - top-level keys are the selected field names in ascending
//!   byte-lexicographic order (the selector inserts them pre-sorted)
//! - nested values are serialized as parsed from the document, without
//!   recursive key reordering

use crate::errors::SigningError;
use crate::fields::{select_fields, SigningOptions};
use enact_crypto::hashing::sha256_hex;
use enact_types::Document;

/// Serialize a projected mapping to canonical UTF-8 JSON bytes.
///
/// The mapping's insertion order is preserved verbatim; callers hand in
/// the output of the field selector, which is already sorted.
pub fn canonical_json_bytes(projected: &Document) -> Vec<u8> {
    serde_json::to_vec(projected).expect("projected document is valid JSON")
}

/// Project a document to its ordered canonical mapping.
pub fn canonical_document(
    document: &Document,
    options: &SigningOptions,
) -> Result<Document, SigningError> {
    select_fields(document, options)
}

/// SHA-256 over the canonical bytes, hex-encoded. Pure function of
/// `(document, options)`.
pub fn create_document_hash(
    document: &Document,
    options: &SigningOptions,
) -> Result<String, SigningError> {
    let projected = select_fields(document, options)?;
    Ok(sha256_hex(&canonical_json_bytes(&projected)))
}
