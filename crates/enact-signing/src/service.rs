//! # Signing and Verification Engine
//!
//! Ties the field selector and canonicalizer to the crypto primitives.
//!
//! ## Security Notes
//!
//! - Verification is total: every failure mode (projection error, bad hex,
//!   unknown key, threshold unmet) maps to `false` with no reason attached.
//! - The trusted-key snapshot passed in by the caller is the sole authority
//!   for the trusted profile; an empty snapshot fails closed.
//! - A signature whose embedded public key is missing, empty, or untrusted
//!   is checked with a fallback scan over the whole snapshot; it passes as
//!   soon as any trusted key verifies it.

use crate::canonical::create_document_hash;
use crate::errors::SigningError;
use crate::fields::{SigningOptions, SIGNATURES_FIELD};
use enact_crypto::{derive_public_key, sign_digest, verify_digest};
use enact_types::{Document, SecurityConfig, Signature, SIGNATURE_ALGORITHM};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Sign the canonical form of a document.
///
/// Projects the selected fields, hashes the canonical bytes, and signs the
/// digest deterministically. The returned [`Signature`] carries the public
/// key derived from `private_key_hex` and the current wall-clock.
pub fn sign_document(
    document: &Document,
    private_key_hex: &str,
    options: &SigningOptions,
) -> Result<Signature, SigningError> {
    validate_algorithm(options)?;

    let digest = create_document_hash(document, options)?;
    let signature = sign_digest(private_key_hex, &digest)?;
    let public_key = derive_public_key(private_key_hex)?;

    Ok(Signature {
        signature,
        public_key,
        algorithm: SIGNATURE_ALGORITHM.to_string(),
        timestamp: unix_now(),
    })
}

/// Verify a document under the trusted-host profile.
///
/// `trusted_keys` is the snapshot of trusted compressed public keys (hex)
/// taken at the start of the call; `policy` is the already-resolved
/// effective policy. The signature list is the document's `signatures`
/// sequence when the document carries one (an explicitly empty sequence is
/// an unsigned document and is judged by `policy.allow_local_unsigned`);
/// otherwise the provided signature stands alone.
///
/// All listed signatures must verify, and there must be at least
/// `policy.minimum_signatures` of them.
pub fn verify_document(
    document: &Document,
    provided: &Signature,
    options: &SigningOptions,
    trusted_keys: &[String],
    policy: &SecurityConfig,
) -> bool {
    let signatures = collect_signatures(document, provided);

    let count = signatures.len() as u32;
    if count < policy.minimum_signatures {
        if policy.allow_local_unsigned && count == 0 {
            tracing::debug!("[signing] unsigned document accepted by policy");
            return true;
        }
        tracing::debug!(
            "[signing] signature threshold unmet: {} < {}",
            count,
            policy.minimum_signatures
        );
        return false;
    }

    let Ok(digest) = create_document_hash(document, options) else {
        return false;
    };

    signatures
        .iter()
        .all(|signature| verify_one(signature, &digest, trusted_keys))
}

/// Verify a single signature against the embedded public key only.
///
/// The untrusted-environment profile: no trust set, no fallback scan, no
/// policy. Returns `false` for an empty embedded key.
pub fn verify_with_embedded_key(
    document: &Document,
    signature: &Signature,
    options: &SigningOptions,
) -> bool {
    if signature.public_key.is_empty() {
        return false;
    }
    let Ok(digest) = create_document_hash(document, options) else {
        return false;
    };
    verify_digest(&signature.public_key, &digest, &signature.signature)
}

// =============================================================================
// Internals
// =============================================================================

fn validate_algorithm(options: &SigningOptions) -> Result<(), SigningError> {
    match options.algorithm.as_deref() {
        None => Ok(()),
        Some(SIGNATURE_ALGORITHM) => Ok(()),
        Some(other) => Err(SigningError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// Resolve the list of signatures a verify call must check.
///
/// A document with a `signatures` array owns the list, even when the array
/// is empty; the provided signature is the list only when the document has
/// no usable `signatures` field.
fn collect_signatures(document: &Document, provided: &Signature) -> Vec<Signature> {
    match document.get(SIGNATURES_FIELD) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Signature::from_value(item).unwrap_or_else(unverifiable_signature))
            .collect(),
        _ => vec![provided.clone()],
    }
}

/// Placeholder for a malformed `signatures` entry. It still counts toward
/// the threshold but can never verify, so a document carrying one fails.
fn unverifiable_signature() -> Signature {
    Signature {
        signature: String::new(),
        public_key: String::new(),
        algorithm: SIGNATURE_ALGORITHM.to_string(),
        timestamp: 0,
    }
}

fn verify_one(signature: &Signature, digest_hex: &str, trusted_keys: &[String]) -> bool {
    if !signature.public_key.is_empty()
        && trusted_keys.iter().any(|key| key == &signature.public_key)
    {
        return verify_digest(&signature.public_key, digest_hex, &signature.signature);
    }

    // Missing, empty, or untrusted embedded key: the trust set is the
    // authority. Any trusted key that verifies the bytes accepts the
    // signature; an empty set rejects it.
    let accepted = trusted_keys
        .iter()
        .any(|key| verify_digest(key, digest_hex, &signature.signature));
    if !accepted {
        tracing::debug!("[signing] fallback scan exhausted without a matching trusted key");
    }
    accepted
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
