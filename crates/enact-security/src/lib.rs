//! # Enact Security - Boundary API
//!
//! The operation surface a consumer sees, in two profiles:
//!
//! - **Trusted host**: [`SecurityContext`] bundles the persistent
//!   trusted-key store and the security-config store; its `verify` loads
//!   the effective policy and a snapshot of the trusted keys on every
//!   call.
//! - **Untrusted environment**: [`verify_untrusted`] checks a signature
//!   against its embedded public key only. No store is touched; the same
//!   library runs where no persistent state exists.
//!
//! Everything else (explicit-key signing, document hashing, key and config
//! management, crypto primitives) is re-exported from the underlying
//! crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;

pub use context::{SecurityContext, StoreOrSigningError};

// Signing engine surface
pub use enact_signing::{
    canonical_document, create_document_hash, sign_document, signed_field_names, FieldConfig,
    SigningError, SigningOptions,
};

// Crypto primitives
pub use enact_crypto::{
    derive_public_key, generate_keypair, is_pem, pem_to_private_key_hex, pem_to_public_key_hex,
    private_key_to_pem, public_key_to_pem, CryptoError, PemError,
};

// Stores
pub use enact_store::{ConfigStore, KeyExportBundle, KeyStore, StoreError};

// Entities
pub use enact_types::{
    Document, KeyMetadata, KeyPair, SecurityConfig, SecurityConfigPatch, Signature,
};

/// Verify a signature against its embedded public key only.
///
/// The untrusted profile: no trusted-key store, no fallback scan, no
/// policy load. A missing or empty embedded key fails.
pub fn verify_untrusted(
    document: &Document,
    signature: &Signature,
    options: &SigningOptions,
) -> bool {
    enact_signing::verify_with_embedded_key(document, signature, options)
}
