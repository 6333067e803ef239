//! # Enact Crypto - Signing Primitives
//!
//! secp256k1 primitives and the PEM codec for Enact document signing.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `ecdsa` | Keypair generation, deterministic ECDSA over SHA-256 digests |
//! | `hashing` | SHA-256 helpers |
//! | `pem` | hex ↔ PEM codec with tolerant decoding |
//!
//! ## Security Properties
//!
//! - **RFC 6979**: deterministic nonces, no RNG dependency for signing
//! - **Low-S**: signatures are produced in normalized form
//! - **Total verification**: `verify_digest` never panics or errors; any
//!   malformed input yields `false`
//!
//! All key and signature material crosses this API as hex strings: 64 hex
//! chars for a private scalar, 66 for a compressed public point, 128 for a
//! compact `r || s` signature.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod pem;

// Re-exports
pub use ecdsa::{derive_public_key, generate_keypair, sign_digest, verify_digest};
pub use errors::{CryptoError, PemError};
pub use hashing::{sha256_digest, sha256_hex};
pub use pem::{
    is_pem, pem_to_private_key_hex, pem_to_public_key_hex, private_key_to_pem, public_key_to_pem,
};
