//! Signing error types.

use enact_crypto::CryptoError;
use thiserror::Error;

/// Errors surfaced by sign-side operations.
///
/// Verification never returns these; a failing or malformed signature is
/// reported as `false` with no reason attached.
#[derive(Debug, Error)]
pub enum SigningError {
    /// A field that is required by the active default set and selected for
    /// signing is absent or empty on the document
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    /// An algorithm other than secp256k1 was requested
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key or digest failure from the crypto layer
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
