//! Crypto and PEM error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// Only sign-side operations surface these; verification is total and
/// reports failure as `false`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Private key is not valid hex or not a valid secp256k1 scalar
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Public key is not valid hex or not a point on the curve
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Digest has the wrong length for SHA-256
    #[error("invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidDigest {
        /// Expected digest length in bytes
        expected: usize,
        /// Actual digest length in bytes
        actual: usize,
    },

    /// Signing failed inside the curve implementation
    #[error("signing failed")]
    SigningFailed,
}

/// PEM codec errors.
#[derive(Debug, Error)]
pub enum PemError {
    /// Input lacks the BEGIN/END markers
    #[error("input is not PEM: missing BEGIN/END markers")]
    MissingMarkers,

    /// PEM body is not valid base64
    #[error("PEM body is not valid base64")]
    InvalidBase64,

    /// Decoded body cannot be placed in any supported key shape
    #[error("unsupported key length: {0} bytes")]
    UnsupportedLength(usize),

    /// Key structure is recognizable but malformed
    #[error("malformed key structure")]
    Malformed,

    /// Hex input to an encoder was not valid key material
    #[error("invalid key hex")]
    InvalidHex,
}
