//! # ECDSA Signing (secp256k1)
//!
//! Keypair generation, deterministic signing, and verification over
//! prehashed SHA-256 digests.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalized signatures; high-S inputs are rejected on verify
//! - Private scalar buffers are zeroized after use

use crate::errors::CryptoError;
use enact_types::KeyPair;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::Zeroize;

/// Generate a fresh keypair from the OS entropy source.
///
/// The private key is a uniformly random valid scalar; the public key is
/// the SEC1 compressed 33-byte point.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::random(&mut OsRng);
    let public_key = hex::encode(signing_key.verifying_key().to_sec1_bytes());
    let mut private_bytes: [u8; 32] = signing_key.to_bytes().into();
    let private_key = hex::encode(private_bytes);
    private_bytes.zeroize();

    KeyPair {
        private_key,
        public_key,
    }
}

/// Derive the compressed public key for a private scalar. Deterministic.
pub fn derive_public_key(private_key_hex: &str) -> Result<String, CryptoError> {
    let signing_key = decode_signing_key(private_key_hex)?;
    Ok(hex::encode(signing_key.verifying_key().to_sec1_bytes()))
}

/// Sign a 32-byte digest with deterministic ECDSA.
///
/// Returns the 64-byte compact `r || s` encoding as 128 hex chars.
pub fn sign_digest(private_key_hex: &str, digest_hex: &str) -> Result<String, CryptoError> {
    let signing_key = decode_signing_key(private_key_hex)?;
    let digest = decode_digest(digest_hex)?;

    let signature: Signature = signing_key
        .sign_prehash(&digest)
        .map_err(|_| CryptoError::SigningFailed)?;
    // Compact encoding carries the low-S normalized form.
    let signature = signature.normalize_s().unwrap_or(signature);

    Ok(hex::encode(signature.to_bytes()))
}

/// Verify a compact signature against a digest and compressed public key.
///
/// Total: any malformed input (bad hex, wrong lengths, off-curve point,
/// invalid scalar pair) yields `false`, never an error.
pub fn verify_digest(public_key_hex: &str, digest_hex: &str, signature_hex: &str) -> bool {
    let Ok(public_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(&public_bytes) else {
        return false;
    };
    let Ok(digest) = decode_digest(digest_hex) else {
        return false;
    };
    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        return false;
    };

    verifying_key.verify_prehash(&digest, &signature).is_ok()
}

fn decode_signing_key(private_key_hex: &str) -> Result<SigningKey, CryptoError> {
    let mut bytes = hex::decode(private_key_hex).map_err(|_| CryptoError::InvalidPrivateKey)?;
    if bytes.len() != 32 {
        bytes.zeroize();
        return Err(CryptoError::InvalidPrivateKey);
    }
    let key = SigningKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey);
    bytes.zeroize();
    key
}

fn decode_digest(digest_hex: &str) -> Result<[u8; 32], CryptoError> {
    let bytes = hex::decode(digest_hex).map_err(|_| CryptoError::InvalidDigest {
        expected: 32,
        actual: 0,
    })?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| CryptoError::InvalidDigest {
        expected: 32,
        actual,
    })
}
