//! # Domain Entities
//!
//! Core data structures for document signing and verification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroize;

/// The only signature algorithm this library produces or accepts.
pub const SIGNATURE_ALGORITHM: &str = "secp256k1";

/// A document is an open mapping from field names to arbitrary JSON values.
///
/// Recognized Enact fields (`name`, `command`, `enact`, ...) carry no special
/// type here; the field selector decides which entries participate in
/// signing. Unknown fields are opaque and preserved.
pub type Document = Map<String, Value>;

// =============================================================================
// Signature
// =============================================================================

/// A detached signature over the canonical form of a document.
///
/// Wire shape (embedded in a document's `signatures` array or exchanged as
/// JSON):
///
/// ```json
/// { "signature": "<128-hex>", "publicKey": "<66-hex>",
///   "algorithm": "secp256k1", "timestamp": 1735689600 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Compact hex encoding of the 64-byte (r, s) pair.
    pub signature: String,
    /// Hex encoding of the signer's 33-byte compressed public key.
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Always `"secp256k1"`.
    pub algorithm: String,
    /// Producer wall-clock at sign time (Unix seconds). Informational only;
    /// not covered by the signed bytes.
    pub timestamp: i64,
}

impl Signature {
    /// Convert to a JSON value in the fixed wire shape.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("signature serialization is infallible")
    }

    /// Parse from a JSON value. Returns `None` when the value does not match
    /// the wire shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

// =============================================================================
// Key material
// =============================================================================

/// A secp256k1 keypair in hex form.
///
/// `private_key` is the 32-byte scalar (64 hex chars); `public_key` is the
/// 33-byte compressed point (66 hex chars). The private half is zeroized
/// when the pair is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// 64 hex chars, 32-byte scalar.
    pub private_key: String,
    /// 66 hex chars, 33-byte compressed point.
    pub public_key: String,
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Metadata persisted alongside a trusted public key.
///
/// File shape: `{ "keyId": "...", "created": "<ISO-8601>",
/// "algorithm": "secp256k1", "description": "..." }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetadata {
    /// Identifier chosen at generation or import time.
    #[serde(rename = "keyId")]
    pub key_id: String,
    /// ISO-8601 creation timestamp.
    pub created: String,
    /// Always `"secp256k1"`.
    pub algorithm: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Security policy
// =============================================================================

/// Verification policy for the trusted-host profile.
///
/// `allow_local_unsigned` admits documents that carry an explicitly empty
/// `signatures` sequence; `minimum_signatures` is the threshold a signed
/// document must meet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Accept documents with zero signatures.
    #[serde(rename = "allowLocalUnsigned")]
    pub allow_local_unsigned: bool,
    /// Minimum count of signatures a signed document must carry, all of
    /// which must verify.
    #[serde(rename = "minimumSignatures")]
    pub minimum_signatures: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allow_local_unsigned: true,
            minimum_signatures: 1,
        }
    }
}

impl SecurityConfig {
    /// Apply a partial update; absent fields keep their current value.
    pub fn apply(&mut self, patch: &SecurityConfigPatch) {
        if let Some(allow) = patch.allow_local_unsigned {
            self.allow_local_unsigned = allow;
        }
        if let Some(minimum) = patch.minimum_signatures {
            self.minimum_signatures = minimum;
        }
    }
}

/// Partial [`SecurityConfig`]: the shape of a per-call policy override and
/// of a config-store `update`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityConfigPatch {
    /// Override for `allowLocalUnsigned`.
    pub allow_local_unsigned: Option<bool>,
    /// Override for `minimumSignatures`.
    pub minimum_signatures: Option<u32>,
}

impl SecurityConfigPatch {
    /// A patch that only sets the signature threshold.
    pub fn minimum_signatures(minimum: u32) -> Self {
        Self {
            minimum_signatures: Some(minimum),
            ..Self::default()
        }
    }
}
