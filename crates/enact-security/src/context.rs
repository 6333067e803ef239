//! # Trusted-Host Context
//!
//! Wires the signing engine to the persistent stores. One context owns the
//! key store and the config store for a single host root; every `verify`
//! call re-reads the policy and takes a fresh snapshot of the trusted
//! keys, so external changes to the store are picked up immediately.

use enact_signing::{resolve_policy, sign_document, verify_document, SigningError, SigningOptions};
use enact_store::{ConfigStore, KeyStore, StoreError};
use enact_types::{Document, SecurityConfigPatch, Signature};
use std::path::PathBuf;

/// The trusted-host profile: stores plus engine.
#[derive(Clone, Debug)]
pub struct SecurityContext {
    keys: KeyStore,
    config: ConfigStore,
}

impl SecurityContext {
    /// Context rooted at `$ENACT_HOME` / `$HOME/.enact`.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::with_root(enact_store::default_root()?))
    }

    /// Context rooted at an explicit directory. Tests point this at a
    /// temporary directory instead of the real host root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            keys: KeyStore::with_root(root.clone()),
            config: ConfigStore::with_root(root),
        }
    }

    /// The trusted-key store of this host.
    pub fn key_store(&self) -> &KeyStore {
        &self.keys
    }

    /// The security-config store of this host.
    pub fn config_store(&self) -> &ConfigStore {
        &self.config
    }

    /// Sign a document with an explicit private key.
    ///
    /// Present for symmetry with [`SecurityContext::verify`]; signing does
    /// not consult the stores.
    pub fn sign(
        &self,
        document: &Document,
        private_key_hex: &str,
        options: &SigningOptions,
    ) -> Result<Signature, SigningError> {
        sign_document(document, private_key_hex, options)
    }

    /// Sign a document with a key held in the store.
    pub fn sign_with_stored_key(
        &self,
        document: &Document,
        key_id: &str,
        options: &SigningOptions,
    ) -> Result<Signature, StoreOrSigningError> {
        let pair = self
            .keys
            .get(key_id)
            .ok_or_else(|| StoreOrSigningError::Store(StoreError::KeyNotFound(key_id.into())))?;
        sign_document(document, &pair.private_key, options).map_err(StoreOrSigningError::Signing)
    }

    /// Verify a document under the host's policy and trusted keys.
    ///
    /// The effective policy is `policy_override` merged over the persisted
    /// configuration merged over the defaults. The trusted-key snapshot is
    /// taken once at the start of the call.
    pub fn verify(
        &self,
        document: &Document,
        provided: &Signature,
        options: &SigningOptions,
        policy_override: Option<&SecurityConfigPatch>,
    ) -> bool {
        let policy = resolve_policy(Some(self.config.load()), policy_override);
        let trusted = self.keys.all_trusted_public_keys();
        tracing::debug!(
            "[security] verify with {} trusted key(s), minimum {}",
            trusted.len(),
            policy.minimum_signatures
        );
        verify_document(document, provided, options, &trusted, &policy)
    }
}

/// Failure of a store-backed signing operation: either the key lookup or
/// the signing itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreOrSigningError {
    /// Key store failure
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Signing failure
    #[error(transparent)]
    Signing(#[from] SigningError),
}
