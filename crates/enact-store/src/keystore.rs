//! # Trusted-Key Store
//!
//! Directory-backed registry of trusted public keys (with JSON metadata)
//! and locally held private keys.
//!
//! Keys are written atomically per operation with best-effort rollback:
//! a failure partway through a store removes whatever was already written.
//! Keys are never mutated in place; they are created and removed whole.

use crate::errors::StoreError;
use crate::paths::{
    default_root, ensure_dir, remove_quietly, write_with_mode, PRIVATE_KEYS_DIR, TRUSTED_KEYS_DIR,
};
use enact_crypto::{
    derive_public_key, generate_keypair, pem_to_private_key_hex, pem_to_public_key_hex,
    private_key_to_pem, public_key_to_pem,
};
use enact_types::{KeyMetadata, KeyPair, SIGNATURE_ALGORITHM};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PUBLIC_SUFFIX: &str = "-public.pem";
const PRIVATE_SUFFIX: &str = "-private.pem";
const META_SUFFIX: &str = ".meta";

/// JSON bundle emitted by [`KeyStore::export_to_file`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyExportBundle {
    /// Stored metadata, when present.
    pub metadata: Option<KeyMetadata>,
    /// Compressed public key, hex.
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Private scalar, hex. Only present when the export asked for it.
    #[serde(rename = "privateKey", skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

/// Handle over the key directories of one host root.
///
/// Tests point a fresh handle at a temporary directory; hosts normally use
/// [`KeyStore::open_default`].
#[derive(Clone, Debug)]
pub struct KeyStore {
    root: PathBuf,
}

impl KeyStore {
    /// Store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `$ENACT_HOME` / `$HOME/.enact`.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::with_root(default_root()?))
    }

    /// The root directory this handle operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // =========================================================================
    // Write operations
    // =========================================================================

    /// Generate a fresh keypair and persist it under `key_id`.
    ///
    /// Fails with [`StoreError::KeyExists`] when any file for `key_id` is
    /// already present.
    pub fn generate_and_store(
        &self,
        key_id: &str,
        description: Option<&str>,
    ) -> Result<KeyPair, StoreError> {
        let pair = generate_keypair();
        self.store_pair(key_id, &pair, description)?;
        tracing::info!("[store] generated key '{}'", key_id);
        Ok(pair)
    }

    /// Import an externally produced public key as trusted.
    ///
    /// Writes the public PEM and metadata only; fails when a public key
    /// with `key_id` already exists.
    pub fn import_public_key(
        &self,
        key_id: &str,
        public_key_hex: &str,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        let public_path = self.public_key_path(key_id);
        if public_path.exists() {
            return Err(StoreError::KeyExists(key_id.to_string()));
        }
        let pem = public_key_to_pem(public_key_hex)
            .map_err(|e| StoreError::InvalidKeyMaterial(e.to_string()))?;

        ensure_dir(&self.trusted_dir())?;
        write_with_mode(&public_path, pem.as_bytes(), 0o644)?;
        if let Err(e) = self.write_metadata(key_id, description) {
            remove_quietly(&public_path);
            return Err(e);
        }
        tracing::info!("[store] imported trusted key '{}'", key_id);
        Ok(())
    }

    /// Import a private scalar, deriving and storing its public half as in
    /// [`KeyStore::generate_and_store`].
    pub fn import_private_key(
        &self,
        key_id: &str,
        private_key_hex: &str,
        description: Option<&str>,
    ) -> Result<KeyPair, StoreError> {
        let public_key = derive_public_key(private_key_hex)
            .map_err(|e| StoreError::InvalidKeyMaterial(e.to_string()))?;
        let pair = KeyPair {
            private_key: private_key_hex.to_string(),
            public_key,
        };
        self.store_pair(key_id, &pair, description)?;
        tracing::info!("[store] imported private key '{}'", key_id);
        Ok(pair)
    }

    /// Remove every file stored for `key_id`. Returns `true` when anything
    /// was removed.
    pub fn remove(&self, key_id: &str) -> bool {
        let mut removed = false;
        for path in [
            self.public_key_path(key_id),
            self.metadata_path(key_id),
            self.private_key_path(key_id),
        ] {
            if fs::remove_file(&path).is_ok() {
                removed = true;
            }
        }
        if removed {
            tracing::info!("[store] removed key '{}'", key_id);
        }
        removed
    }

    /// Export a key as a JSON bundle `{metadata, publicKey, privateKey?}`.
    pub fn export_to_file(
        &self,
        key_id: &str,
        path: &Path,
        include_private: bool,
    ) -> Result<(), StoreError> {
        let public_key = self
            .get_public_key(key_id)
            .ok_or_else(|| StoreError::KeyNotFound(key_id.to_string()))?;
        let private_key = if include_private {
            Some(
                self.get_private_key(key_id)
                    .ok_or_else(|| StoreError::KeyNotFound(key_id.to_string()))?,
            )
        } else {
            None
        };

        let bundle = KeyExportBundle {
            metadata: self.get_metadata(key_id),
            public_key,
            private_key,
        };
        let json = serde_json::to_string_pretty(&bundle)?;
        let mode = if include_private { 0o600 } else { 0o644 };
        write_with_mode(path, json.as_bytes(), mode)?;
        Ok(())
    }

    // =========================================================================
    // Read operations (never fail; absent on any problem)
    // =========================================================================

    /// Load a complete keypair. Both halves must exist and decode.
    pub fn get(&self, key_id: &str) -> Option<KeyPair> {
        let public_key = self.get_public_key(key_id)?;
        let private_key = self.get_private_key(key_id)?;
        Some(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Load the trusted public key for `key_id`, hex-encoded.
    pub fn get_public_key(&self, key_id: &str) -> Option<String> {
        let pem = read_to_string_quietly(&self.public_key_path(key_id))?;
        match pem_to_public_key_hex(&pem) {
            Ok(hex) => Some(hex),
            Err(e) => {
                tracing::warn!("[store] undecodable public key '{}': {}", key_id, e);
                None
            }
        }
    }

    /// Load the stored metadata for `key_id`.
    pub fn get_metadata(&self, key_id: &str) -> Option<KeyMetadata> {
        let json = read_to_string_quietly(&self.metadata_path(key_id))?;
        match serde_json::from_str(&json) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!("[store] undecodable metadata for '{}': {}", key_id, e);
                None
            }
        }
    }

    /// Whether both the public and private halves of `key_id` are present.
    pub fn key_exists(&self, key_id: &str) -> bool {
        self.public_key_path(key_id).exists() && self.private_key_path(key_id).exists()
    }

    /// Ids of keys with a locally held private half, sorted.
    pub fn list_private_key_ids(&self) -> Vec<String> {
        list_ids(&self.private_dir(), PRIVATE_SUFFIX)
    }

    /// Ids of trusted public keys, sorted.
    pub fn list_trusted_key_ids(&self) -> Vec<String> {
        list_ids(&self.trusted_dir(), PUBLIC_SUFFIX)
    }

    /// Hex forms of every decodable PEM in the trusted directory.
    ///
    /// This is the trust snapshot verification runs against. Entries that
    /// fail to decode are skipped with a warning; they never abort the
    /// enumeration.
    pub fn all_trusted_public_keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.trusted_dir()) else {
            return Vec::new();
        };

        let mut keys = Vec::new();
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "pem"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(pem) = read_to_string_quietly(&path) else {
                tracing::warn!("[store] skipping unreadable key file {:?}", path);
                continue;
            };
            match pem_to_public_key_hex(&pem) {
                Ok(hex) => keys.push(hex),
                Err(e) => {
                    tracing::warn!("[store] skipping undecodable key file {:?}: {}", path, e);
                }
            }
        }
        keys
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn trusted_dir(&self) -> PathBuf {
        self.root.join(TRUSTED_KEYS_DIR)
    }

    fn private_dir(&self) -> PathBuf {
        self.root.join(PRIVATE_KEYS_DIR)
    }

    fn public_key_path(&self, key_id: &str) -> PathBuf {
        self.trusted_dir().join(format!("{key_id}{PUBLIC_SUFFIX}"))
    }

    fn metadata_path(&self, key_id: &str) -> PathBuf {
        self.trusted_dir().join(format!("{key_id}{META_SUFFIX}"))
    }

    fn private_key_path(&self, key_id: &str) -> PathBuf {
        self.private_dir().join(format!("{key_id}{PRIVATE_SUFFIX}"))
    }

    fn get_private_key(&self, key_id: &str) -> Option<String> {
        let pem = read_to_string_quietly(&self.private_key_path(key_id))?;
        match pem_to_private_key_hex(&pem) {
            Ok(hex) => Some(hex),
            Err(e) => {
                tracing::warn!("[store] undecodable private key '{}': {}", key_id, e);
                None
            }
        }
    }

    /// Persist both halves of a keypair plus metadata, rolling back any
    /// partial files on failure.
    fn store_pair(
        &self,
        key_id: &str,
        pair: &KeyPair,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        let public_path = self.public_key_path(key_id);
        let private_path = self.private_key_path(key_id);
        if public_path.exists() || private_path.exists() {
            return Err(StoreError::KeyExists(key_id.to_string()));
        }

        let public_pem = public_key_to_pem(&pair.public_key)
            .map_err(|e| StoreError::InvalidKeyMaterial(e.to_string()))?;
        let private_pem = private_key_to_pem(&pair.private_key)
            .map_err(|e| StoreError::InvalidKeyMaterial(e.to_string()))?;

        ensure_dir(&self.trusted_dir())?;
        ensure_dir(&self.private_dir())?;

        let result = write_with_mode(&public_path, public_pem.as_bytes(), 0o644)
            .map_err(StoreError::from)
            .and_then(|()| {
                write_with_mode(&private_path, private_pem.as_bytes(), 0o600)
                    .map_err(StoreError::from)
            })
            .and_then(|()| self.write_metadata(key_id, description));

        if result.is_err() {
            remove_quietly(&public_path);
            remove_quietly(&private_path);
            remove_quietly(&self.metadata_path(key_id));
        }
        result
    }

    fn write_metadata(&self, key_id: &str, description: Option<&str>) -> Result<(), StoreError> {
        let metadata = KeyMetadata {
            key_id: key_id.to_string(),
            created: chrono::Utc::now().to_rfc3339(),
            algorithm: SIGNATURE_ALGORITHM.to_string(),
            description: description.map(str::to_string),
        };
        let json = serde_json::to_string_pretty(&metadata)?;
        write_with_mode(&self.metadata_path(key_id), json.as_bytes(), 0o644)?;
        Ok(())
    }
}

fn read_to_string_quietly(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Collect `{id}{suffix}` file names under `dir`, sorted by id.
fn list_ids(dir: &Path, suffix: &str) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut ids: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(suffix))
                .map(str::to_string)
        })
        .collect();
    ids.sort();
    ids
}
