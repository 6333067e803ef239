//! # Security-Config Store
//!
//! Persists the host's verification policy as JSON under
//! `security/config.json`.
//!
//! Load never fails: a missing file initializes the defaults on disk, and
//! an unparsable one reads as the defaults.

use crate::errors::StoreError;
use crate::paths::{default_root, ensure_dir, write_with_mode, SECURITY_DIR};
use enact_types::{SecurityConfig, SecurityConfigPatch};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Handle over the security configuration of one host root.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `$ENACT_HOME` / `$HOME/.enact`.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::with_root(default_root()?))
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(SECURITY_DIR).join(CONFIG_FILE)
    }

    /// Ensure a config file exists, writing the defaults when it does not,
    /// and return the current configuration.
    pub fn initialize(&self) -> SecurityConfig {
        if !self.config_path().exists() {
            let defaults = SecurityConfig::default();
            if !self.save(&defaults) {
                return defaults;
            }
        }
        self.load()
    }

    /// Load the configuration.
    ///
    /// A missing file persists and returns the defaults; an unreadable or
    /// unparsable file returns the defaults without touching disk.
    pub fn load(&self) -> SecurityConfig {
        let path = self.config_path();
        if !path.exists() {
            let defaults = SecurityConfig::default();
            self.save(&defaults);
            return defaults;
        }

        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("[config] unparsable {:?}, using defaults: {}", path, e);
                    SecurityConfig::default()
                }
            },
            Err(e) => {
                tracing::warn!("[config] unreadable {:?}, using defaults: {}", path, e);
                SecurityConfig::default()
            }
        }
    }

    /// Persist a configuration. Returns `false` on I/O failure.
    pub fn save(&self, config: &SecurityConfig) -> bool {
        let result = ensure_dir(&self.root.join(SECURITY_DIR)).and_then(|()| {
            let json =
                serde_json::to_string_pretty(config).expect("config serialization is infallible");
            write_with_mode(&self.config_path(), json.as_bytes(), 0o644)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[config] save failed: {}", e);
                false
            }
        }
    }

    /// Load, apply a partial update, save, and return the result.
    pub fn update(&self, patch: &SecurityConfigPatch) -> SecurityConfig {
        let mut config = self.load();
        config.apply(patch);
        self.save(&config);
        config
    }

    /// Overwrite with the defaults and return them.
    pub fn reset(&self) -> SecurityConfig {
        let defaults = SecurityConfig::default();
        self.save(&defaults);
        defaults
    }

    /// Structural validation of an untyped candidate configuration.
    ///
    /// Present fields must have the right type; `minimumSignatures` must be
    /// a non-negative integer. Unknown keys are tolerated (they are dropped
    /// by the shallow merge on save).
    pub fn validate(candidate: &Value) -> bool {
        let Value::Object(map) = candidate else {
            return false;
        };
        if let Some(allow) = map.get("allowLocalUnsigned") {
            if !allow.is_boolean() {
                return false;
            }
        }
        if let Some(minimum) = map.get("minimumSignatures") {
            if minimum.as_u64().is_none() {
                return false;
            }
        }
        true
    }

    /// Import a configuration file. Returns the stored result, or `None`
    /// when the file is unreadable or fails validation.
    pub fn import_from(&self, path: &Path) -> Option<SecurityConfig> {
        let json = fs::read_to_string(path).ok()?;
        let value: Value = serde_json::from_str(&json).ok()?;
        if !Self::validate(&value) {
            tracing::warn!("[config] import rejected: invalid shape in {:?}", path);
            return None;
        }

        let mut config = SecurityConfig::default();
        config.apply(&serde_json::from_value(value).ok()?);
        self.save(&config);
        Some(config)
    }

    /// Export the effective configuration to a file. Returns `false` on
    /// I/O failure.
    pub fn export_to(&self, path: &Path) -> bool {
        let config = self.load();
        let json =
            serde_json::to_string_pretty(&config).expect("config serialization is infallible");
        match fs::write(path, json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[config] export failed: {}", e);
                false
            }
        }
    }
}
