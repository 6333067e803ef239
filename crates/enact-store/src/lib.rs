//! # Enact Store - Host Persistence
//!
//! Persistent state for the trusted-host profile: the trusted-key registry
//! and the security-policy configuration, both living under a host-owned
//! root directory (`$ENACT_HOME`, defaulting to `$HOME/.enact`).
//!
//! ## Layout
//!
//! ```text
//! $HOME/.enact/
//! ├── trusted-keys/
//! │   ├── {keyId}-public.pem   (0644)
//! │   └── {keyId}.meta         (0644, pretty JSON)
//! ├── private-keys/
//! │   └── {keyId}-private.pem  (0600)
//! └── security/
//!     └── config.json          (0644)
//! ```
//!
//! ## Failure Model
//!
//! Write paths surface [`StoreError`] after a best-effort rollback of any
//! partially written files. Read paths never throw: unreadable entries are
//! skipped with a warning, missing files read as absent, and a broken
//! config file reads as the defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod errors;
pub mod keystore;
pub mod paths;

// Re-exports
pub use config::ConfigStore;
pub use errors::StoreError;
pub use keystore::{KeyExportBundle, KeyStore};
pub use paths::default_root;
