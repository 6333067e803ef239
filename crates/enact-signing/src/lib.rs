//! # Enact Signing Engine
//!
//! Policy-driven projection of a document to canonical bytes, plus the
//! signing and verification engine built on top of it.
//!
//! ## Architecture
//!
//! - **`fields`**: which fields of a document are signed (default sets,
//!   include/exclude resolution, required-field validation)
//! - **`canonical`**: deterministic JSON byte form of the projected fields
//! - **`policy`**: effective verification policy resolution
//! - **`service`**: sign, trusted verification with threshold and fallback
//!   scan, and embedded-key verification for untrusted environments
//!
//! The engine performs no I/O. Trusted public keys and the effective policy
//! are explicit arguments; the boundary crate loads them from the host
//! stores and hands them in.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod errors;
pub mod fields;
pub mod policy;
pub mod service;

// Re-export public API
pub use canonical::{canonical_document, canonical_json_bytes, create_document_hash};
pub use errors::SigningError;
pub use fields::{
    enact_default_fields, generic_default_fields, signed_field_names, FieldConfig, SigningOptions,
};
pub use policy::resolve_policy;
pub use service::{sign_document, verify_document, verify_with_embedded_key};
