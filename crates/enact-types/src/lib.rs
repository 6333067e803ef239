//! # Enact Types Crate
//!
//! Domain entities shared across the Enact signing stack.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the wire shapes of [`Signature`],
//!   [`KeyMetadata`], and [`SecurityConfig`] are defined here and nowhere
//!   else.
//! - **Open documents**: a document is an open JSON map; unknown fields are
//!   preserved and passed through untouched.
//! - **No secret leakage**: [`KeyPair`] zeroizes its private half on drop
//!   and never prints it through `Debug`.

pub mod entities;

pub use entities::{
    Document, KeyMetadata, KeyPair, SecurityConfig, SecurityConfigPatch, Signature,
    SIGNATURE_ALGORITHM,
};
