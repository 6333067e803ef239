//! # Enact Security Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # Fixed-input, fixed-output acceptance scenarios
//!     ├── properties.rs   # Cross-cutting behavioral properties
//!     └── flows.rs        # Cross-crate flows over temporary host roots
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p enact-tests
//!
//! # By category
//! cargo test -p enact-tests integration::scenarios::
//! cargo test -p enact-tests integration::properties::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
