//! # Verification Policy Resolution
//!
//! The effective policy for a trusted verify is layered: an explicit
//! per-call override wins over the host's persisted configuration, which
//! wins over the built-in defaults.

use enact_types::{SecurityConfig, SecurityConfigPatch};

/// Merge an optional per-call override on top of an optional stored
/// configuration, on top of defaults.
pub fn resolve_policy(
    stored: Option<SecurityConfig>,
    overrides: Option<&SecurityConfigPatch>,
) -> SecurityConfig {
    let mut effective = stored.unwrap_or_default();
    if let Some(overrides) = overrides {
        effective.apply(overrides);
    }
    effective
}
