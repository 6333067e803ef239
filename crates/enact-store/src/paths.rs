//! Host root directory discovery and file-mode helpers.

use crate::errors::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the host root.
pub const HOME_ENV: &str = "ENACT_HOME";

/// Directory under `$HOME` when no override is set.
pub const DEFAULT_DIR_NAME: &str = ".enact";

/// Trusted public keys and their metadata.
pub const TRUSTED_KEYS_DIR: &str = "trusted-keys";

/// Private keys, owner-only.
pub const PRIVATE_KEYS_DIR: &str = "private-keys";

/// Security-policy configuration.
pub const SECURITY_DIR: &str = "security";

/// Resolve the host root: `$ENACT_HOME` when set, else `$HOME/.enact`.
pub fn default_root() -> Result<PathBuf, StoreError> {
    if let Some(root) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(root));
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or(StoreError::HomeDirNotFound)
}

/// Create a directory (and parents) with mode 0755 on Unix.
pub(crate) fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    set_mode(path, 0o755)
}

/// Write a file and set its mode on Unix; 0644 for shared files, 0600 for
/// private key material.
pub(crate) fn write_with_mode(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    fs::write(path, contents)?;
    set_mode(path, mode)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

/// Remove a file if it exists, ignoring failures. Rollback helper for
/// partially completed writes.
pub(crate) fn remove_quietly(path: &Path) {
    let _ = fs::remove_file(path);
}
