//! Path helpers for layer discovery.

use crate::ConfigError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Canonical form of `path`; a path that does not exist yet is returned as given.
pub(super) fn normalize_path(path: &Path) -> Result<PathBuf, ConfigError> {
    match path.canonicalize() {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(ConfigError::Io(err)),
        result => Ok(result.unwrap_or_else(|_| path.to_path_buf())),
    }
}

/// Key used to detect the same file reached through two layers.
pub(super) fn unique_path(path: &Path) -> PathBuf {
    normalize_path(path).unwrap_or_else(|_| path.to_path_buf())
}
