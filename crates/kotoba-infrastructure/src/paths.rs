//! Unified path management for kotoba data files.
//!
//! All kotoba session and settings data lives under a single base
//! directory, resolved per platform via the `dirs` crate.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for kotoba.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/kotoba/            # Base directory (platform equivalent)
/// ├── sessions/                # One JSON file per chat session
/// │   └── <session-id>.json
/// └── settings.json            # Flat key-value settings slots
/// ```
pub struct KotobaPaths;

impl KotobaPaths {
    /// Returns the kotoba base data directory.
    ///
    /// The directory is not created here; storage constructors create what
    /// they need.
    pub fn base_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("kotoba"))
            .ok_or(PathError::ConfigDirNotFound)
    }
}
