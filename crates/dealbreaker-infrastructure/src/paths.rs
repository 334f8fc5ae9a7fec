//! Unified path management for Deal Breaker client files.
//!
//! All client state (configuration, scan history) lives under a single base
//! directory, `~/.dealbreaker`.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for the Deal Breaker client.
///
/// # Directory Structure
///
/// ```text
/// ~/.dealbreaker/
/// ├── config.toml          # Client configuration
/// └── scan_history.json    # Bounded scan history
/// ```
pub struct DealbreakerPaths;

impl DealbreakerPaths {
    /// Returns the client base directory (`~/.dealbreaker`).
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HomeDirNotFound`] if the home directory cannot
    /// be determined.
    pub fn base_dir() -> Result<PathBuf, PathError> {
        dirs::home_dir()
            .map(|home| home.join(".dealbreaker"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path of the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("config.toml"))
    }
}
