//! Client configuration.
//!
//! Loaded from `~/.dealbreaker/config.toml` when present; a missing file
//! yields the defaults. The `DEALBREAKER_API_URL` environment variable
//! overrides the configured base URL either way.

use crate::paths::DealbreakerPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Settings for talking to the analysis backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error; defaults apply. A file that exists
    /// but does not parse is an error, to avoid silently talking to the
    /// wrong backend.
    pub fn load() -> Result<Self> {
        let path = DealbreakerPaths::config_file()
            .map_err(|e| anyhow::anyhow!("Failed to resolve config path: {}", e))?;
        Self::load_from(&path)
    }

    /// Loads the configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("DEALBREAKER_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        Ok(config)
    }
}
