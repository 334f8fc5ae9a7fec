//! Error types for the Deal Breaker client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the client-side orchestrator.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DealbreakerError {
    /// The analysis payload returned by the backend is missing required fields.
    ///
    /// Fatal to session start: no partially-initialized session is ever built.
    #[error("Invalid analysis result: {reason}")]
    InvalidResult { reason: String },

    /// A red-flag index does not address an existing flag in the session.
    #[error("Red flag index {index} out of range (session has {len} flags)")]
    FlagOutOfRange { index: usize, len: usize },

    /// The operation requires an active session but none exists.
    #[error("No active analysis session")]
    NoActiveSession,

    /// A bulk draft was requested for a session without any red flags.
    #[error("Cannot draft a master email: the session has no red flags")]
    NoRedFlags,

    /// Backend call failure (chat, negotiate, analyze).
    #[error("Backend error: {0}")]
    Backend(String),

    /// Data access error (history repository / storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DealbreakerError {
    /// Creates an InvalidResult error
    pub fn invalid_result(reason: impl Into<String>) -> Self {
        Self::InvalidResult {
            reason: reason.into(),
        }
    }

    /// Creates a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an InvalidResult error
    pub fn is_invalid_result(&self) -> bool {
        matches!(self, Self::InvalidResult { .. })
    }

    /// Check if this is a Backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

impl From<std::io::Error> for DealbreakerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DealbreakerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for DealbreakerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, DealbreakerError>`.
pub type Result<T> = std::result::Result<T, DealbreakerError>;
