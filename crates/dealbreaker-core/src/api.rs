//! Wire-contract types for the analysis backend.
//!
//! These structs mirror the request and response bodies of the backend API
//! (`/analyze`, `/analyze-url`, `/chat`, `/negotiate`, `/negotiate-all`).
//! Response-side fields that the backend may omit are modeled as `Option`
//! so that a malformed payload is caught by session validation instead of
//! failing deserialization outright.

use serde::{Deserialize, Serialize};

/// One red flag as it appears on the wire.
///
/// `severity` stays a free-form label here ("High", "Medium", ...); the
/// domain layer folds it into [`crate::analysis::Severity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlagPayload {
    pub severity: String,
    pub risk: String,
    pub clause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// The `analysis` object inside an analyze response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub safety_score: Option<i64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub red_flags: Option<Vec<RedFlagPayload>>,
}

/// Response body of `POST /analyze` and `POST /analyze-url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub analysis: Option<AnalysisPayload>,
}

/// Request body of `POST /analyze-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: String,
}

/// One prior turn in the chat context payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryMessage {
    pub role: String,
    pub content: String,
}

/// Request body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub filename: String,
    pub question: String,
    pub history: Vec<ChatHistoryMessage>,
}

/// Response body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Request body of `POST /negotiate` (single clause).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiateRequest {
    pub clause: String,
    pub risk: String,
}

/// Request body of `POST /negotiate-all` (every identified risk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiateAllRequest {
    pub red_flags: Vec<RedFlagPayload>,
}

/// Response body of the negotiate endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiateResponse {
    pub email: String,
}
