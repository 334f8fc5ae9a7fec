//! History entry model.
//!
//! Field names follow the legacy persisted layout
//! (`{ id, timestamp, filename, type, analysis, fileData }`), so histories
//! written by the original client remain readable.

use crate::analysis::{AnalysisSession, RedFlag, SourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deep copy of the analysis result stored with a history entry.
///
/// A snapshot, not a live reference: the originating session may be long
/// gone when the entry is recalled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub safety_score: u8,
    pub summary: String,
    pub red_flags: Vec<RedFlag>,
}

/// A persisted summary of a past analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation timestamp in epoch milliseconds; stable identity.
    pub id: i64,
    /// Creation time, RFC 3339.
    pub timestamp: String,
    /// File name (or URL-derived name); entries are unique per filename.
    pub filename: String,
    /// Document source kind, persisted under the legacy `type` key.
    #[serde(rename = "type")]
    pub source_kind: SourceKind,
    /// Deep copy of the analysis result.
    pub analysis: AnalysisSnapshot,
    /// Always `null`: PDF binary content is never persisted, only metadata.
    /// URL scans reload instantly; PDF entries require a re-upload.
    #[serde(rename = "fileData")]
    pub file_data: Option<String>,
}

impl HistoryEntry {
    /// Builds a snapshot entry for a session at a given instant.
    pub fn new(session: &AnalysisSession, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis(),
            timestamp: now.to_rfc3339(),
            filename: session.filename.clone(),
            source_kind: session.source_kind,
            analysis: AnalysisSnapshot {
                safety_score: session.safety_score,
                summary: session.summary.clone(),
                red_flags: session.red_flags.clone(),
            },
            file_data: None,
        }
    }

    /// Builds a snapshot entry for a session, stamped with the current time.
    pub fn from_session(session: &AnalysisSession) -> Self {
        Self::new(session, Utc::now())
    }
}
