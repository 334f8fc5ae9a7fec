//! Analysis domain model.
//!
//! The types here are constructed once, when an upload or scan completes,
//! and are immutable afterwards: a reset replaces the whole session rather
//! than mutating it in place.

use crate::api::{AnalysisPayload, AnalyzeResponse, RedFlagPayload};
use crate::error::{DealbreakerError, Result};
use serde::{Deserialize, Serialize};

/// Where the analyzed document came from.
///
/// Serialized with the labels the legacy history format used: the browser
/// MIME type for PDFs and the literal `web` for URL scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// An uploaded PDF file. Red flags may carry a source page.
    #[serde(rename = "application/pdf")]
    Pdf,
    /// A scanned web page. No source document preview exists.
    #[serde(rename = "web")]
    Url,
}

/// Severity of one identified risk.
///
/// The backend labels flags as "High" or "Medium"; anything that is not
/// literally high risk is folded into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Other,
}

impl Severity {
    /// Parses the wire label, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("high") {
            Self::High
        } else {
            Self::Other
        }
    }

    /// The label sent back to the backend in bulk negotiation requests.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Other => "Medium",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// One identified contractual risk.
///
/// Referenced by index into [`AnalysisSession::red_flags`]; indices are
/// stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Risk severity (High, or anything less).
    pub severity: Severity,
    /// Why this clause is dangerous, in plain language.
    pub risk: String,
    /// The exact clause text from the contract.
    pub clause: String,
    /// 1-based page the clause was found on. Present only for PDF sources.
    /// Persisted under the legacy `page` key.
    #[serde(default, rename = "page", skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
}

impl RedFlag {
    fn from_payload(payload: RedFlagPayload) -> Self {
        Self {
            severity: Severity::from_label(&payload.severity),
            risk: payload.risk,
            clause: payload.clause,
            source_page: payload.page,
        }
    }

    /// Converts back to the wire shape for bulk negotiation requests.
    pub fn to_payload(&self) -> RedFlagPayload {
        RedFlagPayload {
            severity: self.severity.as_label().to_string(),
            risk: self.risk.clone(),
            clause: self.clause.clone(),
            page: self.source_page,
        }
    }
}

/// The in-memory representation of one completed document analysis.
///
/// Owned exclusively by the session controller; immutable once created
/// except by wholesale replacement on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    /// File name (or URL-derived name) the backend reported.
    pub filename: String,
    /// Whether this session came from a PDF upload or a URL scan.
    pub source_kind: SourceKind,
    /// Overall contract safety, 0 (predatory) to 100 (safe).
    pub safety_score: u8,
    /// One-line AI summary of the contract.
    pub summary: String,
    /// Identified risks, in the order the backend returned them.
    pub red_flags: Vec<RedFlag>,
}

impl AnalysisSession {
    /// Validates and converts an analyze response into a session.
    ///
    /// # Errors
    ///
    /// Returns [`DealbreakerError::InvalidResult`] if the response lacks an
    /// analysis object or any of its required fields (score, summary, red
    /// flag list). Nothing is constructed on failure.
    pub fn from_response(response: AnalyzeResponse, source_kind: SourceKind) -> Result<Self> {
        let filename = response
            .filename
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| DealbreakerError::invalid_result("missing filename"))?;

        let AnalysisPayload {
            safety_score,
            summary,
            red_flags,
        } = response
            .analysis
            .ok_or_else(|| DealbreakerError::invalid_result("missing analysis object"))?;

        let safety_score = safety_score
            .ok_or_else(|| DealbreakerError::invalid_result("missing safety_score"))?;
        let summary =
            summary.ok_or_else(|| DealbreakerError::invalid_result("missing summary"))?;
        let red_flags =
            red_flags.ok_or_else(|| DealbreakerError::invalid_result("missing red_flags"))?;

        Ok(Self {
            filename,
            source_kind,
            safety_score: safety_score.clamp(0, 100) as u8,
            summary,
            red_flags: red_flags.into_iter().map(RedFlag::from_payload).collect(),
        })
    }

    /// Returns the flag at `index`, or an error addressing the valid range.
    pub fn flag(&self, index: usize) -> Result<&RedFlag> {
        self.red_flags
            .get(index)
            .ok_or(DealbreakerError::FlagOutOfRange {
                index,
                len: self.red_flags.len(),
            })
    }
}

/// Coarse safety banding used by presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// Score >= 80: the contract looks safe.
    Safe,
    /// Score 50..80: read carefully.
    Caution,
    /// Score < 50: dangerous territory.
    Danger,
}

/// Bands a safety score the way the original dashboard colored it.
pub fn score_band(score: u8) -> ScoreBand {
    if score >= 80 {
        ScoreBand::Safe
    } else if score >= 50 {
        ScoreBand::Caution
    } else {
        ScoreBand::Danger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(analysis: Option<AnalysisPayload>) -> AnalyzeResponse {
        AnalyzeResponse {
            filename: Some("lease.pdf".to_string()),
            analysis,
        }
    }

    fn full_payload() -> AnalysisPayload {
        AnalysisPayload {
            safety_score: Some(42),
            summary: Some("A risky lease.".to_string()),
            red_flags: Some(vec![RedFlagPayload {
                severity: "High".to_string(),
                risk: "Auto-renewal".to_string(),
                clause: "This lease renews automatically.".to_string(),
                page: Some(3),
            }]),
        }
    }

    #[test]
    fn test_from_response_valid() {
        let session =
            AnalysisSession::from_response(response(Some(full_payload())), SourceKind::Pdf)
                .unwrap();

        assert_eq!(session.filename, "lease.pdf");
        assert_eq!(session.safety_score, 42);
        assert_eq!(session.red_flags.len(), 1);
        assert_eq!(session.red_flags[0].severity, Severity::High);
        assert_eq!(session.red_flags[0].source_page, Some(3));
    }

    #[test]
    fn test_from_response_missing_analysis() {
        let err = AnalysisSession::from_response(response(None), SourceKind::Pdf).unwrap_err();
        assert!(err.is_invalid_result());
    }

    #[test]
    fn test_from_response_missing_fields() {
        for strip in ["score", "summary", "flags"] {
            let mut payload = full_payload();
            match strip {
                "score" => payload.safety_score = None,
                "summary" => payload.summary = None,
                _ => payload.red_flags = None,
            }
            let err = AnalysisSession::from_response(response(Some(payload)), SourceKind::Pdf)
                .unwrap_err();
            assert!(err.is_invalid_result(), "expected InvalidResult for {strip}");
        }
    }

    #[test]
    fn test_score_is_clamped() {
        let mut payload = full_payload();
        payload.safety_score = Some(400);
        let session =
            AnalysisSession::from_response(response(Some(payload)), SourceKind::Url).unwrap();
        assert_eq!(session.safety_score, 100);
    }

    #[test]
    fn test_severity_folding() {
        assert_eq!(Severity::from_label("High"), Severity::High);
        assert_eq!(Severity::from_label("HIGH"), Severity::High);
        assert_eq!(Severity::from_label("Medium"), Severity::Other);
        assert_eq!(Severity::from_label("Low"), Severity::Other);
    }

    #[test]
    fn test_flag_out_of_range() {
        let session =
            AnalysisSession::from_response(response(Some(full_payload())), SourceKind::Pdf)
                .unwrap();
        assert!(session.flag(0).is_ok());
        assert!(matches!(
            session.flag(5),
            Err(DealbreakerError::FlagOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_score_band() {
        assert_eq!(score_band(95), ScoreBand::Safe);
        assert_eq!(score_band(80), ScoreBand::Safe);
        assert_eq!(score_band(79), ScoreBand::Caution);
        assert_eq!(score_band(50), ScoreBand::Caution);
        assert_eq!(score_band(49), ScoreBand::Danger);
    }
}
