//! Analysis session domain module.
//!
//! Contains the immutable result of one completed document analysis:
//! the session itself, its red flags, and the enums describing where the
//! document came from and how severe each finding is.

mod model;

pub use model::{AnalysisSession, RedFlag, Severity, SourceKind, score_band, ScoreBand};
