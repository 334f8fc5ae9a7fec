//! Scan history domain module.
//!
//! A bounded, deduplicated record of past analyses for quick recall across
//! restarts. The storage medium sits behind the narrow
//! [`HistoryRepository`] port; the eviction and dedup policy lives in
//! [`HistoryStore`] and never changes with the medium.

mod model;
mod repository;
mod store;

pub use model::{AnalysisSnapshot, HistoryEntry};
pub use repository::HistoryRepository;
pub use store::{HistoryStore, MAX_HISTORY_ITEMS};
