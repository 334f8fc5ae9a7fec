//! History repository trait.
//!
//! Defines the interface for history persistence. The sequence is read and
//! written wholesale; there is no partial update. Keeping the port this
//! narrow makes the storage medium (JSON file, browser storage, embedded
//! key-value store) swappable without touching the eviction/dedup policy.

use super::model::HistoryEntry;
use anyhow::Result;
use async_trait::async_trait;

/// An abstract store for the persisted scan-history sequence.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads the persisted sequence, most recent first.
    ///
    /// # Returns
    ///
    /// - `Ok(entries)`: The stored sequence, or empty if nothing was ever
    ///   written. Implementations treat a corrupt or unreadable medium as
    ///   empty rather than as an error.
    /// - `Err(_)`: The medium itself could not be accessed at all.
    async fn load(&self) -> Result<Vec<HistoryEntry>>;

    /// Replaces the persisted sequence wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write (quota, permissions).
    /// Callers treat history as best-effort and must not let this failure
    /// reach the primary flow.
    async fn save(&self, entries: &[HistoryEntry]) -> Result<()>;
}
