//! Bounded, deduplicated history policy.

use super::model::HistoryEntry;
use super::repository::HistoryRepository;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Maximum number of history entries kept.
pub const MAX_HISTORY_ITEMS: usize = 5;

/// Applies the bounding and dedup policy on top of a [`HistoryRepository`].
///
/// The sequence is read, mutated, and written back wholesale on every
/// record; the medium is single-process in this design, so no cross-process
/// write arbitration is attempted.
#[derive(Clone)]
pub struct HistoryStore {
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryStore {
    /// Creates a store over the given persistence medium.
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    /// Records an entry, deduplicating by filename and truncating to
    /// [`MAX_HISTORY_ITEMS`].
    ///
    /// An existing entry with the same filename is replaced and moved to the
    /// front; entries beyond the bound are discarded oldest-first. Entries
    /// not touched keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write. History is
    /// best-effort: callers log and swallow this.
    pub async fn record(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.repository.load().await?;

        entries.retain(|existing| existing.filename != entry.filename);
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ITEMS);

        self.repository
            .save(&entries)
            .await
            .context("Failed to persist scan history")
    }

    /// Returns the persisted sequence, most recent first.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        self.repository.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SourceKind;
    use crate::history::model::AnalysisSnapshot;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory medium for policy tests.
    #[derive(Default)]
    struct MemoryRepository {
        entries: Mutex<Vec<HistoryEntry>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl HistoryRepository for MemoryRepository {
        async fn load(&self) -> Result<Vec<HistoryEntry>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
            if self.fail_saves {
                anyhow::bail!("quota exceeded");
            }
            *self.entries.lock().unwrap() = entries.to_vec();
            Ok(())
        }
    }

    fn entry(filename: &str, id: i64) -> HistoryEntry {
        HistoryEntry {
            id,
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            filename: filename.to_string(),
            source_kind: SourceKind::Url,
            analysis: AnalysisSnapshot {
                safety_score: 70,
                summary: format!("summary of {filename}"),
                red_flags: vec![],
            },
            file_data: None,
        }
    }

    #[tokio::test]
    async fn test_never_exceeds_bound() {
        let store = HistoryStore::new(Arc::new(MemoryRepository::default()));

        for i in 0..8 {
            store.record(entry(&format!("doc-{i}.pdf"), i)).await.unwrap();
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), MAX_HISTORY_ITEMS);
        // Newest first; the oldest three were evicted.
        assert_eq!(listed[0].filename, "doc-7.pdf");
        assert_eq!(listed[4].filename, "doc-3.pdf");
    }

    #[tokio::test]
    async fn test_dedup_by_filename_moves_to_front() {
        let store = HistoryStore::new(Arc::new(MemoryRepository::default()));

        store.record(entry("a.pdf", 1)).await.unwrap();
        store.record(entry("b.pdf", 2)).await.unwrap();
        store.record(entry("c.pdf", 3)).await.unwrap();
        store.record(entry("a.pdf", 4)).await.unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["a.pdf", "c.pdf", "b.pdf"]);
        // Replaced, not duplicated, and carrying the new content.
        assert_eq!(listed[0].id, 4);
    }

    #[tokio::test]
    async fn test_untouched_entries_preserve_relative_order() {
        let store = HistoryStore::new(Arc::new(MemoryRepository::default()));

        for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"] {
            store.record(entry(name, 0)).await.unwrap();
        }
        store.record(entry("b.pdf", 9)).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();
        assert_eq!(names, ["b.pdf", "d.pdf", "c.pdf", "a.pdf"]);
    }

    #[tokio::test]
    async fn test_rejected_write_surfaces_as_error() {
        let store = HistoryStore::new(Arc::new(MemoryRepository {
            fail_saves: true,
            ..Default::default()
        }));

        assert!(store.record(entry("a.pdf", 1)).await.is_err());
    }
}
