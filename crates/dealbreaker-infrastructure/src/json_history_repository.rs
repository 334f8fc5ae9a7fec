//! JSON-file-backed history repository.
//!
//! Persists the scan-history sequence as a single pretty-printed JSON file,
//! `scan_history.json`, under the client base directory. The sequence is
//! read and written wholesale, matching the legacy localStorage discipline.

use crate::paths::DealbreakerPaths;
use anyhow::{Context, Result};
use async_trait::async_trait;
use dealbreaker_core::history::{HistoryEntry, HistoryRepository};
use std::path::{Path, PathBuf};
use tokio::fs;

const HISTORY_FILE: &str = "scan_history.json";

/// Stores the history sequence in a JSON file.
pub struct JsonHistoryRepository {
    base_dir: PathBuf,
}

impl JsonHistoryRepository {
    /// Creates a repository rooted at `base_dir`.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .await
            .context("Failed to create history directory")?;
        Ok(Self { base_dir })
    }

    /// Creates a repository at the default location (`~/.dealbreaker`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory cannot be created.
    pub async fn default_location() -> Result<Self> {
        let base_dir = DealbreakerPaths::base_dir()
            .map_err(|e| anyhow::anyhow!("Failed to resolve history directory: {}", e))?;
        Self::new(base_dir).await
    }

    fn history_file_path(&self) -> PathBuf {
        self.base_dir.join(HISTORY_FILE)
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    /// Loads the persisted sequence.
    ///
    /// A missing, unreadable, or corrupt file reads as an empty sequence;
    /// history recall is best-effort and must never block the primary flow.
    async fn load(&self) -> Result<Vec<HistoryEntry>> {
        let path = self.history_file_path();

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                tracing::warn!("Failed to read scan history {:?}: {}", path, err);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!("Corrupt scan history {:?}, treating as empty: {}", path, err);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let path = self.history_file_path();
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize scan history")?;

        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write scan history: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dealbreaker_core::analysis::SourceKind;
    use dealbreaker_core::history::AnalysisSnapshot;
    use tempfile::TempDir;

    fn entry(filename: &str) -> HistoryEntry {
        HistoryEntry {
            id: Utc::now().timestamp_millis(),
            timestamp: Utc::now().to_rfc3339(),
            filename: filename.to_string(),
            source_kind: SourceKind::Url,
            analysis: AnalysisSnapshot {
                safety_score: 55,
                summary: "ok-ish".to_string(),
                red_flags: vec![],
            },
            file_data: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let repo = JsonHistoryRepository::new(dir.path()).await.unwrap();

        let entries = vec![entry("a.pdf"), entry("b.pdf")];
        repo.save(&entries).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, entries);
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonHistoryRepository::new(dir.path()).await.unwrap();

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty_and_is_rewritable() {
        let dir = TempDir::new().unwrap();
        let repo = JsonHistoryRepository::new(dir.path()).await.unwrap();

        fs::write(dir.path().join(HISTORY_FILE), "{ not json").await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());

        // The next save replaces the corrupt file with a valid one.
        repo.save(&[entry("fresh.pdf")]).await.unwrap();
        assert_eq!(repo.load().await.unwrap().len(), 1);
    }
}
