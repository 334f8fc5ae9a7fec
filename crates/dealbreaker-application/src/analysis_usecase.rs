//! Analysis session use case.
//!
//! `AnalysisUseCase` is the asynchronous face of the orchestrator: UI
//! events come in as method calls, state lives in the core
//! [`SessionController`] behind a single `RwLock`, and every backend call
//! happens with the lock released. Responses re-acquire the lock and are
//! delivered through the controller's `complete_*` methods, which discard
//! anything stale by token. Backend failures on chat and negotiation never
//! propagate out of this type; they surface as inline placeholder text.

use anyhow::{Context, Result};
use dealbreaker_core::analysis::{AnalysisSession, SourceKind};
use dealbreaker_core::api::AnalyzeResponse;
use dealbreaker_core::backend::ContractBackend;
use dealbreaker_core::chat::ChatMessage;
use dealbreaker_core::history::{HistoryEntry, HistoryRepository, HistoryStore};
use dealbreaker_core::negotiation::{DraftMode, DraftRequest, DraftTicket};
use dealbreaker_core::session::SessionController;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Orchestrates one user's analysis sessions against the backend ports.
///
/// Cheap to clone; all clones share the same controller state.
#[derive(Clone)]
pub struct AnalysisUseCase {
    controller: Arc<RwLock<SessionController>>,
    backend: Arc<dyn ContractBackend>,
    history: HistoryStore,
}

impl AnalysisUseCase {
    /// Creates a use case over the given backend and history medium.
    pub fn new(
        backend: Arc<dyn ContractBackend>,
        history_repository: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            controller: Arc::new(RwLock::new(SessionController::new())),
            backend,
            history: HistoryStore::new(history_repository),
        }
    }

    // ---- session lifecycle ------------------------------------------------

    /// Submits a PDF for analysis and starts a session from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails or the result payload is
    /// malformed. Neither case leaves a partially-initialized session.
    pub async fn analyze_file(&self, filename: &str, bytes: Vec<u8>) -> Result<AnalysisSession> {
        let response = self
            .backend
            .analyze_file(filename, bytes)
            .await
            .context("File analysis failed")?;
        self.start_session(response, SourceKind::Pdf).await
    }

    /// Submits a URL for analysis and starts a session from the result.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisSession> {
        let response = self
            .backend
            .analyze_url(url)
            .await
            .context("URL analysis failed")?;
        self.start_session(response, SourceKind::Url).await
    }

    async fn start_session(
        &self,
        response: AnalyzeResponse,
        source_kind: SourceKind,
    ) -> Result<AnalysisSession> {
        let (entry, session) = {
            let mut controller = self.controller.write().await;
            let entry = controller.start_session(response, source_kind)?;
            // Just started, so the session is present.
            let session = controller.session().cloned().expect("session just started");
            (entry, session)
        };

        tracing::info!(
            filename = %session.filename,
            safety_score = session.safety_score,
            red_flags = session.red_flags.len(),
            "Analysis session started"
        );
        self.record_history(entry).await;

        Ok(session)
    }

    /// Discards the current session and all dependent state.
    ///
    /// No-op when no session is active; nothing is persisted at reset.
    pub async fn reset_session(&self) {
        self.controller.write().await.reset_session();
    }

    /// The active analysis, if any.
    pub async fn session(&self) -> Option<AnalysisSession> {
        self.controller.read().await.session().cloned()
    }

    // ---- chat -------------------------------------------------------------

    /// Asks a question about the analyzed document.
    ///
    /// Blank input is a no-op. The question appears in the transcript
    /// before the answer arrives; a backend failure appears as the fixed
    /// connection-error reply. Concurrent calls each produce their own turn
    /// and pair up correctly regardless of completion order.
    ///
    /// # Errors
    ///
    /// Returns an error only when no session is active.
    pub async fn ask(&self, question: &str) -> Result<()> {
        let pending = { self.controller.write().await.begin_question(question)? };
        let Some(pending) = pending else {
            return Ok(()); // blank input
        };

        let outcome = self
            .backend
            .chat(&pending.request)
            .await
            .map(|response| response.answer);
        if let Err(err) = &outcome {
            tracing::warn!(turn = pending.turn, "Chat request failed: {err:#}");
        }

        self.controller
            .write()
            .await
            .complete_question(pending.turn, outcome);
        Ok(())
    }

    /// The visible transcript, greeting included.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.controller.read().await.transcript()
    }

    // ---- negotiation ------------------------------------------------------

    /// Requests a negotiation-email draft for the flag at `index`.
    ///
    /// Supersedes any active draft immediately; the outcome is delivered
    /// under last-request-wins. A generation failure surfaces as the
    /// placeholder draft text, not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or `index` is out of
    /// range.
    pub async fn request_single_draft(&self, index: usize) -> Result<()> {
        let ticket = { self.controller.write().await.request_single_draft(index)? };
        self.run_draft(ticket).await;
        Ok(())
    }

    /// Requests one master draft covering every red flag.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or it has no red flags.
    pub async fn request_bulk_draft(&self) -> Result<()> {
        let ticket = { self.controller.write().await.request_bulk_draft()? };
        self.run_draft(ticket).await;
        Ok(())
    }

    async fn run_draft(&self, ticket: DraftTicket) {
        let outcome = match &ticket.request {
            DraftRequest::Single(request) => self.backend.negotiate(request).await,
            DraftRequest::Bulk(request) => self.backend.negotiate_all(request).await,
        }
        .map(|response| response.email);
        if let Err(err) = &outcome {
            tracing::warn!(token = ticket.token, "Draft generation failed: {err:#}");
        }

        let accepted = self
            .controller
            .write()
            .await
            .complete_draft(ticket.token, outcome);
        if !accepted {
            tracing::debug!(token = ticket.token, "Discarded stale draft response");
        }
    }

    /// Closes whichever draft view is active. The pending network call, if
    /// any, is left to finish and be discarded.
    pub async fn close_draft(&self) {
        self.controller.write().await.close_draft();
    }

    /// The active draft mode, if any.
    pub async fn active_draft_mode(&self) -> Option<DraftMode> {
        self.controller.read().await.active_draft_mode()
    }

    /// The resolved draft text of the active request, if any.
    pub async fn visible_draft(&self) -> Option<String> {
        self.controller
            .read()
            .await
            .visible_draft()
            .map(str::to_string)
    }

    // ---- view sync --------------------------------------------------------

    /// Focuses the source viewer on the page of the flag at `index`.
    pub async fn focus_flag(&self, index: usize) -> Result<Option<u32>> {
        Ok(self.controller.write().await.focus_flag(index)?)
    }

    /// Navigates the source viewer directly to `page` (PDF sessions only).
    pub async fn set_active_page(&self, page: u32) {
        self.controller.write().await.set_active_page(page);
    }

    /// The page the source viewer shows, if any.
    pub async fn active_page(&self) -> Option<u32> {
        self.controller.read().await.active_page()
    }

    // ---- history ----------------------------------------------------------

    /// The persisted scan history, most recent first.
    ///
    /// Best-effort: an unreadable medium lists as empty.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        match self.history.list().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Failed to list scan history: {err:#}");
                Vec::new()
            }
        }
    }

    async fn record_history(&self, entry: HistoryEntry) {
        // Best-effort; a full or broken medium must not fail the session.
        if let Err(err) = self.history.record(entry).await {
            tracing::warn!("Failed to record scan history: {err:#}");
        }
    }
}
