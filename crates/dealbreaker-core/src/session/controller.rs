//! Top-level session state machine.
//!
//! Two states: `Empty` and `Active(session)`. A successful start moves to
//! `Active`, reset moves back to `Empty`, page navigation stays in `Active`.
//! All mutations happen at discrete event-handling points; the only
//! suspension points are the network calls, which live outside this type
//! and deliver their results back through the `complete_*` methods with the
//! token discipline of the components.

use crate::analysis::{AnalysisSession, SourceKind};
use crate::api::AnalyzeResponse;
use crate::chat::{ChatMessage, ChatSession, PendingQuestion};
use crate::error::{DealbreakerError, Result};
use crate::history::HistoryEntry;
use crate::negotiation::{DraftMode, DraftTicket, NegotiationCoordinator};
use crate::view::ViewSync;

#[derive(Debug, Clone)]
struct ActiveSession {
    analysis: AnalysisSession,
    chat: ChatSession,
    negotiation: NegotiationCoordinator,
    view: ViewSync,
}

/// Owns the current analysis session and the per-session component state.
///
/// Components never see each other: every intent enters here, and callers
/// only ever receive read-only snapshots.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    active: Option<ActiveSession>,
    /// Lower bound for the next chat turn and draft token. Carried across
    /// session replacements so ids are never reused and a completion issued
    /// against an earlier session can never match a newer one.
    token_seed: u64,
}

impl SessionController {
    /// Creates a controller in the `Empty` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a session from a completed analysis.
    ///
    /// On success the chat transcript is reset to a greeting referencing the
    /// filename, negotiation and view sync return to their initial state,
    /// and the returned [`HistoryEntry`] snapshot is handed to the caller
    /// for persistence (history is written at start, never at reset).
    ///
    /// # Errors
    ///
    /// Returns [`DealbreakerError::InvalidResult`] if the payload is not a
    /// well-formed analysis; the controller state is left exactly as it was.
    pub fn start_session(
        &mut self,
        response: AnalyzeResponse,
        source_kind: SourceKind,
    ) -> Result<HistoryEntry> {
        let analysis = AnalysisSession::from_response(response, source_kind)?;
        let entry = HistoryEntry::from_session(&analysis);

        self.harvest_token_seed();
        let chat = ChatSession::with_first_turn(&analysis.filename, self.token_seed);
        self.active = Some(ActiveSession {
            chat,
            negotiation: NegotiationCoordinator::with_first_token(self.token_seed),
            view: ViewSync::new(analysis.source_kind),
            analysis,
        });

        Ok(entry)
    }

    /// Discards the current session and all dependent component state.
    ///
    /// No-op when no session is active. Nothing is persisted here.
    pub fn reset_session(&mut self) {
        self.harvest_token_seed();
        self.active = None;
    }

    /// True while a session is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The active analysis, if any.
    pub fn session(&self) -> Option<&AnalysisSession> {
        self.active.as_ref().map(|a| &a.analysis)
    }

    // ---- chat -------------------------------------------------------------

    /// Appends a question to the transcript and returns its request.
    ///
    /// Returns `Ok(None)` for blank input (no transcript mutation, no
    /// request).
    ///
    /// # Errors
    ///
    /// Returns [`DealbreakerError::NoActiveSession`] when no session exists.
    pub fn begin_question(&mut self, question: &str) -> Result<Option<PendingQuestion>> {
        Ok(self.active_mut()?.chat.begin_question(question))
    }

    /// Delivers a chat outcome. Discarded silently if the session was reset
    /// or replaced since the question was asked.
    pub fn complete_question(&mut self, turn: u64, outcome: anyhow::Result<String>) {
        if let Some(active) = self.active.as_mut() {
            active.chat.complete_question(turn, outcome);
        }
    }

    /// The visible transcript, or empty when no session is active.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.active
            .as_ref()
            .map(|a| a.chat.transcript())
            .unwrap_or_default()
    }

    // ---- negotiation ------------------------------------------------------

    /// Marks a single-clause draft active and issues its request.
    pub fn request_single_draft(&mut self, index: usize) -> Result<DraftTicket> {
        let active = self.active_mut()?;
        active.negotiation.request_single(&active.analysis, index)
    }

    /// Marks a bulk draft active and issues its request.
    pub fn request_bulk_draft(&mut self) -> Result<DraftTicket> {
        let active = self.active_mut()?;
        active.negotiation.request_bulk(&active.analysis)
    }

    /// Delivers a draft outcome; stale or post-reset completions are
    /// discarded. Returns whether the completion was accepted.
    pub fn complete_draft(&mut self, token: u64, outcome: anyhow::Result<String>) -> bool {
        match self.active.as_mut() {
            Some(active) => active.negotiation.complete(token, outcome),
            None => false,
        }
    }

    /// Closes whichever draft view is active.
    pub fn close_draft(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.negotiation.close_draft();
        }
    }

    /// The active draft mode, if any.
    pub fn active_draft_mode(&self) -> Option<DraftMode> {
        self.active.as_ref().and_then(|a| a.negotiation.active_mode())
    }

    /// The resolved draft text of the active request, if any.
    pub fn visible_draft(&self) -> Option<&str> {
        self.active.as_ref().and_then(|a| a.negotiation.visible_draft())
    }

    // ---- view sync --------------------------------------------------------

    /// Focuses the viewer on the page of the flag at `index`.
    ///
    /// Returns the page now shown (unchanged for URL sessions or flags
    /// without a source page).
    pub fn focus_flag(&mut self, index: usize) -> Result<Option<u32>> {
        let active = self.active_mut()?;
        let flag = active.analysis.flag(index)?.clone();
        active.view.focus_flag(&flag);
        Ok(active.view.active_page())
    }

    /// Navigates the viewer directly to `page`.
    ///
    /// No-op unless a PDF-backed session is active.
    pub fn set_active_page(&mut self, page: u32) {
        if let Some(active) = self.active.as_mut() {
            active.view.set_active_page(page);
        }
    }

    /// The page the viewer shows, or `None` in the placeholder state.
    pub fn active_page(&self) -> Option<u32> {
        self.active.as_ref().and_then(|a| a.view.active_page())
    }

    fn active_mut(&mut self) -> Result<&mut ActiveSession> {
        self.active.as_mut().ok_or(DealbreakerError::NoActiveSession)
    }

    fn harvest_token_seed(&mut self) {
        if let Some(active) = &self.active {
            self.token_seed = self
                .token_seed
                .max(active.chat.next_turn())
                .max(active.negotiation.next_token());
        }
    }
}
