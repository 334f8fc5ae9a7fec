//! Negotiation draft coordinator.
//!
//! At most one draft request is active at any time: either a single-clause
//! draft addressed by red-flag index, or one bulk draft covering every flag.
//! Requests are issued with a generation-counter token; a completion whose
//! token no longer matches the active request is discarded, so a stale
//! response can never overwrite a newer user action. No cancellation is sent
//! over the wire: an obsolete in-flight request still completes and is
//! simply ignored on arrival.

use crate::analysis::AnalysisSession;
use crate::api::{NegotiateAllRequest, NegotiateRequest};
use crate::error::{DealbreakerError, Result};

/// Placeholder draft text when a single-clause request fails.
pub const SINGLE_DRAFT_ERROR_TEXT: &str = "Error generating email";
/// Placeholder draft text when a bulk request fails.
pub const BULK_DRAFT_ERROR_TEXT: &str = "Error generating master email";

/// Which kind of draft is (or was) requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    /// Draft for one red flag, addressed by index into the session's flags.
    Single { index: usize },
    /// Master draft covering the full red-flag set.
    Bulk,
}

/// The wire request body paired with an issued ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRequest {
    Single(NegotiateRequest),
    Bulk(NegotiateAllRequest),
}

/// An issued draft request awaiting completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTicket {
    /// Generation token; hand it back to [`NegotiationCoordinator::complete`].
    pub token: u64,
    /// The mode this ticket was issued for.
    pub mode: DraftMode,
    /// The ready-to-send request body.
    pub request: DraftRequest,
}

#[derive(Debug, Clone)]
struct ActiveDraft {
    mode: DraftMode,
    token: u64,
    /// `None` while the request is in flight.
    text: Option<String>,
}

/// Coordinates draft generation with mutual exclusion and staleness guards.
#[derive(Debug, Clone, Default)]
pub struct NegotiationCoordinator {
    active: Option<ActiveDraft>,
    next_token: u64,
}

impl NegotiationCoordinator {
    /// Creates a coordinator with no active draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a coordinator whose tokens start at `first_token`.
    ///
    /// Seeded by the session controller from a counter that survives
    /// resets, so tokens are never reused across session replacements.
    pub fn with_first_token(first_token: u64) -> Self {
        Self {
            active: None,
            next_token: first_token,
        }
    }

    /// The next token this coordinator would issue.
    pub fn next_token(&self) -> u64 {
        self.next_token
    }

    /// Marks a single-clause draft active and issues its request.
    ///
    /// Any previously visible draft (single or bulk) is cleared immediately,
    /// before the new request resolves, so the user is never shown a draft
    /// belonging to the wrong flag.
    ///
    /// # Errors
    ///
    /// Returns [`DealbreakerError::FlagOutOfRange`] if `index` does not
    /// address an existing red flag; the coordinator state is untouched.
    pub fn request_single(&mut self, session: &AnalysisSession, index: usize) -> Result<DraftTicket> {
        let flag = session.flag(index)?;

        let ticket = DraftTicket {
            token: self.issue_token(),
            mode: DraftMode::Single { index },
            request: DraftRequest::Single(NegotiateRequest {
                clause: flag.clause.clone(),
                risk: flag.risk.clone(),
            }),
        };
        self.activate(&ticket);
        Ok(ticket)
    }

    /// Marks a bulk draft active and issues its request.
    ///
    /// # Errors
    ///
    /// Returns [`DealbreakerError::NoRedFlags`] if the session has no flags.
    pub fn request_bulk(&mut self, session: &AnalysisSession) -> Result<DraftTicket> {
        if session.red_flags.is_empty() {
            return Err(DealbreakerError::NoRedFlags);
        }

        let ticket = DraftTicket {
            token: self.issue_token(),
            mode: DraftMode::Bulk,
            request: DraftRequest::Bulk(NegotiateAllRequest {
                red_flags: session.red_flags.iter().map(|f| f.to_payload()).collect(),
            }),
        };
        self.activate(&ticket);
        Ok(ticket)
    }

    /// Deactivates whichever mode is active.
    ///
    /// Does not abort a pending network call; its eventual completion will
    /// carry a token that no longer matches and be discarded.
    pub fn close_draft(&mut self) {
        self.active = None;
    }

    /// Delivers the outcome of an issued request.
    ///
    /// Returns `true` when the completion belonged to the currently active
    /// request and its text (or error placeholder) was stored; `false` when
    /// it was stale and discarded.
    pub fn complete(&mut self, token: u64, outcome: anyhow::Result<String>) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.token != token {
            return false;
        }

        active.text = Some(outcome.unwrap_or_else(|_| match active.mode {
            DraftMode::Single { .. } => SINGLE_DRAFT_ERROR_TEXT.to_string(),
            DraftMode::Bulk => BULK_DRAFT_ERROR_TEXT.to_string(),
        }));
        true
    }

    /// The mode of the active request, if any.
    pub fn active_mode(&self) -> Option<DraftMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    /// The visible draft text, once the active request has resolved.
    pub fn visible_draft(&self) -> Option<&str> {
        self.active.as_ref().and_then(|a| a.text.as_deref())
    }

    /// True while a request is active but its draft has not resolved yet.
    pub fn is_pending(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.text.is_none())
    }

    fn issue_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    fn activate(&mut self, ticket: &DraftTicket) {
        self.active = Some(ActiveDraft {
            mode: ticket.mode,
            token: ticket.token,
            text: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalysisPayload, AnalyzeResponse, RedFlagPayload};
    use crate::analysis::SourceKind;

    fn session(flag_count: usize) -> AnalysisSession {
        let flags = (0..flag_count)
            .map(|i| RedFlagPayload {
                severity: "High".to_string(),
                risk: format!("risk {i}"),
                clause: format!("clause {i}"),
                page: None,
            })
            .collect();
        AnalysisSession::from_response(
            AnalyzeResponse {
                filename: Some("lease.pdf".to_string()),
                analysis: Some(AnalysisPayload {
                    safety_score: Some(40),
                    summary: Some("risky".to_string()),
                    red_flags: Some(flags),
                }),
            },
            SourceKind::Pdf,
        )
        .unwrap()
    }

    #[test]
    fn test_single_draft_lifecycle() {
        let session = session(2);
        let mut coordinator = NegotiationCoordinator::new();

        let ticket = coordinator.request_single(&session, 1).unwrap();
        assert_eq!(ticket.mode, DraftMode::Single { index: 1 });
        assert!(coordinator.is_pending());
        assert_eq!(coordinator.visible_draft(), None);

        assert!(coordinator.complete(ticket.token, Ok("Dear landlord,".to_string())));
        assert_eq!(coordinator.visible_draft(), Some("Dear landlord,"));
        assert!(!coordinator.is_pending());
    }

    #[test]
    fn test_single_request_carries_flag_fields() {
        let session = session(2);
        let mut coordinator = NegotiationCoordinator::new();

        let ticket = coordinator.request_single(&session, 0).unwrap();
        match ticket.request {
            DraftRequest::Single(req) => {
                assert_eq!(req.clause, "clause 0");
                assert_eq!(req.risk, "risk 0");
            }
            DraftRequest::Bulk(_) => panic!("expected a single request"),
        }
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let session = session(1);
        let mut coordinator = NegotiationCoordinator::new();
        coordinator.request_single(&session, 0).unwrap();

        assert!(coordinator.request_single(&session, 7).is_err());
        // The earlier request is still the active one.
        assert_eq!(coordinator.active_mode(), Some(DraftMode::Single { index: 0 }));
    }

    #[test]
    fn test_bulk_requires_flags() {
        let empty = session(0);
        let mut coordinator = NegotiationCoordinator::new();
        assert!(matches!(
            coordinator.request_bulk(&empty),
            Err(DealbreakerError::NoRedFlags)
        ));
    }

    #[test]
    fn test_stale_single_response_does_not_overwrite_bulk() {
        let session = session(3);
        let mut coordinator = NegotiationCoordinator::new();

        let single = coordinator.request_single(&session, 0).unwrap();
        let bulk = coordinator.request_bulk(&session).unwrap();

        // The single response arrives after the user switched to bulk.
        assert!(!coordinator.complete(single.token, Ok("stale single".to_string())));
        assert_eq!(coordinator.active_mode(), Some(DraftMode::Bulk));
        assert_eq!(coordinator.visible_draft(), None);
        assert!(coordinator.is_pending());

        assert!(coordinator.complete(bulk.token, Ok("master email".to_string())));
        assert_eq!(coordinator.visible_draft(), Some("master email"));
    }

    #[test]
    fn test_switching_modes_clears_visible_draft_immediately() {
        let session = session(2);
        let mut coordinator = NegotiationCoordinator::new();

        let single = coordinator.request_single(&session, 0).unwrap();
        coordinator.complete(single.token, Ok("first draft".to_string()));
        assert!(coordinator.visible_draft().is_some());

        coordinator.request_bulk(&session).unwrap();
        assert_eq!(coordinator.visible_draft(), None);
    }

    #[test]
    fn test_close_discards_late_completion() {
        let session = session(1);
        let mut coordinator = NegotiationCoordinator::new();

        let ticket = coordinator.request_single(&session, 0).unwrap();
        coordinator.close_draft();

        assert!(!coordinator.complete(ticket.token, Ok("late".to_string())));
        assert_eq!(coordinator.active_mode(), None);
        assert_eq!(coordinator.visible_draft(), None);
    }

    #[test]
    fn test_error_placeholders_by_mode() {
        let session = session(1);
        let mut coordinator = NegotiationCoordinator::new();

        let single = coordinator.request_single(&session, 0).unwrap();
        coordinator.complete(single.token, Err(anyhow::anyhow!("backend down")));
        assert_eq!(coordinator.visible_draft(), Some(SINGLE_DRAFT_ERROR_TEXT));

        let bulk = coordinator.request_bulk(&session).unwrap();
        coordinator.complete(bulk.token, Err(anyhow::anyhow!("backend down")));
        assert_eq!(coordinator.visible_draft(), Some(BULK_DRAFT_ERROR_TEXT));
    }
}
