//! Chat transcript management.
//!
//! The transcript is append-only during a session and starts with a
//! synthetic assistant greeting that is shown to the user but never sent to
//! the backend as history.
//!
//! Questions are tagged with a monotonically increasing turn id. The answer
//! for a turn is inserted directly after its own question, so two questions
//! in flight at once can never desynchronize question/answer pairing in the
//! visible transcript even when the backend answers out of order.

use super::message::{ChatMessage, ChatRole};
use crate::api::{ChatHistoryMessage, ChatRequest};

/// Fixed assistant reply shown when a chat request fails.
pub const CONNECTION_ERROR_TEXT: &str = "Connection error. Is backend running?";

/// A question that has been appended to the transcript and is awaiting its
/// answer from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    /// Turn id; hand it back to [`ChatSession::complete_question`].
    pub turn: u64,
    /// The ready-to-send chat request for this turn.
    pub request: ChatRequest,
}

#[derive(Debug, Clone)]
struct TranscriptEntry {
    message: ChatMessage,
    /// Turn this entry belongs to. `None` for the greeting.
    turn: Option<u64>,
}

/// Ordered transcript plus context-payload construction for one session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    filename: String,
    entries: Vec<TranscriptEntry>,
    next_turn: u64,
}

impl ChatSession {
    /// Creates a transcript holding only the synthetic greeting for
    /// `filename`.
    pub fn new(filename: impl Into<String>) -> Self {
        Self::with_first_turn(filename, 0)
    }

    /// Creates a transcript whose turn ids start at `first_turn`.
    ///
    /// The session controller seeds this from a counter that survives
    /// resets, so a turn id can never be reused across session replacements
    /// and a stale completion can never attach to a newer session.
    pub fn with_first_turn(filename: impl Into<String>, first_turn: u64) -> Self {
        let filename = filename.into();
        let greeting = ChatMessage::assistant(format!(
            "Hi! I've analyzed {filename}. Ask me anything about it."
        ));
        Self {
            filename,
            entries: vec![TranscriptEntry {
                message: greeting,
                turn: None,
            }],
            next_turn: first_turn,
        }
    }

    /// The next turn id this transcript would issue.
    pub fn next_turn(&self) -> u64 {
        self.next_turn
    }

    /// The file name this transcript is scoped to.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The visible transcript, greeting included, in display order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    /// Appends a user question and returns the request to send.
    ///
    /// Returns `None` without any transcript mutation when `question` is
    /// empty after trimming. The context payload excludes the greeting and
    /// includes the just-appended question; the pending answer obviously is
    /// not part of it yet.
    pub fn begin_question(&mut self, question: &str) -> Option<PendingQuestion> {
        if question.trim().is_empty() {
            return None;
        }

        let turn = self.next_turn;
        self.next_turn += 1;

        self.entries.push(TranscriptEntry {
            message: ChatMessage::user(question),
            turn: Some(turn),
        });

        let history = self
            .entries
            .iter()
            .skip(1) // greeting is never sent as history
            .map(|e| ChatHistoryMessage {
                role: e.message.role.as_wire_str().to_string(),
                content: e.message.text.clone(),
            })
            .collect();

        Some(PendingQuestion {
            turn,
            request: ChatRequest {
                filename: self.filename.clone(),
                question: question.to_string(),
                history,
            },
        })
    }

    /// Delivers the outcome of a turn's chat request.
    ///
    /// A successful outcome inserts the answer directly after the turn's
    /// question; a failure inserts [`CONNECTION_ERROR_TEXT`] instead. A
    /// completion for an unknown turn (for example one issued before the
    /// session was replaced) is discarded silently.
    pub fn complete_question(&mut self, turn: u64, outcome: anyhow::Result<String>) {
        let question_pos = self
            .entries
            .iter()
            .position(|e| e.turn == Some(turn) && e.message.role == ChatRole::User);
        let Some(pos) = question_pos else {
            return;
        };

        let text = outcome.unwrap_or_else(|_| CONNECTION_ERROR_TEXT.to_string());
        self.entries.insert(
            pos + 1,
            TranscriptEntry {
                message: ChatMessage::assistant(text),
                turn: Some(turn),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(session: &ChatSession) -> Vec<String> {
        session.transcript().into_iter().map(|m| m.text).collect()
    }

    #[test]
    fn test_new_holds_only_greeting() {
        let session = ChatSession::new("lease.pdf");
        let transcript = session.transcript();

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, ChatRole::Assistant);
        assert!(transcript[0].text.contains("lease.pdf"));
    }

    #[test]
    fn test_blank_question_is_a_noop() {
        let mut session = ChatSession::new("lease.pdf");

        assert!(session.begin_question("").is_none());
        assert!(session.begin_question("   ").is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_payload_excludes_greeting_includes_question() {
        let mut session = ChatSession::new("lease.pdf");
        let pending = session.begin_question("What is clause 4?").unwrap();

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].role, ChatRole::User);

        assert_eq!(pending.request.filename, "lease.pdf");
        assert_eq!(pending.request.question, "What is clause 4?");
        assert_eq!(pending.request.history.len(), 1);
        assert_eq!(pending.request.history[0].role, "user");
        assert_eq!(pending.request.history[0].content, "What is clause 4?");
    }

    #[test]
    fn test_answer_appends_after_question() {
        let mut session = ChatSession::new("lease.pdf");
        let pending = session.begin_question("Q1").unwrap();
        session.complete_question(pending.turn, Ok("A1".to_string()));

        assert_eq!(texts(&session)[1..], ["Q1", "A1"]);
    }

    #[test]
    fn test_failure_appends_connection_error() {
        let mut session = ChatSession::new("lease.pdf");
        let pending = session.begin_question("Q1").unwrap();
        session.complete_question(pending.turn, Err(anyhow::anyhow!("boom")));

        assert_eq!(texts(&session)[2], CONNECTION_ERROR_TEXT);
    }

    #[test]
    fn test_out_of_order_completions_stay_paired() {
        let mut session = ChatSession::new("lease.pdf");
        let first = session.begin_question("Q1").unwrap();
        let second = session.begin_question("Q2").unwrap();

        // The second answer arrives before the first.
        session.complete_question(second.turn, Ok("A2".to_string()));
        session.complete_question(first.turn, Ok("A1".to_string()));

        assert_eq!(texts(&session)[1..], ["Q1", "A1", "Q2", "A2"]);
    }

    #[test]
    fn test_second_payload_carries_full_history() {
        let mut session = ChatSession::new("lease.pdf");
        let first = session.begin_question("Q1").unwrap();
        session.complete_question(first.turn, Ok("A1".to_string()));
        let second = session.begin_question("Q2").unwrap();

        let roles: Vec<&str> = second
            .request
            .history
            .iter()
            .map(|m| m.role.as_str())
            .collect();
        assert_eq!(roles, ["user", "assistant", "user"]);
    }

    #[test]
    fn test_unknown_turn_is_discarded() {
        let mut session = ChatSession::new("lease.pdf");
        session.complete_question(99, Ok("ghost".to_string()));
        assert_eq!(session.transcript().len(), 1);
    }
}
