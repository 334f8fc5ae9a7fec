//! Chat domain module.
//!
//! Maintains the conversational transcript scoped to the analyzed document
//! and turns it into a correctly shaped context payload for each new turn.

mod message;
mod session;

pub use message::{ChatMessage, ChatRole};
pub use session::{ChatSession, PendingQuestion, CONNECTION_ERROR_TEXT};
