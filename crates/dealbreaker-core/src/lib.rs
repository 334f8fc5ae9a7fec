//! Deal Breaker client core.
//!
//! The domain layer of the client-side session orchestrator: the analysis
//! session model, the chat transcript, the negotiation-draft coordinator,
//! the view-sync projection, the bounded scan history, and the top-level
//! session controller that composes them. The heavy lifting (PDF parsing,
//! model inference) happens in the remote analysis service behind the
//! [`backend::ContractBackend`] port; persistence sits behind
//! [`history::HistoryRepository`].

pub mod analysis;
pub mod api;
pub mod backend;
pub mod chat;
pub mod error;
pub mod history;
pub mod negotiation;
pub mod session;
pub mod view;

// Re-export common error type
pub use error::DealbreakerError;
