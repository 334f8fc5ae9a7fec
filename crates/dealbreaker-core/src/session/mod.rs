//! Session controller module.
//!
//! The top-level state machine of the client: it owns the current analysis
//! session (or none) and routes every UI intent to the chat, negotiation,
//! and view-sync components it composes.

mod controller;

pub use controller::SessionController;
