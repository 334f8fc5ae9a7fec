//! Application layer of the Deal Breaker client.
//!
//! Hosts the use case that drives the core session state machine across
//! await points: it issues backend calls through the ports, delivers their
//! completions back under the token discipline, and applies the
//! best-effort policies (history, inline error text) the UI relies on.

pub mod analysis_usecase;

pub use analysis_usecase::AnalysisUseCase;
