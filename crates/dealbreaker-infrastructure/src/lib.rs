//! Infrastructure adapters for the Deal Breaker client.
//!
//! Implements the core ports against concrete media: the analysis backend
//! over HTTP and the scan history as a JSON file, plus path resolution and
//! client configuration.

pub mod config;
pub mod http_backend;
pub mod json_history_repository;
pub mod paths;

pub use config::ClientConfig;
pub use http_backend::HttpContractBackend;
pub use json_history_repository::JsonHistoryRepository;
pub use paths::DealbreakerPaths;
