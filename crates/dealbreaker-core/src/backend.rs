//! Contract backend port.
//!
//! Defines the interface to the remote analysis service. The orchestrator
//! only consumes request/response contracts; transport, auth, and inference
//! live behind this trait.

use crate::api::{
    AnalyzeResponse, ChatRequest, ChatResponse, NegotiateAllRequest, NegotiateRequest,
    NegotiateResponse,
};
use anyhow::Result;
use async_trait::async_trait;

/// An abstract client for the contract-analysis backend.
///
/// Implementations are expected to be cheap to share (`Arc<dyn
/// ContractBackend>`) and to surface any non-success transport outcome as an
/// `Err`; the orchestrator converts those into inline placeholder text and
/// never crashes on them.
#[async_trait]
pub trait ContractBackend: Send + Sync {
    /// Submits a PDF for analysis.
    ///
    /// # Arguments
    ///
    /// * `filename` - Original file name, echoed back by the backend
    /// * `bytes` - Raw PDF content
    async fn analyze_file(&self, filename: &str, bytes: Vec<u8>) -> Result<AnalyzeResponse>;

    /// Submits a web page URL for analysis.
    async fn analyze_url(&self, url: &str) -> Result<AnalyzeResponse>;

    /// Asks a free-form question about the analyzed document.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Drafts a negotiation email for a single clause.
    async fn negotiate(&self, request: &NegotiateRequest) -> Result<NegotiateResponse>;

    /// Drafts a master negotiation email covering every red flag.
    async fn negotiate_all(&self, request: &NegotiateAllRequest) -> Result<NegotiateResponse>;
}
