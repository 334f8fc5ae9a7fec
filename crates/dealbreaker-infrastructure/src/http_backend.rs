//! HTTP implementation of the contract backend port.
//!
//! Talks to the Deal Breaker analysis service over REST. Only the
//! request/response contracts live here; prompt construction, model
//! selection, and scoring all happen server-side.

use crate::config::ClientConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use dealbreaker_core::api::{
    AnalyzeResponse, AnalyzeUrlRequest, ChatRequest, ChatResponse, NegotiateAllRequest,
    NegotiateRequest, NegotiateResponse,
};
use dealbreaker_core::backend::ContractBackend;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// REST client for the analysis backend.
#[derive(Clone)]
pub struct HttpContractBackend {
    client: Client,
    base_url: String,
}

impl HttpContractBackend {
    /// Creates a client against `base_url` (no trailing slash) with the
    /// given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to /{path} failed"))?;

        Self::into_json(path, response).await
    }

    async fn into_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend /{path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode /{path} response"))
    }
}

#[async_trait]
impl ContractBackend for HttpContractBackend {
    async fn analyze_file(&self, filename: &str, bytes: Vec<u8>) -> Result<AnalyzeResponse> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .context("Failed to build multipart file part")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("analyze"))
            .multipart(form)
            .send()
            .await
            .context("Request to /analyze failed")?;

        Self::into_json("analyze", response).await
    }

    async fn analyze_url(&self, url: &str) -> Result<AnalyzeResponse> {
        self.post_json(
            "analyze-url",
            &AnalyzeUrlRequest {
                url: url.to_string(),
            },
        )
        .await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post_json("chat", request).await
    }

    async fn negotiate(&self, request: &NegotiateRequest) -> Result<NegotiateResponse> {
        self.post_json("negotiate", request).await
    }

    async fn negotiate_all(&self, request: &NegotiateAllRequest) -> Result<NegotiateResponse> {
        self.post_json("negotiate-all", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let backend =
            HttpContractBackend::new("http://127.0.0.1:8000/api/v1/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(backend.endpoint("chat"), "http://127.0.0.1:8000/api/v1/chat");
    }
}
