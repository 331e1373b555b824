//! HTTP transport seam between the client and the FlareSolverr endpoint.
//!
//! Provides a thin adapter around `reqwest::Client` behind a trait so the
//! higher layers can be exercised against stub transports in tests.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use url::Url;

/// Failure completing the HTTP exchange with the service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, transport-level timeout, or unreadable response
    /// framing.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Minimal HTTP surface the client needs: one JSON POST, raw bytes back.
///
/// Implementations must not interpret the HTTP status line — the service
/// answers 200 with a JSON body even for logical failures, which the caller
/// decodes from the body itself.
#[async_trait]
pub trait SolverTransport: Send + Sync {
    async fn post_json(&self, endpoint: &Url, body: Vec<u8>) -> Result<Bytes, TransportError>;
}

/// Reqwest-backed transport used by default.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| TransportError::Transport(err.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client, e.g. one configured with a proxy or
    /// transport-level timeouts.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SolverTransport for ReqwestTransport {
    async fn post_json(&self, endpoint: &Url, body: Vec<u8>) -> Result<Bytes, TransportError> {
        log::debug!("posting solver command to {endpoint}");

        let response = self
            .client
            .post(endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| TransportError::Transport(err.to_string()))?;

        response
            .bytes()
            .await
            .map_err(|err| TransportError::Transport(err.to_string()))
    }
}
