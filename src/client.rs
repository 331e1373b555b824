//! High level FlareSolverr API client.
//!
//! Builds the JSON command payload from caller parameters and client-level
//! defaults, hands it to the transport, and decodes the response envelope.
//! Each call is a single request/response exchange; the client keeps no
//! per-call state and is safe to share across tasks.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use url::Url;

use crate::protocol::{Command, Cookies, RequestPayload, SolverResponse, Status};
use crate::transport::{ReqwestTransport, SolverTransport, TransportError};

const DEFAULT_BASE_URL: &str = "http://localhost:8191/v1";

/// Result alias used across the client layer.
pub type SolverResult<T> = Result<T, FlareSolverrError>;

/// Error surfaced by the client.
#[derive(Debug, Error)]
pub enum FlareSolverrError {
    /// Malformed base URL supplied at construction.
    #[error("invalid base url: {0}")]
    Config(#[from] url::ParseError),
    /// The HTTP exchange with the service could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The service answered with bytes that do not decode as a response
    /// envelope.
    #[error("malformed solver response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The service reported a logical failure solving the challenge; carries
    /// the service message verbatim.
    #[error("solver reported failure: {0}")]
    Solver(String),
}

/// Client configuration used by the builder.
#[derive(Debug, Clone)]
pub struct FlareSolverrConfig {
    /// Endpoint of the FlareSolverr service. An empty string selects the
    /// default local endpoint.
    pub base_url: String,
    /// Client-wide budget in milliseconds for solving a challenge; 0 means
    /// no timeout is communicated to the service.
    pub timeout_ms: u64,
}

impl Default for FlareSolverrConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 0,
        }
    }
}

/// Fluent builder for [`FlareSolverr`].
pub struct FlareSolverrBuilder {
    config: FlareSolverrConfig,
    transport: Option<Arc<dyn SolverTransport>>,
}

impl FlareSolverrBuilder {
    pub fn new() -> Self {
        Self {
            config: FlareSolverrConfig::default(),
            transport: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    /// Replace the default reqwest transport, e.g. with a stub in tests or a
    /// client configured with proxies.
    pub fn with_transport(mut self, transport: Arc<dyn SolverTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> SolverResult<FlareSolverr> {
        FlareSolverr::with_config(self.config, self.transport)
    }
}

impl Default for FlareSolverrBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for [`FlareSolverr::get`] and [`FlareSolverr::get_raw`].
#[derive(Debug, Clone, Default)]
pub struct GetParams {
    pub url: String,
    /// Per-call solve budget in milliseconds. Overrides the client-wide
    /// timeout when > 0.
    pub max_timeout_ms: u64,
    /// Cookies seeded into the remote browser session.
    pub cookies: Cookies,
    /// Request only the session cookies, skipping the page body.
    pub return_only_cookies: bool,
}

/// Parameters for [`FlareSolverr::post`] and [`FlareSolverr::post_raw`].
#[derive(Debug, Clone, Default)]
pub struct PostParams {
    pub url: String,
    /// Form fields submitted by the remote browser as an URL-encoded body.
    /// A key may appear more than once.
    pub form: Vec<(String, String)>,
    /// Per-call solve budget in milliseconds. Overrides the client-wide
    /// timeout when > 0.
    pub max_timeout_ms: u64,
    pub cookies: Cookies,
    pub return_only_cookies: bool,
}

/// Client for a FlareSolverr-compatible solver service.
pub struct FlareSolverr {
    endpoint: Url,
    timeout_ms: u64,
    transport: Arc<dyn SolverTransport>,
}

impl std::fmt::Debug for FlareSolverr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlareSolverr")
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl FlareSolverr {
    /// Construct a client against the default local endpoint.
    pub fn new() -> SolverResult<Self> {
        Self::with_config(FlareSolverrConfig::default(), None)
    }

    /// Obtain a builder to customise the client.
    pub fn builder() -> FlareSolverrBuilder {
        FlareSolverrBuilder::new()
    }

    fn with_config(
        config: FlareSolverrConfig,
        transport: Option<Arc<dyn SolverTransport>>,
    ) -> SolverResult<Self> {
        let endpoint = if config.base_url.is_empty() {
            Url::parse(DEFAULT_BASE_URL)?
        } else {
            Url::parse(&config.base_url)?
        };

        let transport = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(Self {
            endpoint,
            timeout_ms: config.timeout_ms,
            transport,
        })
    }

    /// Fetch `url` through the remote browser with a GET and return the
    /// solved page payload.
    ///
    /// Fails with [`FlareSolverrError::Solver`] when the service reports a
    /// logical failure.
    pub async fn get(&self, params: GetParams) -> SolverResult<Bytes> {
        let envelope = self.get_raw(params).await?;
        if envelope.status != Status::Ok {
            return Err(FlareSolverrError::Solver(envelope.message));
        }

        Ok(envelope.solution.response_bytes())
    }

    /// Fetch `url` through the remote browser with a GET and return the full
    /// response envelope, regardless of its status field.
    pub async fn get_raw(&self, params: GetParams) -> SolverResult<SolverResponse> {
        let payload = RequestPayload {
            cmd: Command::Get,
            url: params.url,
            post_data: None,
            max_timeout: self.resolve_timeout(params.max_timeout_ms),
            cookies: params.cookies,
            return_only_cookies: params.return_only_cookies,
        };

        self.dispatch(&payload).await
    }

    /// Submit a form through the remote browser with a POST and return the
    /// solved page payload.
    ///
    /// Unlike [`FlareSolverr::get`], the envelope status is not inspected: a
    /// logical solver failure yields the (possibly empty) payload of the
    /// error envelope instead of an error. Callers that need the status
    /// should use [`FlareSolverr::post_raw`].
    pub async fn post(&self, params: PostParams) -> SolverResult<Bytes> {
        let envelope = self.post_raw(params).await?;
        Ok(envelope.solution.response_bytes())
    }

    /// Submit a form through the remote browser with a POST and return the
    /// full response envelope, regardless of its status field.
    pub async fn post_raw(&self, params: PostParams) -> SolverResult<SolverResponse> {
        // An empty form leaves postData out of the payload entirely.
        let post_data = (!params.form.is_empty()).then(|| encode_form(&params.form));
        let payload = RequestPayload {
            cmd: Command::Post,
            url: params.url,
            post_data,
            max_timeout: self.resolve_timeout(params.max_timeout_ms),
            cookies: params.cookies,
            return_only_cookies: params.return_only_cookies,
        };

        self.dispatch(&payload).await
    }

    /// Per-call timeout wins over the client-wide default; 0 means unset and
    /// the field is left out of the payload.
    fn resolve_timeout(&self, per_call_ms: u64) -> Option<u64> {
        if per_call_ms > 0 {
            Some(per_call_ms)
        } else if self.timeout_ms > 0 {
            Some(self.timeout_ms)
        } else {
            None
        }
    }

    async fn dispatch(&self, payload: &RequestPayload) -> SolverResult<SolverResponse> {
        let body = serde_json::to_vec(payload)?;
        let raw = self.transport.post_json(&self.endpoint, body).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

/// Encode form fields as an `application/x-www-form-urlencoded` string.
/// Keys are sorted for a deterministic body; repeated keys keep their
/// original value order.
fn encode_form(form: &[(String, String)]) -> String {
    let mut fields: Vec<_> = form.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}
