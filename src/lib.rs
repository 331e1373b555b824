//! # flaresolverr-rs
//!
//! Async client for [FlareSolverr](https://github.com/FlareSolverr/FlareSolverr),
//! the proxy server that drives a real browser to pass anti-bot challenges
//! (JavaScript checks, CAPTCHA-style interstitials) and hands back the solved
//! page together with the session cookies.
//!
//! The crate builds the JSON command payload, posts it to the service
//! endpoint, and decodes the response envelope. The service does the slow
//! work; each call here is a single blocking request/response exchange with
//! no retries, caching, or shared state between calls.
//!
//! ## Example
//!
//! ```no_run
//! use flaresolverr_rs::{FlareSolverr, GetParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FlareSolverr::builder().timeout_ms(60_000).build()?;
//!     let body = client
//!         .get(GetParams {
//!             url: "https://example.com".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("solved page: {} bytes", body.len());
//!     Ok(())
//! }
//! ```

mod client;

pub mod protocol;
pub mod transport;

pub use crate::client::{
    FlareSolverr, FlareSolverrBuilder, FlareSolverrConfig, FlareSolverrError, GetParams,
    PostParams, SolverResult,
};

pub use crate::protocol::{
    Command, Cookie, Cookies, RequestPayload, SameSite, Solution, SolverResponse, Status,
};

pub use crate::transport::{ReqwestTransport, SolverTransport, TransportError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
