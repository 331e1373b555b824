//! Wire protocol types for the FlareSolverr v1 API.
//!
//! A request is a single JSON command posted to the service endpoint; the
//! response is an envelope carrying a status flag, a message, and the solved
//! page inside a `solution` object. Logical failure travels in the envelope
//! status field, never in the HTTP status line.

pub mod cookies;

pub use cookies::{Cookie, Cookies, SameSite};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command tag selecting how the remote browser fetches the target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    #[serde(rename = "request.get")]
    Get,
    #[serde(rename = "request.post")]
    Post,
}

/// Logical outcome reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// JSON command payload posted to the service endpoint.
///
/// Serialization is sparse: optional fields and empty collections are left
/// out entirely, matching the shape the service expects.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPayload {
    pub cmd: Command,
    pub url: String,
    /// URL-encoded form body; only present for [`Command::Post`].
    #[serde(rename = "postData", skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
    /// Budget in milliseconds for solving the challenge.
    #[serde(rename = "maxTimeout", skip_serializing_if = "Option::is_none")]
    pub max_timeout: Option<u64>,
    /// Cookies seeded into the remote browser session.
    #[serde(skip_serializing_if = "Cookies::is_empty")]
    pub cookies: Cookies,
    /// Ask the service for session cookies only, skipping the page body.
    #[serde(rename = "returnOnlyCookies", skip_serializing_if = "is_false")]
    pub return_only_cookies: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Solved page returned inside the response envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Solution {
    /// Final URL after redirects and challenge handling.
    #[serde(default)]
    pub url: String,
    /// HTTP status returned by the target origin.
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub cookies: Cookies,
    #[serde(default, rename = "userAgent")]
    pub user_agent: String,
    /// Opaque page payload. Usually the HTML body as a JSON string, but the
    /// service may return arbitrary content, so it is kept untyped.
    #[serde(default)]
    pub response: Value,
}

impl Solution {
    /// Raw payload bytes. String payloads are returned verbatim, null is
    /// empty, and any other JSON shape is re-serialized.
    pub fn response_bytes(&self) -> Bytes {
        match &self.response {
            Value::String(body) => Bytes::copy_from_slice(body.as_bytes()),
            Value::Null => Bytes::new(),
            other => Bytes::from(other.to_string()),
        }
    }
}

/// Full response envelope from the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolverResponse {
    pub status: Status,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub solution: Solution,
    /// Epoch milliseconds when the service started handling the command.
    #[serde(default, rename = "startTimestamp")]
    pub start_timestamp: i64,
    /// Epoch milliseconds when the service finished.
    #[serde(default, rename = "endTimestamp")]
    pub end_timestamp: i64,
    /// Version reported by the service.
    #[serde(default)]
    pub version: String,
}
