//! HTTP transport for Sandbox API calls
//!
//! Defines the request/response contract between the dispatcher and the
//! executor, the reqwest-backed executor itself, and the response
//! normalization rules.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Status codes the API reports as success
pub const SUCCESS_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// HTTP verb of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

/// Transport-agnostic description of one outgoing API call
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Verb,
    /// Full URL, query string included
    pub url: String,
    pub headers: HashMap<String, String>,
    /// JSON payload; `None` means no body is sent
    pub body: Option<Value>,
}

/// Raw result of one API call, before normalization
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP executor performing the network call described by a descriptor
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Create an executor with the given timeout and certificate policy
    pub fn new(timeout: Duration, validate_certs: bool) -> Result<Self> {
        let mut builder = Client::builder().timeout(timeout);
        if !validate_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Perform the call described by `descriptor`.
    ///
    /// Non-2xx statuses are not an error here; classification happens in
    /// the dispatcher. Only transport problems (connect, TLS, timeout,
    /// body read) surface as `Err`.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<RawResponse> {
        tracing::debug!("{} {}", descriptor.method.as_str(), descriptor.url);

        let mut request = self
            .client
            .request(descriptor.method.as_method(), &descriptor.url);

        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &descriptor.body {
            let payload =
                serde_json::to_string(body).context("Failed to serialize request body")?;
            request = request.body(payload);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !is_success(status) {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        Ok(RawResponse { status, body })
    }
}

/// Check whether a status code counts as success
pub fn is_success(status: u16) -> bool {
    SUCCESS_STATUSES.contains(&status)
}

/// Parse a response body into a JSON value.
///
/// Empty bodies become an empty object. Non-JSON bodies are preserved
/// under a `raw_response` key instead of being discarded.
pub fn parse_body(body: &str) -> Value {
    if body.is_empty() {
        return json!({});
    }

    serde_json::from_str(body).unwrap_or_else(|_| json!({ "raw_response": body }))
}
