//! Sandbox API client
//!
//! Combines base-URL handling, static headers, authentication, and the
//! HTTP executor into the single object the dispatcher talks to.

use super::auth::{self, RequestSigner};
use super::http::{HttpExecutor, RawResponse, RequestDescriptor};
use crate::params::Params;
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Fixed User-Agent attached to every request
pub const USER_AGENT: &str = concat!("sandboxctl/", env!("CARGO_PKG_VERSION"));

/// Configured client for one invocation
pub struct SandboxClient {
    base_url: String,
    api_version: String,
    headers: HashMap<String, String>,
    signer: Option<Box<dyn RequestSigner>>,
    executor: HttpExecutor,
}

impl SandboxClient {
    /// Create a client from invocation parameters
    pub fn new(params: &Params) -> Result<Self> {
        let url = Url::parse(&params.api_url).context("Invalid api_url")?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api_url must use http or https, got '{}'", url.scheme());
        }

        let mut headers = base_headers();
        headers.extend(auth::auth_headers(params.auth_type, &params.auth_config));

        let executor =
            HttpExecutor::new(Duration::from_secs(params.timeout), params.validate_certs)?;

        Ok(Self {
            base_url: params.api_url.trim_end_matches('/').to_string(),
            api_version: params.api_version.clone(),
            headers,
            signer: None,
            executor,
        })
    }

    /// Install a request signer for IAM-authenticated deployments
    pub fn with_signer(mut self, signer: Box<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Base plus auth headers for outgoing requests
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Send a request through the signer (if any) and the executor
    pub async fn send(&self, mut descriptor: RequestDescriptor) -> Result<RawResponse> {
        if let Some(signer) = &self.signer {
            signer.sign(&mut descriptor).context("Failed to sign request")?;
        }
        self.executor.execute(&descriptor).await
    }
}

/// Headers common to every request, before auth is applied
fn base_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::auth::{AuthKind, API_KEY_HEADER};

    #[test]
    fn test_trailing_slash_is_stripped() {
        let params = Params::new("list_accounts", "https://sandbox.example.com/");
        let client = SandboxClient::new(&params).unwrap();
        assert_eq!(client.base_url(), "https://sandbox.example.com");
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let params = Params::new("list_accounts", "not a url");
        assert!(SandboxClient::new(&params).is_err());

        let params = Params::new("list_accounts", "ftp://sandbox.example.com");
        assert!(SandboxClient::new(&params).is_err());
    }

    #[test]
    fn test_base_headers_present() {
        let params = Params::new("list_accounts", "https://sandbox.example.com");
        let client = SandboxClient::new(&params).unwrap();
        let headers = client.headers();

        assert_eq!(
            headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(headers.get("User-Agent").map(String::as_str), Some(USER_AGENT));
    }

    #[test]
    fn test_auth_headers_are_merged() {
        let mut params = Params::new("list_accounts", "https://sandbox.example.com");
        params.auth_type = AuthKind::ApiKey;
        params
            .auth_config
            .insert("api_key".to_string(), "k1".to_string());

        let client = SandboxClient::new(&params).unwrap();
        assert_eq!(
            client.headers().get(API_KEY_HEADER).map(String::as_str),
            Some("k1")
        );
    }
}
