//! Sandbox API authentication
//!
//! Auth is a lookup, not a hierarchy: a strategy kind plus its
//! configuration map produce the headers to attach to the request.
//! IAM-signed requests are the exception and go through an external
//! [`RequestSigner`] instead of a fixed header set.

use super::http::RequestDescriptor;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header carrying an API key credential
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Supported authentication strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    /// AWS IAM request signing, delegated to a [`RequestSigner`]
    #[default]
    #[value(name = "aws_iam")]
    AwsIam,
    #[value(name = "api_key")]
    ApiKey,
    #[value(name = "oauth2")]
    Oauth2,
    #[value(name = "basic")]
    Basic,
}

/// Build the auth headers for `kind` from its configuration map.
///
/// Strategies with missing credentials emit no header rather than erroring;
/// whether an unauthenticated request is acceptable is for the remote API
/// to decide.
pub fn auth_headers(kind: AuthKind, config: &HashMap<String, String>) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    match kind {
        AuthKind::ApiKey => {
            if let Some(api_key) = config.get("api_key") {
                headers.insert(API_KEY_HEADER.to_string(), api_key.clone());
            }
        }
        AuthKind::Basic => {
            if let (Some(username), Some(password)) =
                (config.get("username"), config.get("password"))
            {
                let credentials = BASE64.encode(format!("{}:{}", username, password));
                headers.insert(
                    "Authorization".to_string(),
                    format!("Basic {}", credentials),
                );
            }
        }
        AuthKind::Oauth2 => {
            if let Some(token) = config.get("token") {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
        }
        // IAM signatures cover the whole request, not a fixed header set
        AuthKind::AwsIam => {}
    }

    headers
}

/// Request-signing collaborator for [`AuthKind::AwsIam`].
///
/// The client applies the signer to the finished descriptor right before
/// the executor runs. Without one installed, IAM requests go out unsigned
/// and the deployment is expected to sign them out-of-band.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, descriptor: &mut RequestDescriptor) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_api_key_header() {
        let headers = auth_headers(AuthKind::ApiKey, &config(&[("api_key", "k1")]));
        assert_eq!(headers.get(API_KEY_HEADER).map(String::as_str), Some("k1"));
        assert!(!headers.contains_key("Authorization"));
    }

    #[test]
    fn test_basic_encodes_credentials() {
        let headers = auth_headers(
            AuthKind::Basic,
            &config(&[("username", "u"), ("password", "p")]),
        );
        // base64("u:p")
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Basic dTpw")
        );
    }

    #[test]
    fn test_basic_requires_both_credentials() {
        let headers = auth_headers(AuthKind::Basic, &config(&[("username", "u")]));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_oauth2_bearer_token() {
        let headers = auth_headers(AuthKind::Oauth2, &config(&[("token", "t0k")]));
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Bearer t0k")
        );
    }

    #[test]
    fn test_missing_credentials_are_tolerated() {
        let empty = HashMap::new();
        assert!(auth_headers(AuthKind::ApiKey, &empty).is_empty());
        assert!(auth_headers(AuthKind::Oauth2, &empty).is_empty());
        assert!(auth_headers(AuthKind::Basic, &empty).is_empty());
    }

    #[test]
    fn test_aws_iam_emits_no_headers() {
        let headers = auth_headers(AuthKind::AwsIam, &config(&[("api_key", "ignored")]));
        assert!(headers.is_empty());
    }
}
