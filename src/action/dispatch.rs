//! Dispatcher
//!
//! Runs one action end to end: registry lookup, identifier validation,
//! request building, the HTTP call, and normalization of the response into
//! the Outcome record handed back to the front-end. Exactly one Outcome per
//! invocation; every failure mode collapses into it.

use super::registry::{self, ActionDef};
use super::request;
use crate::params::Params;
use crate::sandbox::client::SandboxClient;
use crate::sandbox::http;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Normalized result of one invocation
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// True when a mutation was attempted, whether or not the API confirmed
    /// it. A create/update/delete that came back 4xx/5xx still reports
    /// `changed`; only failures before the request leave it false.
    pub changed: bool,
    pub failed: bool,
    pub msg: String,
    /// Parsed response body, or `{"raw_response": ...}` for non-JSON bodies
    pub result: Value,
    /// 0 when no response was received
    pub status_code: u16,
}

/// Execute the action described by `params` against the API.
pub async fn dispatch(params: &Params) -> Outcome {
    match SandboxClient::new(params) {
        Ok(client) => dispatch_with(&client, params).await,
        Err(err) => error_outcome(&params.action, false, &err),
    }
}

/// Execute an action through an already-configured client.
///
/// Use this over [`dispatch`] to install a request signer or reuse executor
/// configuration across unrelated invocations.
pub async fn dispatch_with(client: &SandboxClient, params: &Params) -> Outcome {
    match run(client, params).await {
        Ok(outcome) => outcome,
        Err(err) => error_outcome(&params.action, false, &err),
    }
}

async fn run(client: &SandboxClient, params: &Params) -> Result<Outcome> {
    let entry = registry::get_action(&params.action)
        .with_context(|| format!("Unknown action: {}", params.action))?;

    let id = required_id(entry, params)?;

    let descriptor = request::build(
        client.base_url(),
        client.api_version(),
        client.headers(),
        entry,
        id,
        &params.query_params,
        &params.resource_data,
    )?;

    tracing::info!("dispatch: action={} {} {}", params.action, entry.method.as_str(), descriptor.url);

    let raw = match client.send(descriptor).await {
        Ok(raw) => raw,
        // No response at all: status 0, but a mutation may still have been
        // attempted on the wire
        Err(err) => return Ok(error_outcome(&params.action, entry.mutates, &err)),
    };

    let result = http::parse_body(&raw.body);
    let success = http::is_success(raw.status);

    let msg = if success {
        format!("Action {} completed successfully", params.action)
    } else {
        let mut msg = format!("Action {} failed with status {}", params.action, raw.status);
        if !is_empty_body(&result) {
            msg.push_str(&format!(": {}", result));
        }
        msg
    };

    Ok(Outcome {
        changed: entry.mutates,
        failed: !success,
        msg,
        result,
        status_code: raw.status,
    })
}

/// Check the identifier requirement before anything goes on the wire
fn required_id<'a>(entry: &ActionDef, params: &'a Params) -> Result<Option<&'a str>> {
    let Some(kind) = entry.id else {
        return Ok(None);
    };

    match params.id_for(kind) {
        Some(value) if !value.is_empty() => Ok(Some(value)),
        _ => bail!("{} is required for {} action", kind.param(), params.action),
    }
}

fn error_outcome(action: &str, changed: bool, err: &anyhow::Error) -> Outcome {
    Outcome {
        changed,
        failed: true,
        msg: format!("Error executing action {}: {:#}", action, err),
        result: json!({}),
        status_code: 0,
    }
}

/// No useful body to append to a failure message
fn is_empty_body(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::registry::get_action;

    #[test]
    fn test_required_id_present() {
        let entry = get_action("get_account").unwrap();
        let mut params = Params::new("get_account", "https://api.example.com");
        params.account_id = Some("acct-1".to_string());

        assert_eq!(required_id(entry, &params).unwrap(), Some("acct-1"));
    }

    #[test]
    fn test_required_id_missing() {
        let entry = get_action("get_account").unwrap();
        let params = Params::new("get_account", "https://api.example.com");

        let err = required_id(entry, &params).unwrap_err();
        assert!(err
            .to_string()
            .contains("account_id is required for get_account action"));
    }

    #[test]
    fn test_required_id_empty_string_is_missing() {
        let entry = get_action("terminate_lease").unwrap();
        let mut params = Params::new("terminate_lease", "https://api.example.com");
        params.lease_id = Some(String::new());

        assert!(required_id(entry, &params).is_err());
    }

    #[test]
    fn test_no_id_requirement() {
        let entry = get_action("list_accounts").unwrap();
        let params = Params::new("list_accounts", "https://api.example.com");

        assert_eq!(required_id(entry, &params).unwrap(), None);
    }

    #[test]
    fn test_is_empty_body() {
        assert!(is_empty_body(&json!(null)));
        assert!(is_empty_body(&json!({})));
        assert!(is_empty_body(&json!([])));
        assert!(is_empty_body(&json!("")));
        assert!(!is_empty_body(&json!({"error": "boom"})));
        assert!(!is_empty_body(&json!(0)));
    }

    #[test]
    fn test_error_outcome_shape() {
        let err = anyhow::anyhow!("connection refused");
        let outcome = error_outcome("delete_account", true, &err);

        assert!(outcome.changed);
        assert!(outcome.failed);
        assert_eq!(outcome.status_code, 0);
        assert_eq!(outcome.result, json!({}));
        assert!(outcome
            .msg
            .contains("Error executing action delete_account: connection refused"));
    }
}
