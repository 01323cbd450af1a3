//! Request Builder
//!
//! Turns a registry entry plus invocation inputs into the transport-agnostic
//! descriptor the executor consumes.

use super::registry::ActionDef;
use crate::sandbox::http::RequestDescriptor;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Compose the full request for one action invocation.
///
/// The caller has already validated that `id` is present when the entry
/// requires one; the check here is a backstop for direct use.
pub fn build(
    base_url: &str,
    api_version: &str,
    headers: &HashMap<String, String>,
    entry: &ActionDef,
    id: Option<&str>,
    query_params: &Map<String, Value>,
    resource_data: &Map<String, Value>,
) -> Result<RequestDescriptor> {
    let path = substitute_id(&entry.path, id)?;
    let mut url = format!("{}/{}{}", base_url.trim_end_matches('/'), api_version, path);

    if entry.query && !query_params.is_empty() {
        url = add_query_params(&url, query_params);
    }

    let body = if entry.body && !resource_data.is_empty() {
        Some(Value::Object(resource_data.clone()))
    } else {
        None
    };

    Ok(RequestDescriptor {
        method: entry.method,
        url,
        headers: headers.clone(),
        body,
    })
}

/// Substitute the `{id}` slot in a path template
fn substitute_id(path: &str, id: Option<&str>) -> Result<String> {
    if !path.contains("{id}") {
        return Ok(path.to_string());
    }

    let id = id.context("Missing identifier for path template")?;
    Ok(path.replace("{id}", &urlencoding::encode(id)))
}

/// Append query parameters to a URL, percent-encoding the values
fn add_query_params(url: &str, params: &Map<String, Value>) -> String {
    let mut query_parts: Vec<String> = Vec::new();

    for (key, value) in params {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            // Nested values have no query-string representation
            _ => continue,
        };
        query_parts.push(format!("{}={}", key, urlencoding::encode(&text)));
    }

    if query_parts.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query_parts.join("&"))
    } else {
        format!("{}?{}", url, query_parts.join("&"))
    }
}
