//! Invocation parameters
//!
//! One invocation = one parameter set, assembled from a declarative
//! YAML/JSON task file, CLI flags, or both (flags win). Defaults match the
//! API's documented conventions.

use crate::action::registry::IdKind;
use crate::sandbox::auth::AuthKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_validate_certs() -> bool {
    true
}

/// Parameters for a single action invocation
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Action name, one of the registry entries
    pub action: String,
    /// Base URL of the Sandbox API
    pub api_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub auth_type: AuthKind,
    #[serde(default)]
    pub auth_config: HashMap<String, String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_validate_certs")]
    pub validate_certs: bool,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub lease_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Request body for create/update/extend actions
    #[serde(default)]
    pub resource_data: Map<String, Value>,
    /// Query string parameters for list actions
    #[serde(default)]
    pub query_params: Map<String, Value>,
}

impl Params {
    /// Minimal parameter set with the documented defaults
    pub fn new(action: &str, api_url: &str) -> Self {
        Self {
            action: action.to_string(),
            api_url: api_url.to_string(),
            api_version: default_api_version(),
            auth_type: AuthKind::default(),
            auth_config: HashMap::new(),
            timeout: default_timeout(),
            validate_certs: default_validate_certs(),
            account_id: None,
            lease_id: None,
            user_id: None,
            resource_data: Map::new(),
            query_params: Map::new(),
        }
    }

    /// Load parameters from a YAML or JSON task file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read params file {}", path.display()))?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content).context("Invalid JSON params file")
        } else {
            serde_yaml::from_str(&content).context("Invalid YAML params file")
        }
    }

    /// The identifier value matching an action's required id kind
    pub fn id_for(&self, kind: IdKind) -> Option<&str> {
        match kind {
            IdKind::Account => self.account_id.as_deref(),
            IdKind::Lease => self.lease_id.as_deref(),
            IdKind::User => self.user_id.as_deref(),
        }
    }
}
