//! Action Registry - the fixed dispatch table
//!
//! Every API action is defined as data in an embedded JSON table, loaded
//! once and shared read-only for the life of the process. Adding an action
//! is a data change, not a code change.

use crate::sandbox::http::Verb;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded action table (compiled into the binary)
const ACTION_FILE: &str = include_str!("actions.json");

/// Which identifier parameter an action requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Account,
    Lease,
    User,
}

impl IdKind {
    /// Name of the invocation parameter carrying this identifier
    pub fn param(self) -> &'static str {
        match self {
            IdKind::Account => "account_id",
            IdKind::Lease => "lease_id",
            IdKind::User => "user_id",
        }
    }
}

/// Action definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ActionDef {
    pub method: Verb,
    /// Path template below the versioned base URL; `{id}` marks the slot
    /// for the required identifier
    pub path: String,
    #[serde(default)]
    pub id: Option<IdKind>,
    /// True for actions whose purpose is to change remote state
    #[serde(default)]
    pub mutates: bool,
    /// Whether the action forwards `query_params`
    #[serde(default)]
    pub query: bool,
    /// Whether the action sends `resource_data` as its request body
    #[serde(default)]
    pub body: bool,
}

/// Root structure of actions.json
#[derive(Debug, Deserialize)]
struct ActionTable {
    actions: HashMap<String, ActionDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ActionTable> = OnceLock::new();

fn get_registry() -> &'static ActionTable {
    REGISTRY.get_or_init(|| {
        serde_json::from_str(ACTION_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded action JSON: {}", e))
    })
}

/// Look up an action definition by name
pub fn get_action(name: &str) -> Option<&'static ActionDef> {
    get_registry().actions.get(name)
}

/// All action names, sorted for stable CLI help output
pub fn all_action_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = get_registry()
        .actions
        .keys()
        .map(|s| s.as_str())
        .collect();
    names.sort_unstable();
    names
}
