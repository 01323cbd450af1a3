//! sandboxctl - declarative client for the AWS Innovation Sandbox API
//!
//! One invocation maps a named action plus resource identifiers and payload
//! data onto a single authenticated HTTP call, then normalizes the response
//! into a uniform outcome record (changed, failed, msg, result,
//! status_code). There is no state between invocations; each call is an
//! independent request/response cycle.
//!
//! # Architecture
//!
//! - [`params`] - invocation parameters and the declarative task file
//! - [`sandbox`] - authentication, HTTP transport, and the API client
//! - [`action`] - the action registry, request builder, and dispatcher
//!
//! # Example
//!
//! ```ignore
//! use sandboxctl::{dispatch, Params};
//!
//! async fn check(api_url: &str) -> bool {
//!     let outcome = dispatch(&Params::new("health_check", api_url)).await;
//!     !outcome.failed
//! }
//! ```

pub mod action;
pub mod params;
pub mod sandbox;

pub use action::dispatch::{dispatch, dispatch_with, Outcome};
pub use params::Params;
pub use sandbox::client::SandboxClient;
