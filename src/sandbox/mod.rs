//! Sandbox API interaction module
//!
//! Core functionality for talking to the Innovation Sandbox API:
//! authentication strategies, the HTTP executor, and the client that
//! combines them.
//!
//! # Module Structure
//!
//! - [`auth`] - header-based auth strategies and the IAM signer seam
//! - [`http`] - request/response contracts, executor, response normalization
//! - [`client`] - the configured API client
//!
//! # Example
//!
//! ```ignore
//! use sandboxctl::params::Params;
//! use sandboxctl::sandbox::client::SandboxClient;
//!
//! fn example() -> anyhow::Result<SandboxClient> {
//!     let params = Params::new("list_accounts", "https://sandbox.example.com");
//!     SandboxClient::new(&params)
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
