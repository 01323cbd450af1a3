//! Action dispatch layer
//!
//! Data-driven execution of API actions. The registry defines every action
//! as data (verb, path template, identifier requirement, mutation flag);
//! the dispatcher turns one registry entry plus invocation parameters into
//! exactly one HTTP call and one Outcome.
//!
//! # Module Structure
//!
//! - [`registry`] - the embedded action table
//! - [`request`] - composes the transport-agnostic request descriptor
//! - [`dispatch`] - validation, execution, and outcome normalization

pub mod dispatch;
pub mod registry;
pub mod request;

pub use dispatch::{dispatch, dispatch_with, Outcome};
