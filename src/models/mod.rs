//! Data models for requests and responses.
//!
//! This module contains the data structures a single request moves through:
//! the method and parameter mapping supplied by the caller, the assembled
//! request handed to the transport, and the decoded reply.

pub mod request;
pub mod response;

pub use request::{HttpMethod, ParamValue, ParamsDictionary, PreparedRequest};
pub use response::Reply;
