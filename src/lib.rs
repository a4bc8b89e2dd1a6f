//! StravaKit networking core
//!
//! This crate is the request/response layer of a Strava API client. It turns a
//! method, a path and a parameter mapping into an HTTP request, attaches bearer
//! authentication, sends it asynchronously and decodes the JSON that comes
//! back.
//!
//! # Architecture
//!
//! - **models**: HTTP method, parameter mapping, assembled request and reply
//! - **config**: requestor settings (base URL, timeout, default headers)
//! - **auth**: access token providers and the bearer header
//! - **executor**: the transport abstraction, the reqwest transport, response
//!   classification and task handles
//! - **requestor**: the [`Requestor`] capability and [`DefaultRequestor`]
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use stravakit::auth::SharedToken;
//! use stravakit::config::RequestorConfig;
//! use stravakit::{params, DefaultRequestor, HttpMethod, Requestor};
//!
//! # async fn example() -> Result<(), stravakit::RequestorError> {
//! let tokens = SharedToken::new();
//! tokens.set("83ebeabdec09f6670863766f792ead24d61fe3f9");
//!
//! let requestor = DefaultRequestor::new(RequestorConfig::default(), Arc::new(tokens))?;
//! let params = params! { "page" => 1, "per_page" => 30 };
//!
//! let reply = requestor
//!     .execute(HttpMethod::GET, true, "/athlete/activities", Some(&params))?
//!     .await?;
//! println!("{}", reply.value);
//! # Ok(())
//! # }
//! ```
//!
//! The callback form reports `(response, error)` exactly once per dispatched
//! request; see [`Requestor::request`].

pub mod auth;
pub mod config;
pub mod executor;
pub mod models;
pub mod requestor;

pub use auth::{SharedToken, StaticToken, TokenProvider};
pub use config::RequestorConfig;
pub use executor::{RequestTask, Transport, TransportError, TransportOutcome};
pub use models::{HttpMethod, ParamValue, ParamsDictionary, PreparedRequest, Reply};
pub use requestor::{
    CompletionHandler, DefaultRequestor, ErrorCode, Requestor, RequestorError,
};
