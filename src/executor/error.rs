//! Transport-level error types.
//!
//! These describe what went wrong between handing a request to the transport
//! and receiving its payload: network failures, timeouts, TLS problems, and
//! non-success HTTP statuses.

use thiserror::Error;

/// Errors reported by a [`Transport`](crate::executor::Transport).
///
/// A transport error may arrive on its own (no payload) or next to a payload,
/// in which case it is a warning and is passed through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out before completion.
    #[error("Request timed out")]
    Timeout,

    /// TLS/SSL error occurred during HTTPS connection.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// HTTP protocol error, such as a malformed response.
    #[error("HTTP protocol error: {0}")]
    ProtocolError(String),

    /// The HTTP client rejected the request before sending it.
    #[error("Request build error: {0}")]
    BuildError(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} {reason}")]
    HttpStatus { status: u16, reason: String },
}

impl TransportError {
    /// Returns `true` if the error came from the server rather than the wire.
    pub fn is_status(&self) -> bool {
        matches!(self, TransportError::HttpStatus { .. })
    }
}

/// Convert reqwest errors to TransportError.
///
/// Maps reqwest's error types to our variants so the rest of the crate
/// never depends on reqwest directly.
#[cfg(feature = "native")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() || err.is_request() {
            TransportError::NetworkError(err.to_string())
        } else if err.is_builder() {
            TransportError::BuildError(err.to_string())
        } else if err.is_decode() || err.is_body() {
            TransportError::ProtocolError(err.to_string())
        } else if err.to_string().contains("certificate")
            || err.to_string().contains("TLS")
            || err.to_string().contains("SSL")
        {
            TransportError::TlsError(err.to_string())
        } else {
            TransportError::NetworkError(err.to_string())
        }
    }
}
