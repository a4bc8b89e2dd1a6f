//! Requestor error types.
//!
//! Every failure a request can end in maps to exactly one [`RequestorError`]
//! variant, and each variant carries a stable numeric [`ErrorCode`] so callers
//! can branch on it without matching message text.

use crate::executor::error::TransportError;
use thiserror::Error;

/// Machine-distinguishable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    NoAccessToken = 501,
    BodySerializationFailed = 502,
    Transport = 503,
    InvalidResponse = 504,
    NoResponse = 505,
    InvalidRequest = 506,
    Cancelled = 507,
    Client = 599,
}

impl ErrorCode {
    /// Returns the numeric value of the code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Errors surfaced by a [`Requestor`](crate::requestor::Requestor).
///
/// None of these are ever raised across the async boundary; they are
/// delivered through the completion callback or the task's result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestorError {
    /// An authenticated request was made while no access token was available.
    #[error("No access token")]
    NoAccessToken,

    /// The parameter mapping could not be encoded as a JSON body.
    #[error("Body JSON serialization failed: {0}")]
    BodySerializationFailed(String),

    /// A payload arrived but was not valid JSON.
    #[error("Response JSON serialization failed: {0}")]
    InvalidResponse(String),

    /// The transport produced no payload at all.
    #[error("No data{}", .source.as_ref().map(|e| format!(": {}", e)).unwrap_or_default())]
    NoResponse { source: Option<TransportError> },

    /// Base URL, path and query could not be combined into a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidRequest(String),

    /// Transport error passed through next to a usable payload.
    #[error(transparent)]
    Transport(TransportError),

    /// The task was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl RequestorError {
    /// Returns the machine-distinguishable code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RequestorError::NoAccessToken => ErrorCode::NoAccessToken,
            RequestorError::BodySerializationFailed(_) => ErrorCode::BodySerializationFailed,
            RequestorError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            RequestorError::NoResponse { .. } => ErrorCode::NoResponse,
            RequestorError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            RequestorError::Transport(_) => ErrorCode::Transport,
            RequestorError::Cancelled => ErrorCode::Cancelled,
            RequestorError::Client(_) => ErrorCode::Client,
        }
    }
}

impl From<url::ParseError> for RequestorError {
    fn from(err: url::ParseError) -> Self {
        RequestorError::InvalidRequest(err.to_string())
    }
}

impl From<serde_json::Error> for RequestorError {
    fn from(err: serde_json::Error) -> Self {
        RequestorError::BodySerializationFailed(err.to_string())
    }
}
