//! Request execution.
//!
//! A [`Transport`] takes a [`PreparedRequest`] and reports what came back as a
//! [`TransportOutcome`]: an optional payload and an optional error, which are
//! independent of each other. [`decode::classify`] turns that raw outcome into
//! the final result, and [`RequestTask`] is the handle callers get while the
//! work is in flight.
//!
//! The production transport is [`native::ReqwestTransport`]; tests substitute
//! their own implementation of the trait.

pub mod cancellation;
pub mod decode;
pub mod error;

#[cfg(feature = "native")]
pub mod native;

pub use cancellation::RequestTask;
pub use decode::{classify, decode_payload};
pub use error::TransportError;

#[cfg(feature = "native")]
pub use native::ReqwestTransport;

use crate::models::request::PreparedRequest;
use async_trait::async_trait;
use bytes::Bytes;

/// Raw result of handing a request to a transport.
///
/// `payload` and `error` are independent channels: a payload may arrive with
/// a warning, and an error may arrive without a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportOutcome {
    /// HTTP status code, when a response head was received.
    pub status: Option<u16>,

    /// Response body; `None` when nothing was received at all.
    pub payload: Option<Bytes>,

    /// Error reported by the transport.
    pub error: Option<TransportError>,
}

impl TransportOutcome {
    /// An outcome with a payload and no error.
    pub fn payload(payload: impl Into<Bytes>) -> Self {
        Self {
            status: None,
            payload: Some(payload.into()),
            error: None,
        }
    }

    /// An outcome with an error and no payload.
    pub fn failed(error: TransportError) -> Self {
        Self {
            status: None,
            payload: None,
            error: Some(error),
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a transport error alongside whatever payload is present.
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Dispatches assembled requests over the network.
///
/// A transport never fails outright; everything it has to say goes into the
/// returned [`TransportOutcome`].
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and waits for the complete response.
    async fn send(&self, request: PreparedRequest) -> TransportOutcome;
}
