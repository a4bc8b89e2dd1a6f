//! Response classification and JSON decoding.

use crate::executor::TransportOutcome;
use crate::models::response::Reply;
use crate::requestor::error::RequestorError;
use serde_json::Value;

/// Parses a non-empty payload as JSON.
///
/// Top-level fragments are accepted, so `42`, `"ok"` and `[1, 2]` decode as
/// well as objects.
pub fn decode_payload(payload: &[u8]) -> Result<Value, RequestorError> {
    serde_json::from_slice(payload).map_err(|e| RequestorError::InvalidResponse(e.to_string()))
}

/// Classifies a transport outcome into the final result of a request.
///
/// - No payload: [`RequestorError::NoResponse`], carrying the transport error
///   if there was one.
/// - Zero-length payload: an empty object, with the transport error passed
///   through as a warning.
/// - Otherwise the payload is decoded. On success the transport error is passed
///   through as a warning; on failure it is discarded in favour of
///   [`RequestorError::InvalidResponse`].
pub fn classify(outcome: TransportOutcome) -> Result<Reply, RequestorError> {
    let TransportOutcome {
        status,
        payload,
        error,
    } = outcome;

    let payload = match payload {
        Some(payload) => payload,
        None => return Err(RequestorError::NoResponse { source: error }),
    };

    let value = if payload.is_empty() {
        Reply::empty().value
    } else {
        decode_payload(&payload)?
    };

    Ok(Reply {
        value,
        status,
        warning: error,
    })
}
