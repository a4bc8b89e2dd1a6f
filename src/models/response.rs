//! Response data models.
//!
//! A [`Reply`] is what a successful request resolves to: the decoded JSON
//! payload together with whatever the transport reported alongside it.

use crate::executor::error::TransportError;
use serde_json::{Map, Value};

/// Successful outcome of a request.
///
/// `warning` is the transport-level error that accompanied a usable payload
/// (for example a non-2xx status whose body still decoded as JSON). It is
/// passed through unchanged, so callers must inspect it as well as `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Decoded JSON payload. An empty payload decodes to an empty object.
    pub value: Value,

    /// HTTP status code, when the transport observed one.
    pub status: Option<u16>,

    /// Transport error reported alongside the payload.
    pub warning: Option<TransportError>,
}

impl Reply {
    /// Creates a reply carrying a decoded value.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            status: None,
            warning: None,
        }
    }

    /// Creates the reply used for zero-length payloads.
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// Returns `true` when the transport reported nothing besides the payload.
    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }
}
