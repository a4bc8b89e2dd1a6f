//! Configuration schema for the requestor.
//!
//! This module defines the configuration structure and validation logic for
//! the settings a [`DefaultRequestor`](crate::requestor::DefaultRequestor) is
//! built from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base endpoint of the Strava v3 API.
pub const STRAVA_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Main configuration structure for the requestor.
///
/// Missing settings fall back to defaults when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestorConfig {
    /// URL prefix every request path is appended to.
    ///
    /// Paths are concatenated verbatim, so a path is expected to start with
    /// `/`. Defaults to the Strava v3 API endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    ///
    /// Unset by default, which leaves the transport's own timeout behaviour
    /// in place. When set it must be greater than 0.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Headers sent with every request.
    ///
    /// `Content-Type` and `Authorization` are always set by the requestor
    /// and take precedence over entries here.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,

    /// What to do when a request URL cannot be constructed.
    #[serde(default)]
    pub invalid_url_policy: InvalidUrlPolicy,
}

/// Handling of requests whose URL cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidUrlPolicy {
    /// Return no task and skip the completion callback. Only a log warning
    /// records the dropped request.
    #[default]
    Silent,
    /// Invoke the completion callback with an `InvalidRequest` error.
    Report,
}

impl Default for RequestorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
            default_headers: default_headers(),
            invalid_url_policy: InvalidUrlPolicy::default(),
        }
    }
}

impl RequestorConfig {
    /// Creates a default configuration pointing at another base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// The base URL itself is not checked here; an unusable base URL surfaces
    /// per request according to `invalid_url_policy`.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == Some(0) {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.base_url.trim().is_empty() {
            return Err("baseUrl must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`, if one is configured.
    pub fn timeout_duration(&self) -> Option<std::time::Duration> {
        self.timeout.map(std::time::Duration::from_millis)
    }
}

// Default value functions for serde

fn default_base_url() -> String {
    STRAVA_BASE_URL.to_string()
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("StravaKit/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
