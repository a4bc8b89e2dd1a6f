//! Native HTTP transport using reqwest.
//!
//! A single pooled `reqwest::Client` is shared by all requests sent through
//! one transport. Everything request-specific, including the Authorization
//! header, is applied on the individual request builder, so nothing set for
//! one request leaks into another.

use crate::config::RequestorConfig;
use crate::executor::error::TransportError;
use crate::executor::{Transport, TransportOutcome};
use crate::models::request::{HttpMethod, PreparedRequest};
use crate::requestor::error::RequestorError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with the default headers from `config`.
    ///
    /// A timeout is only installed when `config.timeout` is set; otherwise
    /// reqwest's default (no overall deadline) applies.
    ///
    /// # Errors
    ///
    /// Returns [`RequestorError::Client`] if a default header is invalid or the
    /// client cannot be constructed.
    pub fn new(config: &RequestorConfig) -> Result<Self, RequestorError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| RequestorError::Client(format!("invalid header name: {}", e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| RequestorError::Client(format!("invalid header value: {}", e)))?;
            default_headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RequestorError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::TRACE => reqwest::Method::TRACE,
        HttpMethod::CONNECT => reqwest::Method::CONNECT,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> TransportOutcome {
        let mut req_builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.clone());

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("request {} failed before a response: {}", request.id, e);
                return TransportOutcome::failed(TransportError::from(e));
            }
        };

        let status = response.status();
        let warning = if status.is_success() {
            None
        } else {
            Some(TransportError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            })
        };

        match response.bytes().await {
            Ok(payload) => TransportOutcome {
                status: Some(status.as_u16()),
                payload: Some(payload),
                error: warning,
            },
            Err(e) => {
                debug!("request {} failed reading the body: {}", request.id, e);
                TransportOutcome::failed(TransportError::from(e)).with_status(status.as_u16())
            }
        }
    }
}
