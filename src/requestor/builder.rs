//! URL building and request assembly.

use crate::models::request::{HttpMethod, ParamsDictionary, PreparedRequest};
use crate::requestor::error::RequestorError;
use url::Url;

/// Combines the base URL, a path and optional query parameters into a URL.
///
/// The path is appended to the base verbatim. Parameters are percent-encoded
/// into the query string; an empty mapping adds no query at all. Only `http`
/// and `https` URLs are accepted.
///
/// # Errors
///
/// Returns [`RequestorError::InvalidRequest`] if the combination does not
/// parse as an absolute http(s) URL.
pub fn build_url(
    base_url: &str,
    path: &str,
    query: Option<&ParamsDictionary>,
) -> Result<Url, RequestorError> {
    let mut url = Url::parse(&format!("{}{}", base_url, path))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RequestorError::InvalidRequest(format!(
            "unsupported protocol: {}",
            url.scheme()
        )));
    }

    if let Some(params) = query.filter(|p| !p.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, &value.query_value());
        }
    }

    Ok(url)
}

/// Assembles the request for one call, without authentication.
///
/// Methods that carry a body get the parameters as a JSON body; every other
/// method gets them in the query string. `Content-Type: application/json` is
/// set unconditionally.
///
/// # Errors
///
/// - [`RequestorError::InvalidRequest`] if the URL cannot be built.
/// - [`RequestorError::BodySerializationFailed`] if the parameters cannot be
///   encoded as JSON.
pub fn assemble_request(
    base_url: &str,
    method: HttpMethod,
    path: &str,
    params: Option<&ParamsDictionary>,
) -> Result<PreparedRequest, RequestorError> {
    let query = if method.carries_body() { None } else { params };
    let url = build_url(base_url, path, query)?;

    let mut request = PreparedRequest::new(method, url);
    request.add_header("Content-Type".to_string(), "application/json".to_string());

    if let Some(params) = params.filter(|_| method.carries_body()) {
        request.body = Some(serde_json::to_vec(params)?);
    }

    Ok(request)
}
