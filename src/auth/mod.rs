//! Access token lookup and bearer authentication.
//!
//! The requestor never owns credentials. It is handed a [`TokenProvider`] at
//! construction time and asks it for the current access token on every
//! authenticated request. Whoever performs the OAuth exchange keeps the token
//! up to date on the other side of the provider.

pub mod bearer;

use crate::models::request::PreparedRequest;
use crate::requestor::error::RequestorError;
use std::sync::{Arc, RwLock};

/// Read-only source of the current access token.
///
/// Implementations must tolerate concurrent reads from many in-flight
/// requests.
pub trait TokenProvider: Send + Sync {
    /// Returns the current access token, or `None` if the client is not
    /// authorized.
    fn access_token(&self) -> Option<String>;
}

/// A token fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A provider that never has a token.
    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A token slot shared between the authorization flow and the requestor.
///
/// Clones share the same slot. The requestor only reads it; the owner of the
/// authorization flow calls [`SharedToken::set`] and [`SharedToken::clear`].
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new access token, replacing any previous one.
    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(token.into());
        }
    }

    /// Removes the stored access token.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }
}

impl TokenProvider for SharedToken {
    fn access_token(&self) -> Option<String> {
        self.inner.read().ok().and_then(|slot| slot.clone())
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        self()
    }
}

/// Attaches `Authorization: Bearer <token>` to the request.
///
/// Any existing Authorization header is replaced regardless of its case.
///
/// # Errors
///
/// Returns [`RequestorError::NoAccessToken`] when the provider has no token,
/// or only a blank one.
pub fn apply_bearer(
    request: &mut PreparedRequest,
    provider: &dyn TokenProvider,
) -> Result<(), RequestorError> {
    let raw = provider
        .access_token()
        .ok_or(RequestorError::NoAccessToken)?;
    let token = bearer::normalize_token(&raw).ok_or(RequestorError::NoAccessToken)?;

    request
        .headers
        .retain(|k, _| !k.eq_ignore_ascii_case("authorization"));
    request.add_header("Authorization".to_string(), bearer::bearer_token(token));
    Ok(())
}
