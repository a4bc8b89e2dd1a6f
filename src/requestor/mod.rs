//! The requestor: builds, authenticates, sends and decodes API requests.
//!
//! A call moves through a fixed pipeline:
//!
//! 1. **Building**: base URL, path and parameters become a
//!    [`PreparedRequest`]. Body-bearing methods (POST, PUT) get the parameters
//!    as JSON; all others get them in the query string.
//! 2. **Auth check**: for authenticated calls the [`TokenProvider`] must yield
//!    a token, which is attached as a bearer header.
//! 3. **Dispatched**: the request is spawned on the runtime and the caller
//!    gets a [`RequestTask`] back immediately.
//! 4. **Completed**: the transport outcome is classified and delivered once.
//!
//! Failures in steps 1 and 2 never reach the network.

pub mod builder;
pub mod error;

pub use builder::{assemble_request, build_url};
pub use error::{ErrorCode, RequestorError};

use crate::auth::{apply_bearer, TokenProvider};
use crate::config::{InvalidUrlPolicy, RequestorConfig};
use crate::executor::{classify, RequestTask, Transport};
use crate::models::request::{HttpMethod, ParamsDictionary, PreparedRequest};
use crate::models::response::Reply;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Completion callback: `(response, error)`.
///
/// Both sides may be present at once: a decoded response can arrive together
/// with a transport warning.
pub type CompletionHandler = Box<dyn FnOnce(Option<Value>, Option<RequestorError>) + Send + 'static>;

/// Capability for issuing API requests.
pub trait Requestor: Send + Sync {
    /// Issues a request and reports its outcome through `on_complete`.
    ///
    /// Returns the in-flight task, or `None` if the request never reached the
    /// network. Pre-dispatch failures (missing token, unencodable body) invoke
    /// the callback before this method returns. A URL that cannot be built
    /// yields `None` without invoking the callback, unless the requestor is
    /// configured with [`InvalidUrlPolicy::Report`].
    fn request(
        &self,
        method: HttpMethod,
        authenticated: bool,
        path: &str,
        params: Option<&ParamsDictionary>,
        on_complete: Option<CompletionHandler>,
    ) -> Option<RequestTask>;

    /// Issues a request and returns a task resolving to its result.
    ///
    /// # Errors
    ///
    /// Pre-dispatch failures are returned directly; no task is spawned.
    fn execute(
        &self,
        method: HttpMethod,
        authenticated: bool,
        path: &str,
        params: Option<&ParamsDictionary>,
    ) -> Result<RequestTask<Reply>, RequestorError>;
}

/// The production [`Requestor`].
///
/// Holds no per-request state; concurrent calls are independent and share only
/// the read-only token provider and the transport.
pub struct DefaultRequestor<T: Transport> {
    config: RequestorConfig,
    tokens: Arc<dyn TokenProvider>,
    transport: Arc<T>,
    runtime: Handle,
}

#[cfg(feature = "native")]
impl DefaultRequestor<crate::executor::ReqwestTransport> {
    /// Creates a requestor backed by reqwest, spawning onto the current Tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RequestorError::Client`] when called outside a Tokio runtime
    /// or when the HTTP client cannot be built.
    pub fn new(
        config: RequestorConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, RequestorError> {
        let runtime = Handle::try_current()
            .map_err(|e| RequestorError::Client(format!("no Tokio runtime: {}", e)))?;
        let transport = crate::executor::ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, tokens, transport, runtime))
    }
}

impl<T: Transport> DefaultRequestor<T> {
    /// Creates a requestor with an explicit transport and runtime.
    pub fn with_transport(
        config: RequestorConfig,
        tokens: Arc<dyn TokenProvider>,
        transport: T,
        runtime: Handle,
    ) -> Self {
        Self {
            config,
            tokens,
            transport: Arc::new(transport),
            runtime,
        }
    }

    /// Returns the configuration this requestor was built with.
    pub fn config(&self) -> &RequestorConfig {
        &self.config
    }

    /// Runs the building and auth-check stages.
    fn prepare(
        &self,
        method: HttpMethod,
        authenticated: bool,
        path: &str,
        params: Option<&ParamsDictionary>,
    ) -> Result<PreparedRequest, RequestorError> {
        let mut request = assemble_request(&self.config.base_url, method, path, params)?;
        if authenticated {
            apply_bearer(&mut request, self.tokens.as_ref())?;
        }
        Ok(request)
    }

    /// Spawns the request and returns its handle.
    fn dispatch<R, F>(&self, request: PreparedRequest, finish: F) -> RequestTask<R>
    where
        R: Send + 'static,
        F: FnOnce(Result<Reply, RequestorError>) -> Result<R, RequestorError> + Send + 'static,
    {
        let request_id = request.id.clone();
        let transport = Arc::clone(&self.transport);
        debug!("dispatching {} {} ({})", request.method, request.url, request_id);

        let task_id = request_id.clone();
        let join_handle = self.runtime.spawn(async move {
            let outcome = transport.send(request).await;
            let result = classify(outcome);
            match &result {
                Ok(reply) => debug!("request {} completed with status {:?}", task_id, reply.status),
                Err(e) => debug!("request {} failed: {}", task_id, e),
            }
            finish(result)
        });

        RequestTask::new(request_id, join_handle)
    }
}

/// Splits a result into the `(response, error)` pair of the callback contract.
fn into_callback_args(result: Result<Reply, RequestorError>) -> (Option<Value>, Option<RequestorError>) {
    match result {
        Ok(reply) => (Some(reply.value), reply.warning.map(RequestorError::Transport)),
        Err(e) => (None, Some(e)),
    }
}

impl<T: Transport> Requestor for DefaultRequestor<T> {
    fn request(
        &self,
        method: HttpMethod,
        authenticated: bool,
        path: &str,
        params: Option<&ParamsDictionary>,
        on_complete: Option<CompletionHandler>,
    ) -> Option<RequestTask> {
        let request = match self.prepare(method, authenticated, path, params) {
            Ok(request) => request,
            Err(RequestorError::InvalidRequest(reason))
                if self.config.invalid_url_policy == InvalidUrlPolicy::Silent =>
            {
                warn!("dropping {} {}: {}", method, path, reason);
                return None;
            }
            Err(e) => {
                if let Some(on_complete) = on_complete {
                    on_complete(None, Some(e));
                }
                return None;
            }
        };

        Some(self.dispatch(request, move |result| {
            if let Some(on_complete) = on_complete {
                let (response, error) = into_callback_args(result);
                on_complete(response, error);
            }
            Ok(())
        }))
    }

    fn execute(
        &self,
        method: HttpMethod,
        authenticated: bool,
        path: &str,
        params: Option<&ParamsDictionary>,
    ) -> Result<RequestTask<Reply>, RequestorError> {
        let request = self.prepare(method, authenticated, path, params)?;
        Ok(self.dispatch(request, |result| result))
    }
}
