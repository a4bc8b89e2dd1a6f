//! Handles to in-flight requests.
//!
//! Each dispatched request runs as its own Tokio task. The [`RequestTask`]
//! returned to the caller is the only way to cancel it; awaiting the handle
//! yields the request's result.

use crate::requestor::error::RequestorError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// A handle to a running request.
///
/// Dropping the handle does not cancel the request; call [`RequestTask::cancel`]
/// for that. Once cancelled, the completion callback may or may not have run,
/// and awaiting the handle yields [`RequestorError::Cancelled`].
#[derive(Debug)]
pub struct RequestTask<T = ()> {
    request_id: String,
    join_handle: JoinHandle<Result<T, RequestorError>>,
}

impl<T> RequestTask<T> {
    pub(crate) fn new(request_id: String, join_handle: JoinHandle<Result<T, RequestorError>>) -> Self {
        Self {
            request_id,
            join_handle,
        }
    }

    /// Identifier of the request this task is executing.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Aborts the request. Has no effect if it already finished.
    pub fn cancel(&self) {
        self.join_handle.abort();
    }

    /// Checks whether the request has run to completion or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }
}

impl<T> Future for RequestTask<T> {
    type Output = Result<T, RequestorError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.join_handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(err)) if err.is_cancelled() => {
                Poll::Ready(Err(RequestorError::Cancelled))
            }
            Poll::Ready(Err(err)) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
