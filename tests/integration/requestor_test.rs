//! Requestor pipeline tests against a recording transport.
//!
//! These cover the observable contract of a request: where parameters end up,
//! which headers are set, when the network is skipped, and what the completion
//! callback receives for each kind of transport outcome.

use super::{init_test_env, CallbackRecorder, RecordingTransport};
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use stravakit::auth::SharedToken;
use stravakit::config::RequestorConfig;
use stravakit::{
    params, DefaultRequestor, ErrorCode, HttpMethod, Requestor, RequestorError, StaticToken,
    TransportError, TransportOutcome,
};
use tokio::runtime::Handle;

fn requestor_with(
    tokens: Arc<dyn stravakit::TokenProvider>,
    transport: &RecordingTransport,
) -> DefaultRequestor<RecordingTransport> {
    init_test_env();
    DefaultRequestor::with_transport(
        RequestorConfig::default(),
        tokens,
        transport.clone(),
        Handle::current(),
    )
}

#[tokio::test]
async fn test_get_params_go_to_query_string() {
    let transport = RecordingTransport::answering(TransportOutcome::payload("[]"));
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let params = params! { "page" => 3, "per_page" => 50, "before" => "1472680000" };

    requestor
        .execute(HttpMethod::GET, true, "/athlete/activities", Some(&params))
        .unwrap()
        .await
        .unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.method, HttpMethod::GET);
    assert_eq!(
        sent.url.as_str(),
        "https://www.strava.com/api/v3/athlete/activities?before=1472680000&page=3&per_page=50"
    );
    assert!(sent.body.is_none());
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_put_params_round_trip_through_body() {
    let transport = RecordingTransport::answering(TransportOutcome::payload("{}"));
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let params = params! { "a" => 1, "b" => "x" };

    requestor
        .execute(HttpMethod::PUT, true, "/athlete", Some(&params))
        .unwrap()
        .await
        .unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.url.query(), None);
    let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"a": 1, "b": "x"}));
}

#[tokio::test]
async fn test_post_sets_content_type_and_body() {
    let transport = RecordingTransport::answering(TransportOutcome::payload(r#"{"id":42}"#));
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let params = params! { "name" => "Lunch Ride", "type" => "Ride", "elapsed_time" => 3600 };

    let reply = requestor
        .execute(HttpMethod::POST, true, "/activities", Some(&params))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(reply.value, json!({"id": 42}));
    let sent = transport.last_request();
    assert_eq!(sent.method.as_str(), "POST");
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert!(sent.has_body());
}

#[tokio::test]
async fn test_missing_token_skips_network() {
    let transport = RecordingTransport::answering(TransportOutcome::payload("{}"));
    let requestor = requestor_with(Arc::new(SharedToken::new()), &transport);
    let (handler, mut recorder) = CallbackRecorder::new();

    let task = requestor.request(HttpMethod::GET, true, "/athlete", None, Some(handler));

    assert!(task.is_none());
    assert_eq!(recorder.count(), 1);
    let (response, error) = recorder.received.try_recv().unwrap();
    assert!(response.is_none());
    assert_eq!(error.unwrap().code(), ErrorCode::NoAccessToken);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_token_is_read_at_request_time() {
    let tokens = SharedToken::new();
    let transport = RecordingTransport::answering(TransportOutcome::payload("{}"));
    let requestor = requestor_with(Arc::new(tokens.clone()), &transport);

    let err = requestor
        .execute(HttpMethod::GET, true, "/athlete", None)
        .unwrap_err();
    assert_eq!(err, RequestorError::NoAccessToken);

    tokens.set("fresh-token");
    requestor
        .execute(HttpMethod::GET, true, "/athlete", None)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().header("Authorization"),
        Some("Bearer fresh-token")
    );
}

#[tokio::test]
async fn test_empty_payload_yields_empty_mapping() {
    let transport = RecordingTransport::answering(TransportOutcome::payload(Bytes::new()));
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let (handler, recorder) = CallbackRecorder::new();

    let task = requestor
        .request(HttpMethod::DELETE, true, "/activities/1", None, Some(handler))
        .expect("dispatched");
    task.await.unwrap();

    let (response, error) = recorder.received.await.unwrap();
    assert_eq!(response, Some(json!({})));
    assert!(error.is_none());
}

#[tokio::test]
async fn test_empty_payload_passes_transport_warning_through() {
    let warning = TransportError::HttpStatus {
        status: 503,
        reason: "Service Unavailable".to_string(),
    };
    let transport = RecordingTransport::answering(
        TransportOutcome::payload(Bytes::new()).with_error(warning.clone()),
    );
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let (handler, recorder) = CallbackRecorder::new();

    requestor
        .request(HttpMethod::GET, false, "/segments/1", None, Some(handler))
        .expect("dispatched")
        .await
        .unwrap();

    let (response, error) = recorder.received.await.unwrap();
    assert_eq!(response, Some(json!({})));
    assert_eq!(error, Some(RequestorError::Transport(warning)));
}

#[tokio::test]
async fn test_malformed_payload_is_invalid_response() {
    let transport = RecordingTransport::answering(
        TransportOutcome::payload("{not json").with_error(TransportError::Timeout),
    );
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let (handler, recorder) = CallbackRecorder::new();

    requestor
        .request(HttpMethod::GET, true, "/athlete", None, Some(handler))
        .expect("dispatched")
        .await
        .unwrap();

    let (response, error) = recorder.received.await.unwrap();
    assert!(response.is_none());
    assert_eq!(error.unwrap().code(), ErrorCode::InvalidResponse);
}

#[tokio::test]
async fn test_no_payload_and_no_error_is_no_response() {
    let transport = RecordingTransport::answering(TransportOutcome::default());
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);
    let (handler, recorder) = CallbackRecorder::new();

    requestor
        .request(HttpMethod::GET, true, "/athlete", None, Some(handler))
        .expect("dispatched")
        .await
        .unwrap();

    // The task has finished, so the callback count is final.
    assert_eq!(recorder.count(), 1);
    let (response, error) = recorder.received.await.unwrap();
    assert!(response.is_none());
    assert_eq!(error, Some(RequestorError::NoResponse { source: None }));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_json_fragment_payload() {
    let transport = RecordingTransport::answering(TransportOutcome::payload("true"));
    let requestor = requestor_with(Arc::new(StaticToken::new("t")), &transport);

    let reply = requestor
        .execute(HttpMethod::GET, false, "/ping", None)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(reply.value, json!(true));
}

/// Transport that never completes, for cancellation.
struct HangingTransport;

#[async_trait::async_trait]
impl stravakit::Transport for HangingTransport {
    async fn send(&self, _request: stravakit::PreparedRequest) -> TransportOutcome {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        TransportOutcome::default()
    }
}

#[tokio::test]
async fn test_cancelled_task_resolves_to_cancelled() {
    init_test_env();
    let requestor = DefaultRequestor::with_transport(
        RequestorConfig::default(),
        Arc::new(StaticToken::new("t")),
        HangingTransport,
        Handle::current(),
    );

    let task = requestor
        .execute(HttpMethod::GET, true, "/athlete", None)
        .unwrap();
    assert!(!task.request_id().is_empty());
    task.cancel();

    assert_eq!(task.await, Err(RequestorError::Cancelled));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_requests_are_independent() {
    let transport = RecordingTransport::answering(TransportOutcome::payload("{}"));
    let requestor = Arc::new(requestor_with(Arc::new(StaticToken::new("t")), &transport));

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let params = params! { "page" => i };
            requestor
                .execute(HttpMethod::GET, true, "/athlete/activities", Some(&params))
                .unwrap()
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(transport.calls(), 16);
}
