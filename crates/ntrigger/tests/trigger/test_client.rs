use crate::helpers::{sample_request, spawn_mock_api};
use axum::http::StatusCode;
use nbjob_common::jobs::{JobsApiError, JobsClient, RunId, RunOutput};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn client_for(address: &str) -> JobsClient {
    JobsClient::new(address, "test-token".to_string(), Duration::from_secs(5), 0).unwrap()
}

#[tokio::test]
async fn submit_run_returns_run_id() {
    let mock = spawn_mock_api(StatusCode::OK, json!({"run_id": 42}), json!({})).await;
    let client = client_for(&mock.address);

    let run_id = client.submit_run(&sample_request()).await.unwrap();

    assert_eq!(run_id, RunId(42));
}

#[tokio::test]
async fn submit_run_sends_bearer_token_and_payload() {
    let mock = spawn_mock_api(StatusCode::OK, json!({"run_id": 1}), json!({})).await;
    let client = client_for(&mock.address);

    client.submit_run(&sample_request()).await.unwrap();

    let submits = mock.state.submits.lock().unwrap();
    assert_eq!(submits.len(), 1);
    assert_eq!(submits[0].authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(submits[0].body["run_name"], "just_a_run");
    assert_eq!(submits[0].body["existing_cluster_id"], "0423-212957-vl2qhpwd");
    assert_eq!(
        submits[0].body["notebook_task"]["base_parameters"]["list1"],
        "['customer']"
    );
}

#[tokio::test]
async fn submit_run_rejects_missing_run_id() {
    let mock = spawn_mock_api(StatusCode::OK, json!({"number_in_job": 7}), json!({})).await;
    let client = client_for(&mock.address);

    let result = client.submit_run(&sample_request()).await;

    assert!(matches!(result, Err(JobsApiError::MissingRunId { .. })));
}

#[tokio::test]
async fn submit_run_propagates_error_status() {
    let mock = spawn_mock_api(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error_code": "INTERNAL_ERROR"}),
        json!({}),
    )
    .await;
    let client = client_for(&mock.address);

    let result = client.submit_run(&sample_request()).await;

    match result {
        Err(JobsApiError::InvalidStatus { status, .. }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("Expected InvalidStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn get_run_output_queries_by_run_id() {
    let output = json!({"notebook_output": {"result": "done", "truncated": false}});
    let mock = spawn_mock_api(StatusCode::OK, json!({"run_id": 42}), output.clone()).await;
    let client = client_for(&mock.address);

    let result = client.get_run_output(RunId(42)).await.unwrap();

    assert_eq!(result, RunOutput(output));
    let output_requests = mock.state.output_requests.lock().unwrap();
    assert_eq!(*output_requests, vec!["42".to_string()]);
}

#[tokio::test]
async fn request_failure_surfaces_as_error() {
    // bind and drop a listener so the port is free but nothing listens
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = client_for(&address);
    let result = client.submit_run(&sample_request()).await;

    assert!(matches!(result, Err(JobsApiError::RequestFailed { .. })));
}

/// Listener that accepts connections, counts them and closes them right
/// away, so every request fails at the transport level.
async fn spawn_connection_dropping_listener() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    let attempts = Arc::new(AtomicUsize::new(0));

    let counter = attempts.clone();
    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });

    (address, attempts)
}

#[tokio::test]
async fn get_run_output_retries_transport_failures_up_to_the_bound() {
    let (address, attempts) = spawn_connection_dropping_listener().await;
    let client = JobsClient::new(
        &address,
        "test-token".to_string(),
        Duration::from_secs(5),
        2,
    )
    .unwrap();

    let result = client.get_run_output(RunId(42)).await;

    assert!(matches!(result, Err(JobsApiError::RequestFailed { .. })));
    // the initial attempt plus two retries
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn submit_run_is_never_retried() {
    let (address, attempts) = spawn_connection_dropping_listener().await;
    let client = JobsClient::new(
        &address,
        "test-token".to_string(),
        Duration::from_secs(5),
        2,
    )
    .unwrap();

    let result = client.submit_run(&sample_request()).await;

    assert!(matches!(result, Err(JobsApiError::RequestFailed { .. })));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn requests_time_out_against_a_stalled_server() {
    // accept connections and hold them open without ever answering
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let mut streams = Vec::new();
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            streams.push(stream);
        }
    });

    let client = JobsClient::new(
        &address,
        "test-token".to_string(),
        Duration::from_millis(250),
        0,
    )
    .unwrap();

    let result = client.submit_run(&sample_request()).await;

    match result {
        Err(JobsApiError::RequestFailed { source, .. }) => assert!(source.is_timeout()),
        other => panic!("Expected a timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_base_url_is_rejected() {
    let client = JobsClient::new(
        "not a url",
        "test-token".to_string(),
        Duration::from_secs(5),
        0,
    )
    .unwrap();

    let result = client.submit_run(&sample_request()).await;

    assert!(matches!(result, Err(JobsApiError::InvalidEndpoint { .. })));
}
