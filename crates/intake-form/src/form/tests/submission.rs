use super::common::*;
use std::sync::Arc;

use serde_json::Value;

use crate::form::outcome::SubmissionOutcome;
use crate::form::submission::TransportError;
use crate::form::validation::ValidationFailure;

#[tokio::test]
async fn ok_response_yields_success_with_body() {
    let transport = Arc::new(RecordingTransport::responding(200, "ok"));
    let pipeline = pipeline_with(transport.clone());

    let outcome = pipeline.run(valid_input()).await;

    assert_eq!(outcome, SubmissionOutcome::Success("ok".to_string()));
    assert_eq!(outcome.message(), "Response: ok");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1, "exactly one request per submission");
    let body: Value = serde_json::from_str(&requests[0]).expect("json body");
    let keys: Vec<&str> = body
        .as_object()
        .expect("object body")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 6);
    for key in ["fullName", "emailAddress", "mobileNumber", "dateOfBirth", "age", "gender"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(body["age"], 24);
}

#[tokio::test]
async fn any_2xx_status_is_success() {
    let transport = Arc::new(RecordingTransport::responding(201, "created"));
    let pipeline = pipeline_with(transport);

    assert!(pipeline.run(valid_input()).await.is_success());
}

#[tokio::test]
async fn server_errors_are_reported_with_status() {
    let transport = Arc::new(RecordingTransport::responding(500, ""));
    let pipeline = pipeline_with(transport.clone());

    let outcome = pipeline.run(valid_input()).await;

    assert_eq!(outcome, SubmissionOutcome::RejectedByServer(500));
    assert_eq!(outcome.message(), "Error: 500");
    assert_eq!(transport.requests().len(), 1, "no retry after rejection");
}

#[tokio::test]
async fn transport_errors_become_outcomes() {
    let transport = Arc::new(RecordingTransport::failing(TransportError::Connect(
        "connection refused".to_string(),
    )));
    let pipeline = pipeline_with(transport.clone());

    match pipeline.run(valid_input()).await {
        SubmissionOutcome::TransportFailure(detail) => {
            assert!(detail.contains("connection refused"), "{detail}")
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn validation_failures_never_reach_the_transport() {
    let transport = Arc::new(RecordingTransport::responding(200, "ok"));
    let pipeline = pipeline_with(transport.clone());
    let mut input = valid_input();
    input.mobile_number = "09123".to_string();

    let outcome = pipeline.run(input).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::ValidationFailure(ValidationFailure::InvalidMobileNumber)
    );
    assert_eq!(outcome.message(), "Invalid mobile number");
    assert!(transport.requests().is_empty());
}
