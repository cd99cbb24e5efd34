use std::sync::Arc;

use cfn_resource_core::contract::ResponseStatus;
use cfn_resource_lambda::invocation::{invocation_context, HandlerKind, HandlerRuntime};
use lambda_runtime::{Config, Context, LambdaEvent};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const LOG_STREAM: &str = "2026/10/16/[$LATEST]entry0001";

fn lambda_context() -> Context {
    let mut context = Context::default();
    context.request_id = "entry-lambda-request".to_string();
    context.env_config = Arc::new(Config {
        function_name: "entry-stack-Handler-Z9".to_string(),
        log_stream: LOG_STREAM.to_string(),
        ..Config::default()
    });
    context
}

fn payload_for(server: &MockServer, request_type: &str) -> Value {
    json!({
        "RequestType": request_type,
        "ResponseURL": format!("{}/cfn-response/entry", server.uri()),
        "StackId": "arn:aws:cloudformation:eu-central-1:777788889999:stack/entry-stack/1234abcd",
        "RequestId": "entry-request-1",
        "LogicalResourceId": "EntryResource",
        "ServiceToken": "arn:aws:lambda:eu-central-1:777788889999:function:entry-stack-Handler-Z9",
        "ResourceProperties": {"SystemInput": "sys", "UserInput": "usr"}
    })
}

fn no_settings(_key: &str) -> Option<String> {
    None
}

async fn mount_callback(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path("/cfn-response/entry"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;
}

async fn puts(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording should be enabled")
        .into_iter()
        .filter(|request| request.method.as_str() == "PUT")
        .collect()
}

fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("body should be JSON")
}

#[test]
fn context_maps_request_id_log_stream_and_function_name() {
    let context = invocation_context(&lambda_context());

    assert_eq!(context.aws_request_id, "entry-lambda-request");
    assert_eq!(context.log_stream_name, LOG_STREAM);
    assert_eq!(context.function_name, "entry-stack-Handler-Z9");
}

#[tokio::test]
async fn undecodable_payload_is_a_lambda_error_without_callback() {
    let server = MockServer::start().await;
    let runtime = HandlerRuntime::from_lookup(Ok(HandlerKind::Skeleton), no_settings)
        .expect("runtime should build");

    let payload = json!({
        "RequestType": "Create",
        "ResponseURL": format!("{}/cfn-response/entry", server.uri())
    });
    let error = runtime
        .handle(LambdaEvent::new(payload, lambda_context()))
        .await
        .expect_err("payload without identifiers should fail");

    assert!(error.to_string().starts_with("invalid custom resource event"));
    assert!(puts(&server).await.is_empty());
}

#[tokio::test]
async fn valid_payload_puts_once_with_log_stream_as_physical_id() {
    let server = MockServer::start().await;
    mount_callback(&server).await;
    let runtime = HandlerRuntime::from_lookup(Ok(HandlerKind::EventContext), no_settings)
        .expect("runtime should build");

    let summary = runtime
        .handle(LambdaEvent::new(
            payload_for(&server, "Create"),
            lambda_context(),
        ))
        .await
        .expect("valid payload should be handled");

    assert_eq!(summary.status, ResponseStatus::Success);
    assert_eq!(summary.callback_status_code, Some(200));

    let requests = puts(&server).await;
    assert_eq!(requests.len(), 1);
    let body = body_of(&requests[0]);
    assert_eq!(body["PhysicalResourceId"], LOG_STREAM);
    assert_eq!(body["Data"]["ContextRequestID"], "entry-lambda-request");
}

#[tokio::test]
async fn bad_configuration_is_reported_as_one_failed_put() {
    let server = MockServer::start().await;
    mount_callback(&server).await;
    let runtime = HandlerRuntime::from_lookup("Skeleton".parse::<HandlerKind>(), no_settings)
        .expect("runtime should build despite the bad handler name");

    let summary = runtime
        .handle(LambdaEvent::new(
            payload_for(&server, "Update"),
            lambda_context(),
        ))
        .await
        .expect("decoded payload should be reported, not raised");

    assert_eq!(summary.status, ResponseStatus::Failed);
    let requests = puts(&server).await;
    assert_eq!(requests.len(), 1);
    let body = body_of(&requests[0]);
    assert_eq!(body["Status"], "FAILED");
    assert_eq!(body["RequestId"], "entry-request-1");
    assert!(body["Reason"]
        .as_str()
        .expect("reason should be a string")
        .contains("unknown custom resource handler 'Skeleton'"));
}

#[tokio::test]
async fn bad_configuration_still_lets_deletes_succeed() {
    let server = MockServer::start().await;
    mount_callback(&server).await;
    let runtime = HandlerRuntime::from_lookup(Ok(HandlerKind::RandomWord), |key: &str| {
        (key == "RANDOM_WORD_TIMEOUT_MS").then(|| "soon".to_string())
    })
    .expect("runtime should build");
    assert!(runtime.setup_error().is_some());

    let summary = runtime
        .handle(LambdaEvent::new(
            payload_for(&server, "Delete"),
            lambda_context(),
        ))
        .await
        .expect("delete should be handled");

    assert_eq!(summary.status, ResponseStatus::Success);
    let requests = puts(&server).await;
    assert_eq!(requests.len(), 1);
    let body = body_of(&requests[0]);
    assert_eq!(body["Reason"], "CloudFormation Delete Request");
    assert_eq!(body["Data"]["Result"], "E-R-R-O-R");
}

#[tokio::test]
async fn random_word_runtime_reads_word_api_from_settings() {
    let server = MockServer::start().await;
    mount_callback(&server).await;
    Mock::given(method("GET"))
        .and(path("/word"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[\"cobalt\"]"))
        .expect(1)
        .mount(&server)
        .await;
    let word_url = format!("{}/word?number=1", server.uri());
    let runtime = HandlerRuntime::from_lookup(Ok(HandlerKind::RandomWord), move |key: &str| {
        (key == "RANDOM_WORD_API_URL").then(|| word_url.clone())
    })
    .expect("runtime should build");

    runtime
        .handle(LambdaEvent::new(
            payload_for(&server, "Create"),
            lambda_context(),
        ))
        .await
        .expect("valid payload should be handled");

    let requests = puts(&server).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(body_of(&requests[0])["Data"]["Result"], "cobalt");
}
