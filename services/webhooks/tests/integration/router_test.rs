use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use franquia_webhooks::domain::signing::SignatureScheme;
use franquia_webhooks::infra::http::ReqwestWebhookSender;
use franquia_webhooks::router::build_router;
use franquia_webhooks::state::AppState;

/// Router backed by a disconnected database: any store access fails with a 500.
fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        sender: ReqwestWebhookSender::new(None).unwrap(),
        signature_scheme: SignatureScheme::default(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_return_400_when_topic_missing() {
    let server = test_server();

    let response = server
        .post("/webhooks/dispatch")
        .json(&json!({"payload": {"id": 1}}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "topic e payload são obrigatórios");
}

#[tokio::test]
async fn should_return_400_when_payload_null() {
    let server = test_server();

    let response = server
        .post("/webhooks/dispatch")
        .json(&json!({"topic": "franqueados.updated", "payload": null}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "topic e payload são obrigatórios");
}

#[tokio::test]
async fn should_return_500_with_message_when_store_unavailable() {
    let server = test_server();

    let response = server
        .post("/webhooks/dispatch")
        .json(&json!({"topic": "franqueados.updated", "payload": {"id": 1}}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INTERNAL");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("find deliverable webhook subscriptions"),
        "unexpected error body: {body}"
    );
}

#[tokio::test]
async fn should_answer_cors_preflight_without_body() {
    let server = test_server();

    let response = server.method(Method::OPTIONS, "/webhooks/dispatch").await;

    response.assert_status_ok();
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    let allowed = headers
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "{name} missing from {allowed}");
    }
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn should_reject_invalid_endpoint_before_storing() {
    let server = test_server();

    let response = server
        .post("/webhooks/subscriptions")
        .json(&json!({"endpoint_url": "not a url", "topic": "generic"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_ENDPOINT_URL");
}

#[tokio::test]
async fn should_return_missing_data_for_empty_patch() {
    let server = test_server();

    let response = server
        .patch("/webhooks/subscriptions/0190a6b2-0000-7000-8000-000000000001")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let server = test_server();

    let response = server.get("/healthz").await;

    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = test_server();

    let response = server.get("/readyz").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_return_invalid_body_when_subscription_field_missing() {
    let server = test_server();

    let response = server
        .post("/webhooks/subscriptions")
        .json(&json!({"topic": "generic"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_BODY");
    assert!(
        body["error"].as_str().unwrap().contains("endpoint_url"),
        "unexpected error body: {body}"
    );
}

#[tokio::test]
async fn should_return_invalid_body_for_non_json_patch() {
    let server = test_server();

    let response = server
        .patch("/webhooks/subscriptions/0190a6b2-0000-7000-8000-000000000001")
        .text("enabled=false")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_BODY");
}

#[tokio::test]
async fn should_return_invalid_parameter_for_malformed_id() {
    let server = test_server();

    let patched = server
        .patch("/webhooks/subscriptions/not-a-uuid")
        .json(&json!({"enabled": false}))
        .await;
    let deleted = server.delete("/webhooks/subscriptions/not-a-uuid").await;
    let listed = server
        .get("/webhooks/subscriptions/not-a-uuid/deliveries")
        .await;

    for response in [patched, deleted, listed] {
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["kind"], "INVALID_PARAMETER");
    }
}

#[tokio::test]
async fn should_return_invalid_parameter_for_malformed_page() {
    let server = test_server();

    let response = server
        .get("/webhooks/subscriptions/0190a6b2-0000-7000-8000-000000000001/deliveries?per-page=many")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_PARAMETER");
}
