mod common;

use axum::http::StatusCode;
use link_masker::state::AppState;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_health_ok() {
    let server = common::make_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_store_unreachable() {
    let state = AppState::new(Arc::new(common::UnreachableStore));
    let server = common::make_server_with_state(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["store"]["status"], "error");
}

#[tokio::test]
async fn test_store_failure_maps_to_internal_error() {
    let state = AppState::new(Arc::new(common::UnreachableStore));
    let server = common::make_server_with_state(state);

    let response = server.get("/links").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "internal_error"
    );
}
