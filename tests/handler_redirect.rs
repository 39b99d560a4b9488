mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn click_count(server: &axum_test::TestServer, short_id: &str) -> i64 {
    server
        .get(&format!("/l/{}/stats", short_id))
        .await
        .json::<Value>()["clickCount"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let server = common::make_server();
    common::create_link(
        &server,
        json!({ "originalUrl": "https://www.ejemplo.com/pagina", "customShortId": "abc123" }),
    )
    .await;

    let response = server.get("/l/abc123").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        "https://www.ejemplo.com/pagina"
    );
    assert_eq!(click_count(&server, "abc123").await, 1);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::make_server();

    let response = server.get("/l/nonexistent").await;

    response.assert_status_not_found();
    assert_eq!(common::error_code(&response.json::<Value>()), "not_found");
}

#[tokio::test]
async fn test_redirect_invalidated_link() {
    let server = common::make_server();
    common::create_simple_link(&server, "gone01").await;
    server.put("/l/gone01/invalidate").await.assert_status_ok();

    let response = server.get("/l/gone01").await;

    response.assert_status_bad_request();
    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "link_invalidated"
    );
    assert_eq!(click_count(&server, "gone01").await, 0);
}

#[tokio::test]
async fn test_redirect_expired_link() {
    let server = common::make_server();
    common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com",
            "customShortId": "old001",
            "expiresAt": "2020-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = server.get("/l/old001").await;

    response.assert_status_bad_request();
    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "link_expired"
    );
    assert_eq!(click_count(&server, "old001").await, 0);
}

#[tokio::test]
async fn test_redirect_password_gates() {
    let server = common::make_server();
    common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com/private",
            "customShortId": "lock01",
            "password": "secret"
        }),
    )
    .await;

    let missing = server.get("/l/lock01").await;
    missing.assert_status_bad_request();
    assert_eq!(
        common::error_code(&missing.json::<Value>()),
        "password_required"
    );

    let empty = server.get("/l/lock01").add_query_param("password", "").await;
    assert_eq!(
        common::error_code(&empty.json::<Value>()),
        "password_required"
    );

    let wrong = server
        .get("/l/lock01")
        .add_query_param("password", "wrongpassword")
        .await;
    wrong.assert_status_bad_request();
    assert_eq!(
        common::error_code(&wrong.json::<Value>()),
        "incorrect_password"
    );

    assert_eq!(click_count(&server, "lock01").await, 0);

    let ok = server
        .get("/l/lock01")
        .add_query_param("password", "secret")
        .await;
    ok.assert_status(StatusCode::FOUND);
    assert_eq!(ok.header("location"), "https://example.com/private");

    assert_eq!(click_count(&server, "lock01").await, 1);
}

#[tokio::test]
async fn test_redirect_invalidated_reported_before_expired() {
    let server = common::make_server();
    common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com",
            "customShortId": "both01",
            "expiresAt": "2020-01-01",
            "password": "secret"
        }),
    )
    .await;
    server.put("/l/both01/invalidate").await.assert_status_ok();

    let response = server.get("/l/both01").await;

    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "link_invalidated"
    );
}

#[tokio::test]
async fn test_redirect_follows_updated_target() {
    let server = common::make_server();
    common::create_simple_link(&server, "move01").await;

    server
        .put("/l/move01")
        .json(&json!({ "originalUrl": "https://moved.example.com" }))
        .await
        .assert_status_ok();

    let response = server.get("/l/move01").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://moved.example.com");
}
