mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_stats_new_link() {
    let server = common::make_server();
    common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com",
            "customShortId": "stat01",
            "expiresAt": "2099-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = server.get("/l/stat01/stats").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["clickCount"], 0);
    assert_eq!(body["isActive"], true);
    assert_eq!(body["expiresAt"], "2099-01-01T00:00:00Z");
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_stats_counts_successful_redirects() {
    let server = common::make_server();
    common::create_simple_link(&server, "stat02").await;

    for _ in 0..3 {
        server.get("/l/stat02").await;
    }

    let body = server.get("/l/stat02/stats").await.json::<Value>();
    assert_eq!(body["clickCount"], 3);
}

#[tokio::test]
async fn test_stats_reflect_invalidation() {
    let server = common::make_server();
    common::create_simple_link(&server, "stat03").await;
    server.put("/l/stat03/invalidate").await.assert_status_ok();

    let body = server.get("/l/stat03/stats").await.json::<Value>();

    assert_eq!(body["isActive"], false);
    assert!(body.get("expiresAt").is_none());
}

#[tokio::test]
async fn test_stats_not_found() {
    let server = common::make_server();

    let response = server.get("/l/nonexistent/stats").await;

    response.assert_status_not_found();
}
