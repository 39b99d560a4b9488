#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use link_masker::domain::entities::{Link, LinkPatch, NewLink};
use link_masker::domain::repositories::LinkRepository;
use link_masker::error::AppError;
use link_masker::infrastructure::persistence::InMemoryLinkRepository;
use link_masker::routes::routes;
use link_masker::state::AppState;

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(InMemoryLinkRepository::new()))
}

pub fn make_server() -> TestServer {
    make_server_with_state(create_test_state())
}

pub fn make_server_with_state(state: AppState) -> TestServer {
    TestServer::new(routes(state)).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, body: Value) -> Value {
    let response = server.post("/link").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn create_simple_link(server: &TestServer, short_id: &str) -> Value {
    create_link(
        server,
        json!({ "originalUrl": "https://example.com", "customShortId": short_id }),
    )
    .await
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

/// Store whose backend is unreachable: health checks fail, every operation errors.
pub struct UnreachableStore;

#[async_trait]
impl LinkRepository for UnreachableStore {
    async fn find_one(&self, _short_id: &str) -> Result<Option<Link>, AppError> {
        Err(unreachable_error())
    }

    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unreachable_error())
    }

    async fn update(&self, _short_id: &str, _patch: LinkPatch) -> Result<bool, AppError> {
        Err(unreachable_error())
    }

    async fn increment_click_count(&self, _short_id: &str) -> Result<bool, AppError> {
        Err(unreachable_error())
    }

    async fn find_all(&self) -> Result<Vec<Link>, AppError> {
        Err(unreachable_error())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn unreachable_error() -> AppError {
    AppError::internal("Database error", json!({}))
}
