//! API route configuration.

use crate::api::handlers::{
    create_link_handler, invalidate_link_handler, list_links_handler, redirect_handler,
    stats_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Link lifecycle routes.
///
/// # Endpoints
///
/// - `POST /link`               - Create a short link
/// - `GET  /links`              - List every link
/// - `GET  /l/{id}`             - Redirect (`?password=` for protected links)
/// - `PUT  /l/{id}`             - Partially update a link
/// - `GET  /l/{id}/stats`       - Access statistics
/// - `PUT  /l/{id}/invalidate`  - Soft-invalidate a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link_handler))
        .route("/links", get(list_links_handler))
        .route("/l/{id}", get(redirect_handler).put(update_link_handler))
        .route("/l/{id}/stats", get(stats_handler))
        .route("/l/{id}/invalidate", put(invalidate_link_handler))
}
