//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /link`, `GET /links`, `/l/{id}...` - Link lifecycle (see [`crate::api::routes`])
//! - `GET  /health`                           - Store health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings are rejected by the limiter.
pub fn app_router(state: AppState, config: &Config) -> anyhow::Result<NormalizePath<Router>> {
    let router = routes(state).layer(rate_limit::layer(
        config.rate_limit_per_second,
        config.rate_limit_burst,
    )?);

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Routes with tracing but without rate limiting.
///
/// The rate limiter keys on the peer address, which only exists when the
/// router is served with connect info; in-process clients use this instead.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::link_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}
