//! Handler for short link redirect.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Query string accepted by the redirect endpoint.
#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub password: Option<String>,
}

/// Redirects a short identifier to its original URL.
///
/// # Endpoint
///
/// `GET /l/{id}?password=...`
///
/// # Request Flow
///
/// 1. Look up the link
/// 2. Apply the gates (active, expiry, password)
/// 3. Count the click
/// 4. Return 302 Found with `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the short id doesn't exist.
/// Returns 400 Bad Request with `link_invalidated`, `link_expired`,
/// `password_required` or `incorrect_password` when a gate refuses access.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    Query(query): Query<RedirectQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state
        .link_service
        .resolve_redirect(&short_id, query.password.as_deref())
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::NotFound { .. }) {
                tracing::warn!(short_id, "Redirect for unknown short id");
            }
        })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
