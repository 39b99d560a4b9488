//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns access statistics for a short link.
///
/// # Endpoint
///
/// `GET /l/{id}/stats`
///
/// # Response
///
/// ```json
/// {
///   "clickCount": 42,
///   "createdAt": "2025-01-01T00:00:00Z",
///   "expiresAt": "2030-01-01T00:00:00Z",
///   "isActive": true
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short id doesn't exist.
pub async fn stats_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.get_stats(&short_id).await?;

    Ok(Json(stats.into()))
}
