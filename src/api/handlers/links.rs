//! Handlers for link management endpoints (create, list, update, invalidate).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, LinkListResponse, LinkResponse, MessageResponse, UpdateLinkRequest,
};
use crate::application::services::{CreateLink, UpdateLink};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::timestamp::parse_timestamp;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /link`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "password": "secret",             // optional
///   "expiresAt": "2030-12-31T23:59:59Z", // optional
///   "customShortId": "my-link"        // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or the custom id is taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let expires_at = payload.expires_at.as_deref().map(parse_expiry).transpose()?;

    let link = state
        .link_service
        .create(CreateLink {
            original_url: payload.original_url,
            password: payload.password,
            expires_at,
            custom_short_id: payload.custom_short_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.find_all().await?;

    Ok(Json(LinkListResponse {
        items: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Partially updates a short link.
///
/// # Endpoint
///
/// `PUT /l/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// {
///   "originalUrl": "https://new-destination.com",
///   "password": "new-secret",
///   "expiresAt": "2026-12-31T23:59:59Z",  // null to clear
///   "isActive": true
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_link_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let expires_at = match payload.expires_at {
        Some(Some(raw)) => Some(Some(parse_expiry(&raw)?)),
        Some(None) => Some(None),
        None => None,
    };

    let link = state
        .link_service
        .update(
            &short_id,
            UpdateLink {
                original_url: payload.original_url,
                password: payload.password,
                expires_at,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(link.into()))
}

/// Soft-invalidates a short link.
///
/// # Endpoint
///
/// `PUT /l/{id}/invalidate`
///
/// # Behavior
///
/// The record is kept and stays listable; subsequent redirects are refused
/// with `link_invalidated`. An update with `"isActive": true` re-enables it.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn invalidate_link_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.invalidate(&short_id).await?;

    Ok(Json(MessageResponse {
        message: format!("Link '{}' has been invalidated", short_id),
    }))
}

fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, AppError> {
    parse_timestamp(raw).map_err(|e| {
        AppError::bad_request(
            "Invalid expiresAt",
            json!({ "expiresAt": raw, "reason": e.to_string() }),
        )
    })
}
