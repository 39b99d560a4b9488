//! DTOs for link creation, update and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /link`.
///
/// `expiresAt` is kept as raw text here and parsed by the handler, so a
/// malformed date surfaces as a `validation_error` rather than a body rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    pub password: Option<String>,

    /// ISO-8601 timestamp.
    pub expires_at: Option<String>,

    pub custom_short_id: Option<String>,
}

/// Request body for `PUT /l/{id}`.
///
/// All fields are optional, only provided fields are changed.
///
/// # `expiresAt` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear expiry (link never expires)
/// - **Timestamp** → set new expiry
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: Option<String>,

    pub password: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expires_at: Option<Option<String>>,

    pub is_active: Option<bool>,
}

/// Public representation of a link. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub short_id: String,
    pub original_url: String,
    pub password_protected: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            password_protected: link.is_password_protected(),
            short_id: link.short_id,
            original_url: link.original_url,
            expires_at: link.expires_at,
            click_count: link.click_count,
            is_active: link.is_active,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Response for `GET /links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkResponse>,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
