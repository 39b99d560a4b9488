//! Link lifecycle service: creation, redirect gating, mutation, invalidation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{Link, LinkPatch, LinkStats, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AccessDenial, AppError};
use crate::utils::code_generator::{generate_short_id, validate_custom_short_id};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::url_validator::validate_target_url;

/// Maximum number of generated identifiers tried before giving up.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Input for [`LinkService::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub original_url: String,
    pub password: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub custom_short_id: Option<String>,
}

/// Input for [`LinkService::update`]. `None` fields are left unchanged.
///
/// `expires_at: Some(None)` clears the expiry.
#[derive(Debug, Clone, Default)]
pub struct UpdateLink {
    pub original_url: Option<String>,
    pub password: Option<String>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

/// Service enforcing the business rules around links.
///
/// It is the sole client of the store and never keeps its own copy of a
/// record: every operation reads and writes through the repository.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a link.
    ///
    /// # Short Identifier
    ///
    /// - If `custom_short_id` is provided (and non-empty), validates it and
    ///   fails with a conflict if it is already in use
    /// - Otherwise, generates a random 8-character identifier, retrying up to
    ///   10 times on collision
    ///
    /// A non-empty `password` is stored as an Argon2id hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom identifier is invalid.
    /// Returns [`AppError::Conflict`] if the custom identifier already exists.
    pub async fn create(&self, input: CreateLink) -> Result<Link, AppError> {
        check_target_url(&input.original_url)?;

        let short_id = match input.custom_short_id.filter(|id| !id.is_empty()) {
            Some(custom) => {
                validate_custom_short_id(&custom)?;

                if self.repository.find_one(&custom).await?.is_some() {
                    return Err(AppError::conflict(
                        format!("Short id '{}' is already in use", custom),
                        json!({ "short_id": custom }),
                    ));
                }

                custom
            }
            None => self.generate_unique_short_id().await?,
        };

        let new_link = NewLink {
            short_id,
            original_url: input.original_url,
            password_hash: hash_if_present(input.password.as_deref())?,
            expires_at: input.expires_at,
        };

        let link = self.repository.create(new_link).await?;

        info!(
            short_id = %link.short_id,
            protected = link.is_password_protected(),
            expires_at = ?link.expires_at,
            "Link created"
        );

        Ok(link)
    }

    /// Lists every link.
    pub async fn find_all(&self) -> Result<Vec<Link>, AppError> {
        self.repository.find_all().await
    }

    /// Retrieves a link by its short identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn find_one(&self, short_id: &str) -> Result<Link, AppError> {
        self.repository
            .find_one(short_id)
            .await?
            .ok_or_else(|| link_not_found(short_id))
    }

    /// Resolves a short identifier to its redirect target.
    ///
    /// # Gating
    ///
    /// Checks run in order and the first failure wins:
    ///
    /// 1. The link must be active
    /// 2. The expiry, if set, must not lie in the past
    /// 3. If protected, a matching password must be supplied
    ///
    /// The click counter is incremented only after every gate passes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::AccessDenied`] with the failing gate's reason.
    pub async fn resolve_redirect(
        &self,
        short_id: &str,
        password: Option<&str>,
    ) -> Result<String, AppError> {
        let link = self.find_one(short_id).await?;

        if let Err(err) = check_access(&link, password, Utc::now()) {
            if let Some(reason) = err.denial() {
                warn!(short_id, reason = reason.code(), "Redirect denied");
            }
            return Err(err);
        }

        if !self.repository.increment_click_count(short_id).await? {
            return Err(link_not_found(short_id));
        }

        Ok(link.original_url)
    }

    /// Partially updates a link and returns it as stored afterwards.
    ///
    /// A new `password` is re-hashed; a new `original_url` is validated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::Validation`] if the new URL is invalid.
    pub async fn update(&self, short_id: &str, input: UpdateLink) -> Result<Link, AppError> {
        self.find_one(short_id).await?;

        if let Some(url) = &input.original_url {
            check_target_url(url)?;
        }

        let patch = LinkPatch {
            original_url: input.original_url,
            expires_at: input.expires_at,
            password_hash: hash_if_present(input.password.as_deref())?,
            is_active: input.is_active,
        };

        if !self.repository.update(short_id, patch).await? {
            return Err(link_not_found(short_id));
        }

        info!(short_id, "Link updated");

        self.find_one(short_id).await
    }

    /// Marks a link inactive without touching any other field.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn invalidate(&self, short_id: &str) -> Result<(), AppError> {
        self.find_one(short_id).await?;

        if !self
            .repository
            .update(short_id, LinkPatch::deactivate())
            .await?
        {
            return Err(link_not_found(short_id));
        }

        info!(short_id, "Link invalidated");

        Ok(())
    }

    /// Returns access statistics for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get_stats(&self, short_id: &str) -> Result<LinkStats, AppError> {
        Ok(self.find_one(short_id).await?.stats())
    }

    /// Reports whether the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    /// Generates a short identifier not yet present in the store.
    async fn generate_unique_short_id(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let short_id = generate_short_id().map_err(|e| {
                AppError::internal(
                    "Failed to generate short id",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            if self.repository.find_one(&short_id).await?.is_none() {
                return Ok(short_id);
            }

            warn!(short_id = %short_id, "Generated short id collided, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique short id",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

/// Applies the redirect gates in order.
fn check_access(link: &Link, password: Option<&str>, now: DateTime<Utc>) -> Result<(), AppError> {
    let deny = |reason| AppError::access_denied(reason, link.short_id.as_str());

    if !link.is_active {
        return Err(deny(AccessDenial::LinkInvalidated));
    }

    if link.is_expired_at(now) {
        return Err(deny(AccessDenial::LinkExpired));
    }

    if let Some(hash) = &link.password_hash {
        let supplied = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| deny(AccessDenial::PasswordRequired))?;

        let matches = verify_password(supplied, hash).map_err(|e| {
            AppError::internal(
                "Failed to verify password",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if !matches {
            return Err(deny(AccessDenial::IncorrectPassword));
        }
    }

    Ok(())
}

fn check_target_url(url: &str) -> Result<(), AppError> {
    validate_target_url(url).map_err(|e| {
        AppError::bad_request("Invalid URL", json!({ "url": url, "reason": e.to_string() }))
    })
}

/// Hashes a password; an absent or empty password means no protection.
fn hash_if_present(password: Option<&str>) -> Result<Option<String>, AppError> {
    match password {
        Some(p) if !p.is_empty() => hash_password(p).map(Some).map_err(|e| {
            AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
        }),
        _ => Ok(None),
    }
}

fn link_not_found(short_id: &str) -> AppError {
    AppError::not_found(
        format!("Link '{}' not found", short_id),
        json!({ "short_id": short_id }),
    )
}
