//! Repository trait for link storage.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for link records.
///
/// The store exclusively owns the canonical record and is responsible for its
/// own synchronization: writes to the same key must be serialized and
/// [`Self::increment_click_count`] must be a single indivisible operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - Process-local map
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Point lookup by short identifier. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_one(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a new link, stamping `created_at` and `updated_at`.
    ///
    /// The stored record starts active with a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short identifier is already present.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Merges the supplied fields into an existing record and re-stamps `updated_at`.
    ///
    /// Returns `Ok(false)` if no record matches `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, short_id: &str, patch: LinkPatch) -> Result<bool, AppError>;

    /// Atomically increases `click_count` by one and re-stamps `updated_at`.
    ///
    /// Returns `Ok(false)` if no record matches `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_click_count(&self, short_id: &str) -> Result<bool, AppError>;

    /// Lists every stored link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all(&self) -> Result<Vec<Link>, AppError>;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;
}
