//! Link entity representing a masked URL and its access rules.

use chrono::{DateTime, Utc};

/// A short link with its gating rules and access counter.
///
/// `password_hash` holds an Argon2id PHC string, never a plaintext secret.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub short_id: String,
    pub original_url: String,
    pub password_hash: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Builds a freshly created link: active, zero clicks, both timestamps at `now`.
    pub fn from_new(new_link: NewLink, now: DateTime<Utc>) -> Self {
        Self {
            short_id: new_link.short_id,
            original_url: new_link.original_url,
            password_hash: new_link.password_hash,
            expires_at: new_link.expires_at,
            click_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if a password must be supplied to follow the link.
    pub fn is_password_protected(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Returns true if the expiry lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    /// Merges the supplied fields of `patch` and re-stamps `updated_at`.
    pub fn apply(&mut self, patch: LinkPatch, now: DateTime<Utc>) {
        if let Some(url) = patch.original_url {
            self.original_url = url;
        }
        if let Some(expires_at) = patch.expires_at {
            self.expires_at = expires_at;
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = Some(hash);
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        self.touch(now);
    }

    /// Adds one click and re-stamps `updated_at`.
    pub fn record_click(&mut self, now: DateTime<Utc>) {
        self.click_count += 1;
        self.touch(now);
    }

    /// `updated_at` never moves backwards, even if the wall clock does.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }

    /// Read-only statistics projection.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            click_count: self.click_count,
            created_at: self.created_at,
            expires_at: self.expires_at,
            is_active: self.is_active,
        }
    }
}

/// Input data for inserting a new link into a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub short_id: String,
    pub original_url: String,
    pub password_hash: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
/// `expires_at: Some(None)` clears the expiry; `Some(Some(t))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

impl LinkPatch {
    /// Patch that only marks the link inactive.
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }
}

/// Access statistics for a single link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStats {
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}
