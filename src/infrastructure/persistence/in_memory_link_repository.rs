//! Process-local link store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory repository keyed by short identifier.
///
/// Every mutation takes the write lock for its whole read-modify-write, so
/// concurrent increments on the same key are never lost. Contents do not
/// survive a restart.
#[derive(Default, Clone)]
pub struct InMemoryLinkRepository {
    links: Arc<RwLock<HashMap<String, Link>>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_one(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(short_id).cloned())
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.short_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "short_id": new_link.short_id }),
            ));
        }

        let link = Link::from_new(new_link, Utc::now());
        links.insert(link.short_id.clone(), link.clone());

        Ok(link)
    }

    async fn update(&self, short_id: &str, patch: LinkPatch) -> Result<bool, AppError> {
        let mut links = self.links.write().await;

        match links.get_mut(short_id) {
            Some(link) => {
                link.apply(patch, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_click_count(&self, short_id: &str) -> Result<bool, AppError> {
        let mut links = self.links.write().await;

        match links.get_mut(short_id) {
            Some(link) => {
                link.record_click(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_all(&self) -> Result<Vec<Link>, AppError> {
        let mut all: Vec<Link> = self.links.read().await.values().cloned().collect();

        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.short_id.cmp(&b.short_id))
        });

        Ok(all)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(short_id: &str) -> NewLink {
        NewLink {
            short_id: short_id.to_string(),
            original_url: "https://example.com".to_string(),
            password_hash: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryLinkRepository::new();

        let created = repo.create(new_link("abc123")).await.unwrap();
        let found = repo.find_one("abc123").await.unwrap().unwrap();

        assert_eq!(created, found);
        assert_eq!(found.click_count, 0);
        assert!(found.is_active);
        assert!(repo.find_one("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let repo = InMemoryLinkRepository::new();

        repo.create(new_link("abc123")).await.unwrap();
        let result = repo.create(new_link("abc123")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let repo = InMemoryLinkRepository::new();

        assert!(!repo.update("ghost", LinkPatch::deactivate()).await.unwrap());
        assert!(!repo.increment_click_count("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123")).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_click_count("abc123").await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        let link = repo.find_one("abc123").await.unwrap().unwrap();
        assert_eq!(link.click_count, 50);
    }
}
