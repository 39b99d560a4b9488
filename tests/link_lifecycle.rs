use chrono::{Duration, Utc};
use std::sync::Arc;

use link_masker::prelude::*;

fn service() -> Arc<LinkService<InMemoryLinkRepository>> {
    Arc::new(LinkService::new(Arc::new(InMemoryLinkRepository::new())))
}

fn input(url: &str, short_id: &str) -> CreateLink {
    CreateLink {
        original_url: url.to_string(),
        custom_short_id: Some(short_id.to_string()),
        ..CreateLink::default()
    }
}

#[tokio::test]
async fn test_full_lifecycle() {
    let svc = service();

    let link = svc
        .create(CreateLink {
            password: Some("secret".to_string()),
            expires_at: Some(Utc::now() + Duration::days(7)),
            ..input("https://example.com", "life01")
        })
        .await
        .unwrap();

    assert!(link.is_password_protected());
    assert_ne!(link.password_hash.as_deref(), Some("secret"));

    let url = svc
        .resolve_redirect("life01", Some("secret"))
        .await
        .unwrap();
    assert_eq!(url, "https://example.com");

    svc.invalidate("life01").await.unwrap();

    let err = svc
        .resolve_redirect("life01", Some("secret"))
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(AccessDenial::LinkInvalidated));

    let stats = svc.get_stats("life01").await.unwrap();
    assert_eq!(stats.click_count, 1);
    assert!(!stats.is_active);

    // Invalidation touched nothing else.
    let stored = svc.find_one("life01").await.unwrap();
    assert_eq!(stored.original_url, link.original_url);
    assert_eq!(stored.password_hash, link.password_hash);
    assert_eq!(stored.expires_at, link.expires_at);
    assert_eq!(stored.created_at, link.created_at);
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
async fn test_concurrent_resolutions_count_exactly() {
    let svc = service();
    svc.create(input("https://example.com", "hot001"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.resolve_redirect("hot001", None).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(svc.get_stats("hot001").await.unwrap().click_count, 64);
}

#[tokio::test]
async fn test_denied_resolutions_never_count() {
    let svc = service();
    svc.create(CreateLink {
        password: Some("secret".to_string()),
        ..input("https://example.com", "deny01")
    })
    .await
    .unwrap();

    for attempt in [None, Some(""), Some("nope")] {
        assert!(svc.resolve_redirect("deny01", attempt).await.is_err());
    }

    assert_eq!(svc.get_stats("deny01").await.unwrap().click_count, 0);
}

#[tokio::test]
async fn test_expired_link_still_listed() {
    let svc = service();
    svc.create(CreateLink {
        expires_at: Some(Utc::now() - Duration::minutes(1)),
        ..input("https://example.com", "past01")
    })
    .await
    .unwrap();

    let err = svc.resolve_redirect("past01", None).await.unwrap_err();
    assert_eq!(err.denial(), Some(AccessDenial::LinkExpired));

    let all = svc.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].short_id, "past01");
}

#[tokio::test]
async fn test_update_clears_expiry_and_rehashes_password() {
    let svc = service();
    svc.create(CreateLink {
        password: Some("old".to_string()),
        expires_at: Some(Utc::now() - Duration::minutes(1)),
        ..input("https://example.com", "upd001")
    })
    .await
    .unwrap();

    let updated = svc
        .update(
            "upd001",
            UpdateLink {
                password: Some("new".to_string()),
                expires_at: Some(None),
                ..UpdateLink::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.expires_at.is_none());

    let err = svc
        .resolve_redirect("upd001", Some("old"))
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(AccessDenial::IncorrectPassword));

    assert!(svc.resolve_redirect("upd001", Some("new")).await.is_ok());
}

#[tokio::test]
async fn test_generated_ids_are_unique_and_url_safe() {
    let svc = service();

    let mut ids = std::collections::HashSet::new();
    for _ in 0..100 {
        let link = svc
            .create(CreateLink {
                original_url: "https://example.com".to_string(),
                ..CreateLink::default()
            })
            .await
            .unwrap();

        assert_eq!(link.short_id.len(), 8);
        assert!(
            link.short_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        ids.insert(link.short_id);
    }

    assert_eq!(ids.len(), 100);
}

#[tokio::test]
async fn test_operations_on_missing_link() {
    let svc = service();

    assert!(matches!(
        svc.find_one("ghost").await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        svc.resolve_redirect("ghost", None).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        svc.update("ghost", UpdateLink::default()).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        svc.invalidate("ghost").await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        svc.get_stats("ghost").await,
        Err(AppError::NotFound { .. })
    ));
}
