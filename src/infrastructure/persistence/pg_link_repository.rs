//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "short_id, original_url, password_hash, expires_at, click_count, \
                            is_active, created_at, updated_at";

#[derive(FromRow)]
struct LinkRow {
    short_id: String,
    original_url: String,
    password_hash: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            short_id: row.short_id,
            original_url: row.original_url,
            password_hash: row.password_hash,
            expires_at: row.expires_at,
            click_count: row.click_count,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses bound parameters for SQL injection protection. Click increments are a
/// single `UPDATE ... SET click_count = click_count + 1`, so the row lock
/// serializes concurrent redirects.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_one(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_id = $1"
        ))
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (short_id, original_url, password_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.short_id)
        .bind(&new_link.original_url)
        .bind(&new_link.password_hash)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, short_id: &str, patch: LinkPatch) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links SET
                original_url  = COALESCE($2::text, original_url),
                expires_at    = CASE WHEN $3 THEN $4::timestamptz ELSE expires_at END,
                password_hash = COALESCE($5::text, password_hash),
                is_active     = COALESCE($6::boolean, is_active),
                updated_at    = GREATEST(NOW(), updated_at)
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .bind(patch.original_url)
        .bind(patch.expires_at.is_some())
        .bind(patch.expires_at.flatten())
        .bind(patch.password_hash)
        .bind(patch.is_active)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_click_count(&self, short_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1,
                updated_at  = GREATEST(NOW(), updated_at)
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, short_id ASC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
