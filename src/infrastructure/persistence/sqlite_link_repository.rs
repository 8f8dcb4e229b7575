//! SQLite implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// SQLite repository for link storage and retrieval.
///
/// Uniqueness of `original_url` and `short_code` is enforced by the table's
/// UNIQUE constraints; a rejected insert surfaces as [`StoreError::Duplicate`].
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    is_custom: bool,
    created_at: DateTime<Utc>,
    click_count: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.original_url,
            r.short_code,
            r.is_custom,
            r.created_at,
            r.click_count,
        )
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, is_custom, created_at, click_count
            FROM links
            WHERE original_url = ?1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, is_custom, created_at, click_count
            FROM links
            WHERE short_code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_url, short_code, is_custom, created_at, click_count)
            VALUES (?1, ?2, ?3, ?4, 0)
            RETURNING id, original_url, short_code, is_custom, created_at, click_count
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.is_custom)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<LinkSummary>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, String)>(
            r#"
            SELECT id, original_url, short_code
            FROM links
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, original_url, short_code)| LinkSummary {
                id,
                original_url,
                short_code,
            })
            .collect())
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingLink(id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
