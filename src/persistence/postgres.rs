//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::PostRow;
use super::{PostStore, StoreError};
use crate::config::GatewayConfig;
use crate::domain::{ListingOrder, Post, PostFields, PostId, PostStatus};

/// PostgreSQL-backed post store using `sqlx::PgPool`.
///
/// The pool is the one shared mutable resource of the process; it hands
/// out a connection per statement and is safe for concurrent use.
#[derive(Debug, Clone)]
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a lazily-connecting pool from the gateway configuration.
    ///
    /// No connection is opened until the first statement, so the server
    /// can start while the database is down.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if `DATABASE_URL` cannot be
    /// parsed.
    pub fn connect_lazy(config: &GatewayConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_lazy(&config.database_url)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn into_post(row: Option<PostRow>) -> Result<Option<Post>, StoreError> {
    row.map(Post::try_from).transpose()
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn insert(&self, fields: &PostFields, status: PostStatus) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (title, content, author, status, publish_date) \
             VALUES ($1, $2, $3, $4, CASE WHEN $4 = 'published' THEN now() END) \
             RETURNING id, title, content, author, status, created_at, publish_date",
        )
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(&fields.author)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Post::try_from(row)
    }

    async fn find_by_id(
        &self,
        id: PostId,
        scope: Option<PostStatus>,
    ) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, author, status, created_at, publish_date FROM posts \
             WHERE id = $1 AND ($2::text IS NULL OR status = $2)",
        )
        .bind(id.get())
        .bind(scope.map(PostStatus::as_str))
        .fetch_optional(&self.pool)
        .await?;

        into_post(row)
    }

    async fn list_by_status(&self, status: PostStatus) -> Result<Vec<Post>, StoreError> {
        let sql = match status.listing_order() {
            ListingOrder::PublishDate => {
                "SELECT id, title, content, author, status, created_at, publish_date FROM posts \
                 WHERE status = $1 ORDER BY publish_date DESC NULLS LAST, id DESC"
            }
            ListingOrder::CreatedAt => {
                "SELECT id, title, content, author, status, created_at, publish_date FROM posts \
                 WHERE status = $1 ORDER BY created_at DESC, id DESC"
            }
        };

        let rows = sqlx::query_as::<_, PostRow>(sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn update_status(
        &self,
        id: PostId,
        status: PostStatus,
    ) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts SET status = $2, \
             publish_date = CASE WHEN $2 = 'published' THEN COALESCE(publish_date, now()) \
                                 ELSE publish_date END \
             WHERE id = $1 \
             RETURNING id, title, content, author, status, created_at, publish_date",
        )
        .bind(id.get())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        into_post(row)
    }

    async fn update_content(
        &self,
        id: PostId,
        fields: &PostFields,
        scope: Option<PostStatus>,
    ) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts SET title = $2, content = $3, author = $4 \
             WHERE id = $1 AND ($5::text IS NULL OR status = $5) \
             RETURNING id, title, content, author, status, created_at, publish_date",
        )
        .bind(id.get())
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(&fields.author)
        .bind(scope.map(PostStatus::as_str))
        .fetch_optional(&self.pool)
        .await?;

        into_post(row)
    }

    async fn delete_by_id(
        &self,
        id: PostId,
        scope: Option<PostStatus>,
    ) -> Result<u64, StoreError> {
        let result =
            sqlx::query("DELETE FROM posts WHERE id = $1 AND ($2::text IS NULL OR status = $2)")
                .bind(id.get())
                .bind(scope.map(PostStatus::as_str))
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
