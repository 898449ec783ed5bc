//! Postgres storage backend.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Category, NewComment, NewPost, Storage, StorageError, StoredComment};

/// Content storage backed by the host application's Postgres database.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn create_post(&self, post: &NewPost) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, title, body, status, published_at, category_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            "#,
        )
        .bind(id)
        .bind(post.author_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.status.as_str())
        .bind(post.published_at)
        .bind(post.category_id)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn set_post_tags(&self, post_id: Uuid, tags: &[String]) -> Result<(), StorageError> {
        for tag in tags {
            // Upsert keeps existing tag rows; the no-op update makes
            // RETURNING yield the id either way.
            let tag_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO tags (name) VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id
                "#,
            )
            .bind(tag)
            .fetch_one(&self.pool)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO post_tags (post_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT (post_id, tag_id) DO NOTHING
                "#,
            )
            .bind(post_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_name, author_email, author_url, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(comment.post_id)
        .bind(&comment.author_name)
        .bind(&comment.author_email)
        .bind(&comment.author_url)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn comments_by_author_email(
        &self,
        email: &str,
    ) -> Result<Vec<StoredComment>, StorageError> {
        let comments = sqlx::query_as(
            r#"
            SELECT id, post_id, author_name, author_email, author_url, body, created_at
            FROM comments
            WHERE author_email = $1
            ORDER BY created_at
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let categories = sqlx::query_as(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
