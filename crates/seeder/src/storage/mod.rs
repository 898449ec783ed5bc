//! The content storage gateway: the host application's post, comment, and
//! tag persistence APIs, behind a trait so the seeder can run against
//! Postgres or an in-memory backend.

pub mod memory;
pub mod pg;

pub use memory::MemoryStorage;
pub use pg::PgStorage;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
        }
    }
}

/// A post ready for insertion. Ownership transfers to the host application
/// on creation; the seeder manages no further lifecycle.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    pub published_at: OffsetDateTime,
    pub category_id: Option<i64>,
}

/// A comment ready for insertion.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub author_url: String,
    pub body: String,
    pub created_at: OffsetDateTime,
}

/// A persisted post, as kept by the in-memory backend.
#[derive(Debug, Clone)]
pub struct StoredPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    pub published_at: OffsetDateTime,
    pub category_id: Option<i64>,
}

/// A persisted comment, as read back for cleanup.
#[derive(Debug, Clone, FromRow)]
pub struct StoredComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub author_url: String,
    pub body: String,
    pub created_at: OffsetDateTime,
}

/// A category posts can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Persistence operations the seeder consumes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persists a post and returns its id.
    async fn create_post(&self, post: &NewPost) -> Result<Uuid, StorageError>;

    /// Attaches tags to a post, creating tags that do not exist yet.
    async fn set_post_tags(&self, post_id: Uuid, tags: &[String]) -> Result<(), StorageError>;

    /// Persists a comment and returns its id.
    async fn create_comment(&self, comment: &NewComment) -> Result<Uuid, StorageError>;

    /// Returns all comments with the given author email.
    async fn comments_by_author_email(
        &self,
        email: &str,
    ) -> Result<Vec<StoredComment>, StorageError>;

    /// Deletes a comment; returns whether a row was actually removed.
    async fn delete_comment(&self, id: Uuid) -> Result<bool, StorageError>;

    /// Lists all categories, for the admin form's dropdown.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;
}
