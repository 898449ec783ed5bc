//! In-memory storage backend for tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{Category, NewComment, NewPost, Storage, StorageError, StoredComment, StoredPost};

/// A [`Storage`] implementation holding everything in memory.
///
/// Used by the seeding tests to assert exact post/comment counts without a
/// database, and to inject persistence failures partway through a run.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    posts: Mutex<Vec<StoredPost>>,
    comments: Mutex<Vec<StoredComment>>,
    post_tags: Mutex<HashMap<Uuid, Vec<String>>>,
    categories: Vec<Category>,
    fail_posts_after: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the category list served by `list_categories`.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    /// Makes every `create_post` call after the first `n` successful ones
    /// fail, to exercise partial-failure reporting.
    pub fn fail_posts_after(mut self, n: usize) -> Self {
        self.fail_posts_after = Some(n);
        self
    }

    pub fn posts(&self) -> Vec<StoredPost> {
        self.posts.lock().expect("storage mutex poisoned").clone()
    }

    pub fn comments(&self) -> Vec<StoredComment> {
        self.comments
            .lock()
            .expect("storage mutex poisoned")
            .clone()
    }

    pub fn tags_for(&self, post_id: Uuid) -> Vec<String> {
        self.post_tags
            .lock()
            .expect("storage mutex poisoned")
            .get(&post_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_post(&self, post: &NewPost) -> Result<Uuid, StorageError> {
        let mut posts = self.posts.lock().expect("storage mutex poisoned");

        if let Some(limit) = self.fail_posts_after {
            if posts.len() >= limit {
                return Err(StorageError::Backend(format!(
                    "simulated failure after {limit} posts"
                )));
            }
        }

        let id = Uuid::new_v4();
        posts.push(StoredPost {
            id,
            author_id: post.author_id,
            title: post.title.clone(),
            body: post.body.clone(),
            status: post.status,
            published_at: post.published_at,
            category_id: post.category_id,
        });
        Ok(id)
    }

    async fn set_post_tags(&self, post_id: Uuid, tags: &[String]) -> Result<(), StorageError> {
        self.post_tags
            .lock()
            .expect("storage mutex poisoned")
            .insert(post_id, tags.to_vec());
        Ok(())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        self.comments
            .lock()
            .expect("storage mutex poisoned")
            .push(StoredComment {
                id,
                post_id: comment.post_id,
                author_name: comment.author_name.clone(),
                author_email: comment.author_email.clone(),
                author_url: comment.author_url.clone(),
                body: comment.body.clone(),
                created_at: comment.created_at,
            });
        Ok(id)
    }

    async fn comments_by_author_email(
        &self,
        email: &str,
    ) -> Result<Vec<StoredComment>, StorageError> {
        Ok(self
            .comments
            .lock()
            .expect("storage mutex poisoned")
            .iter()
            .filter(|c| c.author_email == email)
            .cloned()
            .collect())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut comments = self.comments.lock().expect("storage mutex poisoned");
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() < before)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.categories.clone())
    }
}
