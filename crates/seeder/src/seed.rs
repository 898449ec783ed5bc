//! Content seeding orchestration: lorem posts, placeholder comments, and
//! cleanup of previously generated comments.

use rand::Rng;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::generators::{dates, lorem, urls};
use crate::request::GenerationRequest;
use crate::storage::{NewComment, NewPost, PostStatus, Storage, StorageError};

/// Display name every generated comment is attributed to.
pub const TEST_AUTHOR_NAME: &str = "Test User";

/// Sentinel author email marking generated comments. This is the only
/// persisted marker distinguishing them from real comments, so cleanup also
/// removes comments from any real user sharing this address.
pub const TEST_AUTHOR_EMAIL: &str = "testuser@example.com";

const TITLE_WORDS: (usize, usize) = (5, 8);
const BODY_WORDS: (usize, usize) = (100, 500);
const COMMENT_WORDS: (usize, usize) = (20, 100);

/// Outcome of one seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub posts_created: usize,
    pub comments_created: usize,
    /// Per-item persistence failures, in encounter order.
    pub failures: Vec<String>,
}

/// Outcome of one cleanup run.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub comments_deleted: usize,
    pub failures: Vec<String>,
}

/// Creates lorem posts and comments through a [`Storage`] backend.
pub struct ContentSeeder<S> {
    storage: S,
}

impl<S: Storage> ContentSeeder<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Seeds `post_count` posts, each with `comments_per_post` placeholder
    /// comments. The caller supplies the post author, the reference "now",
    /// and the randomness source.
    ///
    /// Not transactional: records created before a failure stay in storage.
    /// Per-item failures are collected in the report and the run continues;
    /// a post that fails to persist skips its comments.
    pub async fn seed(
        &self,
        request: &GenerationRequest,
        author_id: Uuid,
        now: OffsetDateTime,
        rng: &mut (impl Rng + Send),
    ) -> SeedReport {
        let mut report = SeedReport::default();
        info!(
            posts = request.post_count,
            comments_per_post = request.comments_per_post,
            "Seeding lorem content..."
        );

        for i in 0..request.post_count {
            let published_at = dates::random_past_date(now, rng);
            let post = NewPost {
                author_id,
                title: lorem::generate(TITLE_WORDS.0, TITLE_WORDS.1, rng),
                body: lorem::generate(BODY_WORDS.0, BODY_WORDS.1, rng),
                status: PostStatus::Published,
                published_at,
                category_id: request.category_id,
            };

            let post_id = match self.storage.create_post(&post).await {
                Ok(id) => id,
                Err(e) => {
                    warn!("Failed to create post {}: {e}", i + 1);
                    report.failures.push(format!("post {}: {e}", i + 1));
                    continue;
                }
            };
            report.posts_created += 1;
            debug!(
                "Created post {post_id} dated {}",
                dates::format_timestamp(published_at)
            );

            if !request.tags.is_empty() {
                if let Err(e) = self.storage.set_post_tags(post_id, &request.tags).await {
                    warn!("Failed to tag post {post_id}: {e}");
                    report
                        .failures
                        .push(format!("tags for post {post_id}: {e}"));
                }
            }

            for j in 0..request.comments_per_post {
                let created_at = match dates::random_between(published_at, now, rng) {
                    Ok(t) => t,
                    Err(e) => {
                        report
                            .failures
                            .push(format!("comment {} on post {post_id}: {e}", j + 1));
                        continue;
                    }
                };
                let comment = NewComment {
                    post_id,
                    author_name: TEST_AUTHOR_NAME.to_string(),
                    author_email: TEST_AUTHOR_EMAIL.to_string(),
                    author_url: urls::random_url(rng),
                    body: lorem::generate(COMMENT_WORDS.0, COMMENT_WORDS.1, rng),
                    created_at,
                };

                match self.storage.create_comment(&comment).await {
                    Ok(_) => report.comments_created += 1,
                    Err(e) => {
                        warn!("Failed to create comment on post {post_id}: {e}");
                        report
                            .failures
                            .push(format!("comment {} on post {post_id}: {e}", j + 1));
                    }
                }
            }

            if (i + 1) % 10 == 0 {
                info!("  Seeded {}/{} posts", i + 1, request.post_count);
            }
        }

        info!(
            posts = report.posts_created,
            comments = report.comments_created,
            failures = report.failures.len(),
            "Seeding complete"
        );
        report
    }

    /// Deletes every comment whose author email matches the sentinel
    /// address. Idempotent: a second run finds nothing left to delete.
    pub async fn delete_generated_comments(&self) -> Result<CleanupReport, StorageError> {
        let comments = self
            .storage
            .comments_by_author_email(TEST_AUTHOR_EMAIL)
            .await?;
        info!("Deleting {} generated comments...", comments.len());

        let mut report = CleanupReport::default();
        for comment in comments {
            match self.storage.delete_comment(comment.id).await {
                Ok(true) => report.comments_deleted += 1,
                // Already gone, e.g. a concurrent cleanup run.
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to delete comment {}: {e}", comment.id);
                    report.failures.push(format!("comment {}: {e}", comment.id));
                }
            }
        }

        info!("Deleted {} generated comments", report.comments_deleted);
        Ok(report)
    }

    /// Returns the underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
