//! Placeholder content seeding for the CMS.
//!
//! This crate generates lorem-ipsum posts and randomized placeholder comments
//! against the host application's content storage, and can later remove the
//! generated comments again. Generated comments are identified solely by a
//! sentinel author email address.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use seeder::{ContentSeeder, GenerationRequest, PgStorage};
//!
//! let request = GenerationRequest::new(10, 5, 0, "rust, testing");
//! let seeder = ContentSeeder::new(PgStorage::new(pool));
//! let mut rng = StdRng::from_entropy();
//! let report = seeder
//!     .seed(&request, author_id, time::OffsetDateTime::now_utc(), &mut rng)
//!     .await;
//! ```

pub mod generators;
pub mod request;
pub mod seed;
pub mod storage;

pub use request::GenerationRequest;
pub use seed::{CleanupReport, ContentSeeder, SeedReport, TEST_AUTHOR_EMAIL, TEST_AUTHOR_NAME};
pub use storage::{
    Category, MemoryStorage, NewComment, NewPost, PgStorage, PostStatus, Storage, StorageError,
    StoredComment, StoredPost,
};
