//! HTTP request handlers for the admin content generator.

pub mod generator;

pub use generator::{delete_test_comments, generate_content, generator_page};
