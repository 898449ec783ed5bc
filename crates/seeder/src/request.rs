//! Sanitized input for one seeding run.

use std::collections::HashSet;

/// Parameters for a single content-generation run, as collected from the
/// admin form. Counts arrive already parsed as non-negative integers; the
/// raw category and tag values are normalized here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Number of posts to create.
    pub post_count: u32,
    /// Number of placeholder comments per created post.
    pub comments_per_post: u32,
    /// Category to file posts under; `None` when the form's "none" option
    /// (value 0) was selected.
    pub category_id: Option<i64>,
    /// Tags to attach to every created post, trimmed and deduplicated.
    pub tags: Vec<String>,
}

impl GenerationRequest {
    /// Builds a request from raw form values. A `category_id` of 0 means no
    /// category; `tags` is the free-text comma-separated field.
    pub fn new(post_count: u32, comments_per_post: u32, category_id: i64, tags: &str) -> Self {
        Self {
            post_count,
            comments_per_post,
            category_id: (category_id != 0).then_some(category_id),
            tags: parse_tags(tags),
        }
    }
}

/// Splits a comma-separated tag string into trimmed, non-empty, distinct
/// tags, preserving first-seen order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empties() {
        assert_eq!(parse_tags(" a, b ,, c "), vec!["a", "b", "c"]);
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("  ,  , "), Vec::<String>::new());
    }

    #[test]
    fn test_parse_tags_dedups_preserving_order() {
        assert_eq!(parse_tags("b, a, b, c, a"), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_category_zero_means_none() {
        let request = GenerationRequest::new(2, 1, 0, "a, b");
        assert_eq!(request.category_id, None);

        let request = GenerationRequest::new(2, 1, 7, "");
        assert_eq!(request.category_id, Some(7));
        assert!(request.tags.is_empty());
    }
}
