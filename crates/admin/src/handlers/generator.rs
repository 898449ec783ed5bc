//! The content generator admin page: form rendering, seeding, and cleanup.

use axum::{
    Extension,
    extract::{Form, Query},
    response::{Html, Redirect},
};
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{info, warn};
use validator::Validate;

use seeder::{Category, ContentSeeder, GenerationRequest, PgStorage, Storage};

use crate::{auth::AdminUser, csrf, errors::AppError};

/// Path the admin page is served under; POST handlers redirect back here.
pub const ADMIN_PATH: &str = "/admin/content-generator";

/// Fields of the generation form.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateForm {
    pub csrf_token: String,
    #[validate(range(min = 1, max = 100, message = "Number of posts must be between 1 and 100"))]
    pub num_posts: u32,
    #[validate(range(max = 20, message = "Comments per post must be between 0 and 20"))]
    pub num_comments: u32,
    #[serde(default)]
    pub category: i64,
    #[serde(default)]
    pub tags: String,
}

/// Fields of the standalone delete form.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub csrf_token: String,
    pub action: String,
}

/// Query parameters driving the success banners.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub generated: Option<String>,
    pub deleted: Option<String>,
    pub failures: Option<u32>,
}

/// Renders the admin page: the generation form, the delete form, and a
/// success banner after a redirect.
pub async fn generator_page(
    Extension(storage): Extension<PgStorage>,
    AdminUser(claims): AdminUser,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let categories = storage.list_categories().await?;
    let generate_token = csrf::issue(claims.sub, csrf::GENERATE_ACTION)?;
    let delete_token = csrf::issue(claims.sub, csrf::DELETE_ACTION)?;

    Ok(Html(render_page(
        &categories,
        &generate_token,
        &delete_token,
        &query,
    )))
}

/// Creates the requested posts and comments, then redirects back to the
/// page with `generated=true` (plus a failure count if anything failed to
/// persist).
pub async fn generate_content(
    Extension(storage): Extension<PgStorage>,
    AdminUser(claims): AdminUser,
    Form(form): Form<GenerateForm>,
) -> Result<Redirect, AppError> {
    csrf::verify(&form.csrf_token, claims.sub, csrf::GENERATE_ACTION)?;
    form.validate().map_err(validation_errors)?;

    let request =
        GenerationRequest::new(form.num_posts, form.num_comments, form.category, &form.tags);

    let seeder = ContentSeeder::new(storage);
    let mut rng = StdRng::from_entropy();
    let report = seeder
        .seed(&request, claims.sub, OffsetDateTime::now_utc(), &mut rng)
        .await;

    info!(
        user = %claims.sub,
        posts = report.posts_created,
        comments = report.comments_created,
        "Generated lorem content"
    );

    if report.failures.is_empty() {
        Ok(Redirect::to(&format!("{ADMIN_PATH}?generated=true")))
    } else {
        warn!("Seeding finished with {} failures", report.failures.len());
        Ok(Redirect::to(&format!(
            "{ADMIN_PATH}?generated=true&failures={}",
            report.failures.len()
        )))
    }
}

/// Deletes all comments carrying the sentinel test-author email, then
/// redirects back with `deleted=true`.
pub async fn delete_test_comments(
    Extension(storage): Extension<PgStorage>,
    AdminUser(claims): AdminUser,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    csrf::verify(&form.csrf_token, claims.sub, csrf::DELETE_ACTION)?;
    if form.action != "delete_test_comments" {
        return Err(AppError::InvalidInput("Unknown action".to_string()));
    }

    let seeder = ContentSeeder::new(storage);
    let report = seeder.delete_generated_comments().await?;

    info!(
        user = %claims.sub,
        deleted = report.comments_deleted,
        "Deleted test comments"
    );

    Ok(Redirect::to(&format!("{ADMIN_PATH}?deleted=true")))
}

fn validation_errors(e: validator::ValidationErrors) -> AppError {
    let messages: Vec<String> = e
        .field_errors()
        .into_iter()
        .flat_map(|(_, errors)| {
            errors
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect();
    AppError::InvalidInput(messages.join(", "))
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_page(
    categories: &[Category],
    generate_token: &str,
    delete_token: &str,
    query: &PageQuery,
) -> String {
    let mut banner = String::new();
    if query.generated.as_deref() == Some("true") {
        match query.failures {
            Some(n) if n > 0 => {
                banner = format!(
                    r#"<div class="notice notice-warning"><p>Content has been generated, but {n} items failed to persist. Check the server log.</p></div>"#
                );
            }
            _ => {
                banner = r#"<div class="notice notice-success"><p>Content has been generated successfully.</p></div>"#.to_string();
            }
        }
    } else if query.deleted.as_deref() == Some("true") {
        banner = r#"<div class="notice notice-success"><p>All test comments have been deleted.</p></div>"#.to_string();
    }

    let mut category_options =
        String::from(r#"<option value="0">Select Category</option>"#);
    for category in categories {
        category_options.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            category.id,
            escape_html(&category.name)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Lorem Content Generator</title></head>
<body>
<div class="wrap">
<h1>Lorem Content Generator</h1>
{banner}
<form method="post" action="{ADMIN_PATH}/generate">
<input type="hidden" name="csrf_token" value="{generate_token}">
<table class="form-table">
<tr>
<th scope="row"><label for="num_posts">Number of Posts:</label></th>
<td><input type="number" id="num_posts" name="num_posts" min="1" max="100" value="10"></td>
</tr>
<tr>
<th scope="row"><label for="num_comments">Number of Comments per Post:</label></th>
<td><input type="number" id="num_comments" name="num_comments" min="0" max="20" value="5"></td>
</tr>
<tr>
<th scope="row"><label for="category">Category:</label></th>
<td><select id="category" name="category">{category_options}</select></td>
</tr>
<tr>
<th scope="row"><label for="tags">Tags (comma-separated):</label></th>
<td><input type="text" id="tags" name="tags" class="regular-text"></td>
</tr>
</table>
<p><input type="submit" name="generate_content" class="button button-primary" value="Generate Content"></p>
</form>
<form method="post" action="{ADMIN_PATH}/delete-test-comments">
<input type="hidden" name="csrf_token" value="{delete_token}">
<input type="hidden" name="action" value="delete_test_comments">
<p><input type="submit" class="button button-secondary" value="Delete All Test Comments"></p>
</form>
</div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "News".to_string(),
            },
            Category {
                id: 2,
                name: "Tips & Tricks".to_string(),
            },
        ]
    }

    #[test]
    fn test_page_contains_form_fields_and_categories() {
        let html = render_page(&categories(), "gen-token", "del-token", &PageQuery::default());

        for needle in [
            r#"name="num_posts""#,
            r#"name="num_comments""#,
            r#"name="category""#,
            r#"name="tags""#,
            r#"value="gen-token""#,
            r#"value="del-token""#,
            r#"value="delete_test_comments""#,
            r#"<option value="0">Select Category</option>"#,
            r#"<option value="1">News</option>"#,
        ] {
            assert!(html.contains(needle), "missing {needle:?}");
        }
        // Category names are escaped.
        assert!(html.contains("Tips &amp; Tricks"));
    }

    #[test]
    fn test_banners() {
        let generated = render_page(
            &[],
            "t",
            "t",
            &PageQuery {
                generated: Some("true".to_string()),
                ..PageQuery::default()
            },
        );
        assert!(generated.contains("Content has been generated successfully."));

        let partial = render_page(
            &[],
            "t",
            "t",
            &PageQuery {
                generated: Some("true".to_string()),
                failures: Some(3),
                ..PageQuery::default()
            },
        );
        assert!(partial.contains("3 items failed to persist"));

        let deleted = render_page(
            &[],
            "t",
            "t",
            &PageQuery {
                deleted: Some("true".to_string()),
                ..PageQuery::default()
            },
        );
        assert!(deleted.contains("All test comments have been deleted."));

        let plain = render_page(&[], "t", "t", &PageQuery::default());
        assert!(!plain.contains("notice"));
    }

    #[test]
    fn test_generate_form_bounds() {
        let form = GenerateForm {
            csrf_token: String::new(),
            num_posts: 10,
            num_comments: 5,
            category: 0,
            tags: String::new(),
        };
        assert!(form.validate().is_ok());

        let form = GenerateForm {
            num_posts: 0,
            ..form
        };
        assert!(form.validate().is_err());

        let form = GenerateForm {
            num_posts: 101,
            ..form
        };
        assert!(form.validate().is_err());

        let form = GenerateForm {
            num_posts: 1,
            num_comments: 21,
            ..form
        };
        assert!(form.validate().is_err());
    }
}
