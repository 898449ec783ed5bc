pub mod auth;
pub mod csrf;
pub mod errors;
pub mod handlers;

use axum::{
    Extension, Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{compression::CompressionLayer, set_header::SetResponseHeaderLayer};

use seeder::PgStorage;

use crate::{
    auth::login,
    handlers::{delete_test_comments, generate_content, generator_page},
};

pub fn create_router(pool: PgPool) -> Router {
    let storage = PgStorage::new(pool);

    Router::new()
        .route("/health", get(health_check))
        // Auth routes
        .route("/auth/login", post(login))
        // Admin content generator
        .route("/admin/content-generator", get(generator_page))
        .route("/admin/content-generator/generate", post(generate_content))
        .route(
            "/admin/content-generator/delete-test-comments",
            post(delete_test_comments),
        )
        .layer(Extension(storage))
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

async fn health_check() -> &'static str {
    "ok"
}

pub async fn run_server(pool: PgPool, port: u16) -> anyhow::Result<()> {
    let app = create_router(pool);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    tracing::info!("Admin server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
