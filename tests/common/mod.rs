#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use snaplink::api::handlers::{health_handler, missing_code_handler, redirect_handler};
use snaplink::api::routes::link_routes;
use snaplink::infrastructure::persistence::{MIGRATOR, SqliteLinkRepository};
use snaplink::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://sn.test";

/// Opens a fresh in-memory database with the schema applied.
///
/// A single never-expiring connection keeps the in-memory database alive for
/// the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub fn create_test_repository(pool: &SqlitePool) -> Arc<SqliteLinkRepository> {
    Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone())))
}

pub fn create_test_state(pool: &SqlitePool) -> AppState {
    AppState::new(Arc::new(pool.clone()), TEST_BASE_URL)
}

/// Same routes as the production router, without path normalization.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(missing_code_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", link_routes())
        .with_state(state)
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (original_url, short_code, is_custom, created_at) \
         VALUES (?1, ?2, TRUE, ?3) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn click_count(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE short_code = ?1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}
