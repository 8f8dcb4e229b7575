//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{LinkAllocator, LinkQueryService, RedirectResolver};
use crate::infrastructure::persistence::SqliteLinkRepository;

/// Services constructed once at startup and shared across requests.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_allocator: Arc<LinkAllocator<SqliteLinkRepository>>,
    pub redirect_resolver: Arc<RedirectResolver<SqliteLinkRepository>>,
    pub link_queries: Arc<LinkQueryService<SqliteLinkRepository>>,
    /// Public base URL used to build `shortUrl` values.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires the repository and services over a single connection pool.
    pub fn new(pool: Arc<SqlitePool>, base_url: impl Into<Arc<str>>) -> Self {
        let link_repository = Arc::new(SqliteLinkRepository::new(pool));

        Self {
            link_allocator: Arc::new(LinkAllocator::new(link_repository.clone())),
            redirect_resolver: Arc::new(RedirectResolver::new(link_repository.clone())),
            link_queries: Arc::new(LinkQueryService::new(link_repository)),
            base_url: base_url.into(),
        }
    }
}
