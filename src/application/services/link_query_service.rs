//! Read-only link queries.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkSummary};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for listing and inspecting stored links.
///
/// Nothing here touches click counters.
pub struct LinkQueryService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkQueryService<L> {
    /// Creates a new query service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Lists every link, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_links(&self) -> Result<Vec<LinkSummary>, AppError> {
        Ok(self.link_repository.list_all().await?)
    }

    /// Retrieves the full record for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    pub async fn count_links(&self) -> Result<i64, AppError> {
        Ok(self.link_repository.count().await?)
    }
}
