//! Redirect resolution service.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Service that maps a short code to its destination and counts the visit.
pub struct RedirectResolver<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> RedirectResolver<L> {
    /// Creates a new redirect resolver.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Resolves `code` to the URL the caller should redirect to.
    ///
    /// The click counter is incremented on a best-effort basis. If that write
    /// fails the failure is logged and the redirect still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if let Err(e) = self.link_repository.increment_clicks(link.id).await {
            tracing::warn!(error = %e, link_id = link.id, "Failed to record click");
        }

        Ok(link.original_url)
    }
}
