//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkSummary, NewLink};
use async_trait::async_trait;
use std::fmt;

/// Column protected by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    OriginalUrl,
    ShortCode,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::OriginalUrl => "original_url",
            UniqueField::ShortCode => "short_code",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by the link store.
///
/// A [`StoreError::Duplicate`] is the authoritative uniqueness signal and is
/// kept separate from [`StoreError::Unavailable`] so callers can turn it into
/// a user-facing conflict.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated on {0}")]
    Duplicate(UniqueField),

    #[error("link {0} does not exist")]
    MissingLink(i64),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Repository interface for the link table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, StoreError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Inserts a new link with `click_count = 0` and the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] naming the colliding column if either
    /// uniqueness constraint rejects the row, even when a prior lookup found
    /// nothing.
    ///
    /// Returns [`StoreError::Unavailable`] on other database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Lists all links ordered by creation time, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn list_all(&self) -> Result<Vec<LinkSummary>, StoreError>;

    /// Atomically adds one to the link's click counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingLink`] if no row has this id.
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn increment_clicks(&self, id: i64) -> Result<(), StoreError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn count(&self) -> Result<i64, StoreError>;
}
