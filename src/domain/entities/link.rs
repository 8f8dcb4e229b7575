//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `original_url` and `short_code` are each unique across the store.
/// `click_count` only ever grows, one step per resolved redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        is_custom: bool,
        created_at: DateTime<Utc>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            is_custom,
            created_at,
            click_count,
        }
    }

    /// Returns the short URL for this link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_code)
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub is_custom: bool,
}

/// Compact listing view of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSummary {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
}
