//! DTOs for link creation and listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::{Link, LinkSummary};

/// Request to shorten a URL.
///
/// ```json
/// { "originalUrl": "https://example.com", "shortCode": "promo" }
/// ```
///
/// An empty `shortCode` string is treated the same as omitting it.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(min = 3, max = 10, message = "Short code must be 3-10 characters"))]
    pub short_code: Option<String>,
}

/// Full link record returned after creation and by detail lookups.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = link.short_url(base_url);

        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            is_custom: link.is_custom,
            created_at: link.created_at,
            click_count: link.click_count,
        }
    }
}

/// Listing entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummaryResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
}

impl From<LinkSummary> for LinkSummaryResponse {
    fn from(summary: LinkSummary) -> Self {
        Self {
            id: summary.id,
            original_url: summary.original_url,
            short_code: summary.short_code,
        }
    }
}
