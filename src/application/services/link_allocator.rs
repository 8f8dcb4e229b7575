//! Short link allocation service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError, UniqueField};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_short_code};
use crate::utils::url_validator::validate_url;
use serde_json::json;

/// Attempts made to find an unused generated code before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 3;

/// Service that turns a long URL into a stored short link.
///
/// The lookups before insert only exist to return a precise error in the
/// common case. The store's unique constraints decide the outcome when two
/// requests race between check and insert.
pub struct LinkAllocator<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkAllocator<L> {
    /// Creates a new link allocator.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link for `original_url`.
    ///
    /// # Arguments
    ///
    /// - `original_url` - Absolute `http`/`https` URL, stored as given
    /// - `custom_code` - Optional requested code; a random 8-character code
    ///   is generated when absent
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL or custom code is malformed.
    ///
    /// Returns [`AppError::Conflict`] if the URL is already shortened. The
    /// existing code is included in the message and details.
    ///
    /// Returns [`AppError::BadRequest`] if the custom code is already in use.
    ///
    /// Returns [`AppError::Internal`] on storage failure or when no unique code
    /// could be generated.
    pub async fn create_link(
        &self,
        original_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&original_url).map_err(|e| {
            AppError::invalid_input("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(code) = &custom_code {
            validate_short_code(code)?;
        }

        if let Some(existing) = self.link_repository.find_by_url(&original_url).await? {
            return Err(url_taken(&original_url, Some(&existing.short_code)));
        }

        let (short_code, is_custom) = match custom_code {
            Some(code) => {
                if self.link_repository.find_by_code(&code).await?.is_some() {
                    return Err(code_taken(&code));
                }
                (code, true)
            }
            None => (self.generate_unique_code().await?, false),
        };

        let new_link = NewLink {
            original_url,
            short_code,
            is_custom,
        };

        match self.link_repository.insert(new_link.clone()).await {
            Ok(link) => {
                tracing::info!(
                    link_id = link.id,
                    short_code = %link.short_code,
                    is_custom = link.is_custom,
                    "Short link created"
                );
                Ok(link)
            }
            Err(StoreError::Duplicate(UniqueField::OriginalUrl)) => {
                tracing::debug!(url = %new_link.original_url, "Lost URL insert race");
                Err(self.url_race_conflict(&new_link.original_url).await)
            }
            Err(StoreError::Duplicate(UniqueField::ShortCode)) => {
                tracing::debug!(code = %new_link.short_code, "Lost code insert race");
                Err(code_taken(&new_link.short_code))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Generates a code not currently in the store.
    ///
    /// Attempts up to 3 times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::warn!(attempt, code = %code, "Generated short code collided");
        }

        Err(AppError::internal(
            "Could not allocate unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Builds the conflict for a URL that another request inserted first.
    ///
    /// Re-reads the winning row so the caller still learns its code.
    async fn url_race_conflict(&self, original_url: &str) -> AppError {
        let existing = self
            .link_repository
            .find_by_url(original_url)
            .await
            .ok()
            .flatten();

        url_taken(original_url, existing.as_ref().map(|l| l.short_code.as_str()))
    }
}

fn url_taken(original_url: &str, existing_code: Option<&str>) -> AppError {
    match existing_code {
        Some(code) => AppError::conflict(
            format!("URL already shortened as '{}'", code),
            json!({ "original_url": original_url, "short_code": code }),
        ),
        None => AppError::conflict(
            "URL already shortened",
            json!({ "original_url": original_url }),
        ),
    }
}

fn code_taken(code: &str) -> AppError {
    AppError::bad_request("Short code already in use", json!({ "short_code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(id: i64, url: &str, code: &str, is_custom: bool) -> Link {
        Link::new(
            id,
            url.to_string(),
            code.to_string(),
            is_custom,
            Utc::now(),
            0,
        )
    }

    fn echo_insert(id: i64) -> impl FnMut(NewLink) -> Result<Link, StoreError> {
        move |new_link| {
            Ok(Link::new(
                id,
                new_link.original_url,
                new_link.short_code,
                new_link.is_custom,
                Utc::now(),
                0,
            ))
        }
    }

    #[tokio::test]
    async fn test_create_link_generates_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|new_link| !new_link.is_custom && new_link.short_code.len() == 8)
            .times(1)
            .returning(echo_insert(1));

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let link = allocator
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_code.len(), 8);
        assert!(!link.is_custom);
        assert_eq!(link.click_count, 0);
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "my-link")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.is_custom && new_link.short_code == "my-link")
            .times(1)
            .returning(echo_insert(2));

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let link = allocator
            .create_link(
                "https://example.com/page".to_string(),
                Some("my-link".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.short_code, "my-link");
        assert!(link.is_custom);
    }

    #[tokio::test]
    async fn test_create_link_rejects_non_http_scheme() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_url().times(0);
        mock_repo.expect_insert().times(0);

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let result = allocator.create_link("ftp://x.com".to_string(), None).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_create_link_rejects_short_custom_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_url().times(0);
        mock_repo.expect_insert().times(0);

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let result = allocator
            .create_link("https://a.com".to_string(), Some("ab".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_create_link_existing_url_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link(5, "https://example.com", "exist01", false);
        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert().times(0);

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let err = allocator
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("exist01"));
        match err {
            AppError::Conflict { details, .. } => assert_eq!(details["short_code"], "exist01"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_link_custom_code_taken() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        let existing = create_test_link(3, "https://other.com", "taken", true);
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "taken")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert().times(0);

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let result = allocator
            .create_link("https://example.com".to_string(), Some("taken".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_create_link_gives_up_after_three_collisions() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(3)
            .returning(|code| Ok(Some(create_test_link(1, "https://x.com", code, false))));

        mock_repo.expect_insert().times(0);

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let err = allocator
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert!(err.to_string().contains("unique code"));
    }

    #[tokio::test]
    async fn test_create_link_retries_after_single_collision() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        let mut calls = 0;
        mock_repo
            .expect_find_by_code()
            .times(2)
            .returning(move |code| {
                calls += 1;
                if calls == 1 {
                    Ok(Some(create_test_link(1, "https://x.com", code, false)))
                } else {
                    Ok(None)
                }
            });

        mock_repo
            .expect_insert()
            .times(1)
            .returning(echo_insert(9));

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let result = allocator
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_race_on_url_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        let winner = create_test_link(11, "https://race.com", "winner1", false);
        let mut calls = 0;
        mock_repo
            .expect_find_by_url()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Ok(None)
                } else {
                    Ok(Some(winner.clone()))
                }
            });

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Duplicate(UniqueField::OriginalUrl)));

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let err = allocator
            .create_link("https://race.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(err.to_string().contains("winner1"));
    }

    #[tokio::test]
    async fn test_insert_race_on_code_is_bad_request() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Duplicate(UniqueField::ShortCode)));

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let result = allocator
            .create_link("https://example.com".to_string(), Some("mine".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("database is locked".to_string())));

        let allocator = LinkAllocator::new(Arc::new(mock_repo));

        let result = allocator
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
