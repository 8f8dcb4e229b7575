mod common;

use snaplink::application::services::{LinkAllocator, LinkQueryService, RedirectResolver};
use snaplink::domain::repositories::LinkRepository;
use snaplink::error::AppError;

#[tokio::test]
async fn test_created_link_starts_with_zero_clicks() {
    let pool = common::test_pool().await;
    let repo = common::create_test_repository(&pool);
    let allocator = LinkAllocator::new(repo.clone());

    let link = allocator
        .create_link("https://example.com".to_string(), None)
        .await
        .unwrap();

    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.short_code.len(), 8);
    assert!(!link.is_custom);
    assert_eq!(link.click_count, 0);

    let stored = repo.find_by_url("https://example.com").await.unwrap().unwrap();
    assert_eq!(stored.id, link.id);
    assert_eq!(stored.click_count, 0);
}

#[tokio::test]
async fn test_duplicate_url_conflicts_and_keeps_original() {
    let pool = common::test_pool().await;
    let repo = common::create_test_repository(&pool);
    let allocator = LinkAllocator::new(repo.clone());

    let first = allocator
        .create_link("https://dup.com".to_string(), Some("first".to_string()))
        .await
        .unwrap();

    let err = allocator
        .create_link("https://dup.com".to_string(), Some("second".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert!(err.to_string().contains("first"));

    let stored = repo.find_by_url("https://dup.com").await.unwrap().unwrap();
    assert_eq!(stored, first);
    assert!(repo.find_by_code("second").await.unwrap().is_none());
}

#[tokio::test]
async fn test_custom_code_in_use_creates_nothing() {
    let pool = common::test_pool().await;
    let repo = common::create_test_repository(&pool);
    let allocator = LinkAllocator::new(repo);

    allocator
        .create_link("https://one.com".to_string(), Some("promo".to_string()))
        .await
        .unwrap();

    let result = allocator
        .create_link("https://two.com".to_string(), Some("promo".to_string()))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    assert_eq!(common::link_count(&pool).await, 1);
}

#[tokio::test]
async fn test_invalid_inputs_are_rejected() {
    let pool = common::test_pool().await;
    let allocator = LinkAllocator::new(common::create_test_repository(&pool));

    let ftp = allocator.create_link("ftp://x.com".to_string(), None).await;
    assert!(matches!(ftp.unwrap_err(), AppError::InvalidInput { .. }));

    let short = allocator
        .create_link("https://a.com".to_string(), Some("ab".to_string()))
        .await;
    assert!(matches!(short.unwrap_err(), AppError::InvalidInput { .. }));

    assert_eq!(common::link_count(&pool).await, 0);
}

#[tokio::test]
async fn test_resolve_counts_each_click() {
    let pool = common::test_pool().await;
    let repo = common::create_test_repository(&pool);
    let allocator = LinkAllocator::new(repo.clone());
    let resolver = RedirectResolver::new(repo.clone());
    let queries = LinkQueryService::new(repo);

    allocator
        .create_link("https://target.com/page".to_string(), Some("abc123".to_string()))
        .await
        .unwrap();

    let target = resolver.resolve("abc123").await.unwrap();
    assert_eq!(target, "https://target.com/page");
    assert_eq!(queries.get_link("abc123").await.unwrap().click_count, 1);

    resolver.resolve("abc123").await.unwrap();
    assert_eq!(queries.get_link("abc123").await.unwrap().click_count, 2);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let pool = common::test_pool().await;
    let resolver = RedirectResolver::new(common::create_test_repository(&pool));

    let result = resolver.resolve("missing").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_listing_is_stable_without_writes() {
    let pool = common::test_pool().await;
    let repo = common::create_test_repository(&pool);
    let allocator = LinkAllocator::new(repo.clone());
    let queries = LinkQueryService::new(repo);

    for i in 0..5 {
        allocator
            .create_link(format!("https://example.com/{i}"), None)
            .await
            .unwrap();
    }

    let first = queries.list_links().await.unwrap();
    let second = queries.list_links().await.unwrap();

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    assert_eq!(first[0].original_url, "https://example.com/0");
    assert_eq!(first[4].original_url, "https://example.com/4");
}

#[tokio::test]
async fn test_concurrent_creation_of_same_url_has_one_winner() {
    let pool = common::test_pool().await;
    let allocator = LinkAllocator::new(common::create_test_repository(&pool));

    let (a, b) = tokio::join!(
        allocator.create_link("https://race.com".to_string(), None),
        allocator.create_link("https://race.com".to_string(), None),
    );

    let outcomes = [a, b];
    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(common::link_count(&pool).await, 1);
}

#[tokio::test]
async fn test_concurrent_creation_with_same_custom_code_has_one_winner() {
    let pool = common::test_pool().await;
    let allocator = LinkAllocator::new(common::create_test_repository(&pool));

    let (a, b) = tokio::join!(
        allocator.create_link("https://left.com".to_string(), Some("shared".to_string())),
        allocator.create_link("https://right.com".to_string(), Some("shared".to_string())),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(AppError::BadRequest { .. })))
            .count(),
        1
    );
    assert_eq!(common::link_count(&pool).await, 1);
}
