//! Handlers for link creation, listing and lookup.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, LinkSummaryResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "shortCode": "promo"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "originalUrl": "https://example.com",
///   "shortCode": "promo",
///   "shortUrl": "http://localhost:3000/promo",
///   "isCustom": true,
///   "createdAt": "2025-06-01T12:00:00Z",
///   "clickCount": 0
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_input` - malformed body, URL or short code
/// - 400 `bad_request` - short code already in use
/// - 409 `conflict` - URL already shortened
/// - 500 `internal_error` - storage failure or code allocation exhausted
pub async fn create_link_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_allocator
        .create_link(payload.original_url, payload.short_code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists all links, oldest first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "originalUrl": "https://example.com", "shortCode": "promo" }
/// ]
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkSummaryResponse>>, AppError> {
    let links = state.link_queries.list_links().await?;

    Ok(Json(links.into_iter().map(Into::into).collect()))
}

/// Returns the full record for one link, including its click count.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_queries.get_link(&code).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}
