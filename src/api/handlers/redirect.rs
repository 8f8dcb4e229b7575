//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code
/// 2. Record the click (failures are logged, never surfaced)
/// 3. Return `302 Found` with the original URL in `Location`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is empty.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(missing_code());
    }

    let target = state.redirect_resolver.resolve(code).await?;
    tracing::debug!(code, target = %target, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
}

/// Answers `GET /`, which carries no short code.
///
/// # Errors
///
/// Always returns 400 Bad Request.
pub async fn missing_code_handler() -> AppError {
    missing_code()
}

fn missing_code() -> AppError {
    AppError::bad_request("Short code is required", json!({}))
}
