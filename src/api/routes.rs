//! API route configuration.

use crate::api::handlers::{create_link_handler, get_link_handler, list_links_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /links`        - Create a short link
/// - `GET  /links`        - List all links in creation order
/// - `GET  /links/{code}` - Full record for one link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route("/links/{code}", get(get_link_handler))
}
