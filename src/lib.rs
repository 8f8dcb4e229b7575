//! # snaplink
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The `Link` entity and the store contract
//! - **Application Layer** ([`application`]) - Code allocation, redirect resolution, listing
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations, repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Uniqueness
//!
//! Each original URL and each short code may appear only once. The services
//! check before inserting to give precise errors, but the database's UNIQUE
//! constraints are what actually guarantee it under concurrent requests.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://snaplink.db"
//! export BASE_URL="http://localhost:3000"
//! cargo run
//!
//! curl -X POST localhost:3000/api/links \
//!      -H 'content-type: application/json' \
//!      -d '{"originalUrl": "https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkAllocator, LinkQueryService, RedirectResolver};
    pub use crate::domain::entities::{Link, LinkSummary, NewLink};
    pub use crate::domain::repositories::{LinkRepository, StoreError, UniqueField};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
