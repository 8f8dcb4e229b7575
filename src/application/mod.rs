//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a small API.
//!
//! - [`services::link_allocator::LinkAllocator`] - Validates input and allocates short codes
//! - [`services::redirect_resolver::RedirectResolver`] - Resolves codes and counts clicks
//! - [`services::link_query_service::LinkQueryService`] - Listing and lookups

pub mod services;
