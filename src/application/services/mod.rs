//! Business logic services for the application layer.

pub mod link_allocator;
pub mod link_query_service;
pub mod redirect_resolver;

pub use link_allocator::LinkAllocator;
pub use link_query_service::LinkQueryService;
pub use redirect_resolver::RedirectResolver;
