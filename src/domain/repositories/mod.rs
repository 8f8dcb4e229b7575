//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; the SQLite implementation lives in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::{LinkRepository, StoreError, UniqueField};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
