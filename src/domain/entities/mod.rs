//! Core domain entities.
//!
//! The service stores a single entity, [`Link`]. Creation input and listing
//! output use their own structs:
//!
//! - [`NewLink`] - fields supplied when inserting a link
//! - [`LinkSummary`] - id, URL and code, as returned by listings

pub mod link;

pub use link::{Link, LinkSummary, NewLink};
