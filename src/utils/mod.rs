//! Utility functions used across the application:
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Destination URL checks
//! - [`db_error`] - Mapping of sqlx errors to store errors

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
