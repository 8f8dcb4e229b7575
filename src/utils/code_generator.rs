//! Short code generation and validation utilities.
//!
//! Generated codes and user-provided custom codes share one format:
//! 3-10 characters from `[A-Za-z0-9-]`.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated short codes.
pub const GENERATED_CODE_LENGTH: usize = 8;

pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 10;

static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

/// Reserved codes that would be shadowed by fixed routes.
const RESERVED_CODES: &[&str] = &["health"];

/// Generates a random 8-character alphanumeric short code.
///
/// Draws from the thread-local CSPRNG, so codes are unpredictable and never
/// contain a hyphen.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-10 characters
/// - Allowed characters: ASCII letters, digits, hyphens
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
pub fn validate_short_code(code: &str) -> Result<(), AppError> {
    let length = code.chars().count();
    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
        return Err(AppError::invalid_input(
            format!(
                "Short code must be {}-{} characters",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            ),
            json!({ "provided_length": length }),
        ));
    }

    if !SHORT_CODE_REGEX.is_match(code) {
        return Err(AppError::invalid_input(
            "Short code can only contain letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES
        .iter()
        .any(|reserved| *reserved == code)
    {
        return Err(AppError::invalid_input(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
