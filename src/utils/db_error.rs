//! Classification of sqlx errors at the store boundary.

use crate::domain::repositories::{StoreError, UniqueField};

/// Returns the column whose uniqueness constraint rejected a write.
///
/// SQLite reports the column in the message (`UNIQUE constraint failed:
/// links.short_code`) rather than a constraint name, so the name is checked
/// first and the message second.
pub fn unique_violation_field(e: &sqlx::Error) -> Option<UniqueField> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    let target = db_err.constraint().unwrap_or_else(|| db_err.message());
    field_from_constraint(target)
}

fn field_from_constraint(target: &str) -> Option<UniqueField> {
    if target.contains("short_code") {
        Some(UniqueField::ShortCode)
    } else if target.contains("original_url") {
        Some(UniqueField::OriginalUrl)
    } else {
        None
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match unique_violation_field(&e) {
            Some(field) => StoreError::Duplicate(field),
            None => StoreError::Unavailable(e.to_string()),
        }
    }
}
