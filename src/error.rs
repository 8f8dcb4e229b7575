//! Application error taxonomy and its HTTP representation.
//!
//! Every service operation returns [`AppError`]. Each variant maps to a stable
//! machine-readable code and an HTTP status:
//!
//! | Variant        | Status | Code             |
//! |----------------|--------|------------------|
//! | `InvalidInput` | 400    | `invalid_input`  |
//! | `BadRequest`   | 400    | `bad_request`    |
//! | `Conflict`     | 409    | `conflict`       |
//! | `NotFound`     | 404    | `not_found`      |
//! | `Internal`     | 500    | `internal_error` |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL or short code. The caller must fix the input.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },
    /// Requested custom code is already taken.
    #[error("{message}")]
    BadRequest { message: String, details: Value },
    /// The URL has already been shortened.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// Storage failure or exhausted code generation. Retryable by the caller.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable error code exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::BadRequest { .. } => "bad_request",
            AppError::Conflict { .. } => "conflict",
            AppError::NotFound { .. } => "not_found",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidInput { message, details }
            | AppError::BadRequest { message, details }
            | AppError::Conflict { message, details }
            | AppError::NotFound { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::invalid_input("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(field) => AppError::conflict(
                "Unique constraint violation",
                json!({ "field": field.as_str() }),
            ),
            StoreError::MissingLink(id) => {
                tracing::error!(link_id = id, "Link vanished from storage");
                AppError::internal("Link record is missing", json!({ "id": id }))
            }
            StoreError::Unavailable(reason) => {
                tracing::error!(error = %reason, "Storage failure");
                AppError::internal("Storage unavailable", json!({}))
            }
        }
    }
}
