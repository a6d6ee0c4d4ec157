//! Application error type and HTTP mapping.
//!
//! One error enum crosses every layer: services return it, repositories
//! translate database failures into it, and handlers rely on the
//! [`IntoResponse`] impl for the wire shape. `Conflict` is the only kind
//! callers may retry; everything else propagates unchanged.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input rejected before any mutation was staged.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Aggregate root or dependent record missing.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Uniqueness or concurrency-token violation. Retryable: re-running
    /// the whole logical operation is expected to succeed.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Underlying commit or query failed for unrelated reasons.
    #[error("{message}")]
    Internal { message: String, details: Value },

    /// The command's cancellation signal fired before commit; all staged
    /// operations were discarded.
    #[error("operation cancelled before commit")]
    Cancelled,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
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

    /// True for errors the caller may resolve by re-running the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Flattens the error into the wire payload shape.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => {
                ("validation_error", message.clone(), details.clone())
            }
            Self::NotFound { message, details } => ("not_found", message.clone(), details.clone()),
            Self::Conflict { message, details } => ("conflict", message.clone(), details.clone()),
            Self::Internal { message, details } => {
                ("internal_error", message.clone(), details.clone())
            }
            Self::Cancelled => ("cancelled", self.to_string(), json!({})),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Translates a database error into the application taxonomy.
///
/// Unique-constraint violations become [`AppError::Conflict`] so that slug
/// probe races surface as retryable conflicts rather than opaque failures.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::internal("Database error", json!({ "reason": e.to_string() }))
}
