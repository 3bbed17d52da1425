//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and a client-facing message.
///
/// # Error Categories
///
/// - **Authorization Errors**: missing or unknown API key, missing dashboard session
/// - **Validation Errors**: malformed submission fields or dashboard input
/// - **Resource Errors**: resources that are absent or owned by someone else
/// - **Internal Errors**: persistence or serialization failures (details never leave the server)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure. The detail is logged, not returned.
    #[error("Internal error: {0}")]
    Internal(String),

    /// No `X-API-Key` header on an ingestion request.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("API key is required")]
    MissingApiKey,

    /// The presented API key does not belong to any project.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Dashboard request without a valid owner session.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized")]
    Unauthorized,

    /// Project does not exist or doesn't belong to the authenticated owner.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Project not found")]
    ProjectNotFound,

    /// Feedback does not exist or its project doesn't belong to the authenticated owner.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Feedback not found")]
    FeedbackNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request. The String is the message shown to the client.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey | AppError::InvalidApiKey | AppError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ProjectNotFound | AppError::FeedbackNotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// { "error": "Human-readable error message" }
/// ```
///
/// Internal failures are logged with full detail and answered with
/// `"Internal server error"`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_details() {
        let response = AppError::Internal("connection reset by peer".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn key_errors_are_unauthorized() {
        assert_eq!(AppError::MissingApiKey.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidApiKey.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidApiKey.to_string(), "Invalid API key");
        assert_eq!(AppError::MissingApiKey.to_string(), "API key is required");
    }
}
