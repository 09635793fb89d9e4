//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No subject with the given id.
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    /// No category with the given id in the subject.
    #[error("Category not found: {subject}/{category}")]
    CategoryNotFound { subject: String, category: String },

    /// A path parameter was required but empty.
    #[error("Path parameter is required")]
    MissingPath,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::SubjectNotFound(subject) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Subject not found", "subject": subject}),
            ),
            Self::CategoryNotFound { subject, category } => (
                StatusCode::NOT_FOUND,
                json!({"error": "Category not found", "subject": subject, "category": category}),
            ),
            Self::MissingPath => (
                StatusCode::BAD_REQUEST,
                json!({"error": self.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
