//! Error types for the read API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur while serving a read request.
///
/// `NotFound` is the one distinguished case; everything else surfaces
/// flatly as an internal error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested entity has not been indexed.
    #[error("not found")]
    NotFound,

    /// Failure from the query service.
    #[error(transparent)]
    Query(#[from] query::QueryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Query(err) => {
                tracing::error!("Query error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
