//! Error types for the snapshot API layer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use snapshot_service::ServiceError;
use thiserror::Error;

/// Error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Errors from the service layer (btrfs operations, listing, etc.).
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// The JSON body returned for failed API operations.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Service(err) => {
                // Log service errors as they're unexpected
                tracing::error!(
                    error = err as &dyn std::error::Error,
                    "service error handling request"
                );
            }
        }

        let body = ErrorBody {
            success: false,
            error_message: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
