//! HTTP error mapping for core errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use creatorpulse_core::errors::{DatabaseError, Error};
use creatorpulse_core::sync::SyncError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper turning core errors into HTTP responses.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Sync(SyncError::AlreadyRunning { .. }) => {
                (StatusCode::CONFLICT, self.0.to_string())
            }
            Error::Sync(SyncError::RecordNotFound { .. })
            | Error::Database(DatabaseError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            _ => {
                tracing::error!("Request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
