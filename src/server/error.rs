//! Error types and response handling for the HTTP server.
//!
//! Maps failures to status codes and JSON error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::directory::DirectoryError;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User '{id}' not found")]
    UserNotFound { id: String },

    #[error("Index {index} out of range for {len} foods")]
    InvalidIndex { index: usize, len: usize },

    /// Malformed or incomplete request body.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Asset '{path}' not found")]
    AssetNotFound { path: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::UserNotFound { id } => ApiError::UserNotFound { id },
            DirectoryError::InvalidIndex { index, len } => ApiError::InvalidIndex { index, len },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    /// Map error variant to HTTP status code.
    ///
    /// An unknown user on update is a 500, which is what existing clients
    /// of `PUT /user` expect.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidIndex { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AssetNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error type string for JSON responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::UserNotFound { .. } => "user_not_found",
            ApiError::InvalidIndex { .. } => "invalid_index",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::AssetNotFound { .. } => "asset_not_found",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();
        let status = self.status_code();
        tracing::warn!(
            request_id = %request_id,
            status = status.as_u16(),
            error = %self,
            "Request failed"
        );

        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
                "request_id": request_id
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_maps_to_500() {
        let err = ApiError::UserNotFound {
            id: "99".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "user_not_found");
    }

    #[test]
    fn invalid_index_maps_to_400() {
        let err = ApiError::from(DirectoryError::InvalidIndex { index: 9, len: 3 });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "invalid_index");
    }

    #[test]
    fn error_response_is_json() {
        let response = ApiError::AssetNotFound {
            path: "screens/x.inc".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
