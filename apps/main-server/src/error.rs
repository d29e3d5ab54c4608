//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meeting_store::StoreError;
use rpc_protocol::{ApiError, ErrorCode, ErrorResponse};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with stored data.
    #[error("{0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(StoreError),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => ServerError::Conflict(err.to_string()),
            StoreError::Validation(e) => ServerError::InvalidRequest(e.to_string()),
            StoreError::ReadOnly | StoreError::Migration(_) | StoreError::Database(_) => {
                ServerError::Database(err)
            }
        }
    }
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            ServerError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
            ServerError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: ApiError::new(code, self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use entities::ValidationError;

    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        let cases = [
            (StoreError::not_found("User", 7), StatusCode::NOT_FOUND),
            (StoreError::already_exists("User", "email"), StatusCode::CONFLICT),
            (
                StoreError::Validation(ValidationError::Blank { field: "title" }),
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::ReadOnly, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (store_error, expected) in cases {
            let response = ServerError::from(store_error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ServerError::from(StoreError::not_found("Event", 3));
        assert_eq!(err.to_string(), "Event not found: 3");
    }
}
