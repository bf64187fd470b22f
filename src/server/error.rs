//! Mapping of vault errors onto HTTP responses
//!
//! Validation failures become 400 with their message. Everything else becomes
//! 500 with a fixed per-route message; the detail only goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::error::{ErrorKind, VaultError};
use crate::models::ErrorResponse;

/// Error returned by a handler
#[derive(Debug)]
pub struct ApiError {
    source: VaultError,
    public_message: &'static str,
}

impl ApiError {
    /// Wrap `source`, answering `public_message` if it is not a validation error
    pub fn new(source: VaultError, public_message: &'static str) -> Self {
        Self {
            source,
            public_message,
        }
    }

    /// A 400 with a descriptive message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(VaultError::Validation(message.into()), "Bad request")
    }

    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self.source.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.source {
            VaultError::Validation(message) => message,
            other => {
                error!(error = %other, "{}", self.public_message);
                self.public_message.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::new(VaultError::missing_field("userId"), "Failed to fetch links");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_is_internal_error() {
        let err = ApiError::new(
            VaultError::Storage("disk full".into()),
            "Failed to add link",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::bad_request("id is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiError::new(VaultError::Io("denied".into()), "Failed to delete link").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
