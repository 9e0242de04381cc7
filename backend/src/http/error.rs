//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    /// Status code and body for this error.
    pub fn to_api_error(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let details = e.context().to_string();
                let (status, code, message) = match e {
                    RepositoryError::NotFound { message, .. } => {
                        (StatusCode::NOT_FOUND, "NOT_FOUND", message)
                    }
                    RepositoryError::ValidationError { message, .. } => {
                        (StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
                    }
                    RepositoryError::ConfigurationError { message, .. }
                    | RepositoryError::LoadError { message, .. }
                    | RepositoryError::InternalError { message, .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "REPOSITORY_ERROR",
                        message,
                    ),
                };
                (status, ApiError::new(code, message.clone()).with_details(details))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.to_api_error();
        if status.is_server_error() {
            log::error!("{} {}", error.code, error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let err = AppError::from(RepositoryError::not_found_with_context(
            "Dataset 4 not found",
            ErrorContext::new("get_dataset").with_entity_id(4),
        ));
        let (status, body) = err.to_api_error();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Dataset 4 not found");
        assert_eq!(
            body.details.as_deref(),
            Some("[operation=get_dataset, id=4]")
        );
    }

    #[test]
    fn test_repository_validation_maps_to_400() {
        let (status, body) =
            AppError::from(RepositoryError::validation("empty name")).to_api_error();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "BAD_REQUEST");
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let (status, body) =
            AppError::from(RepositoryError::internal("boom")).to_api_error();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "REPOSITORY_ERROR");

        let (status, body) = AppError::from(anyhow::anyhow!("oops")).to_api_error();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_api_error_omits_empty_details() {
        let json = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope")).unwrap();
        assert!(json.get("details").is_none());
    }
}
