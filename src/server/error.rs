//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::GbpError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API error with HTTP status code, rendered as `{"error": message}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    #[serde(rename = "error")]
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a domain error, using `fallback` as the message for failures
    /// that carry no provider message.
    pub fn from_gbp(err: GbpError, fallback: &str) -> Self {
        match err {
            GbpError::MissingInput(message) | GbpError::Validation(message) => {
                Self::bad_request(message)
            }
            GbpError::UpstreamProvider { message, .. } => Self::internal(message),
            other => {
                tracing::error!(error = %other, "{fallback}");
                Self::internal(fallback)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body() {
        let err = ApiError::bad_request("Query parameter is required");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json, serde_json::json!({"error": "Query parameter is required"}));
    }

    #[test]
    fn test_domain_error_mapping() {
        let err = ApiError::from_gbp(GbpError::missing_input("business name is required"), "x");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ApiError::from_gbp(
            GbpError::upstream("REQUEST_DENIED", "The provided API key is invalid."),
            "Failed to search places",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "The provided API key is invalid.");

        let err = ApiError::from_gbp(GbpError::config("bad"), "Failed to search places");
        assert_eq!(err.message, "Failed to search places");
    }
}
