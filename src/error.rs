//! Error types for the web server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Where unauthenticated clients are sent to sign in.
pub const LOGIN_URL: &str = "/api/login";

// == App Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client exhausted its rate limit quota
    #[error("Too many requests, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// No user on the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// Protected route hit without a user
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Route does not exist or is disabled
    #[error("Not found")]
    NotFound,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after.to_string())],
                Json(json!({
                    "error": "Too many requests",
                    "retryAfter": retry_after
                })),
            )
                .into_response(),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Not authenticated" })),
            )
                .into_response(),
            AppError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Authentication required",
                    "loginUrl": LOGIN_URL
                })),
            )
                .into_response(),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
            }
            AppError::Internal(msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn status_and_body(err: AppError) -> (StatusCode, Value, Response) {
        let response = err.into_response();
        let status = response.status();
        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json, Response::from_parts(parts, axum::body::Body::empty()))
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let (status, body, response) =
            status_and_body(AppError::RateLimited { retry_after: 60 }).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Too many requests");
        assert_eq!(body["retryAfter"], 60);
        assert_eq!(response.headers()[header::RETRY_AFTER], "60");
    }

    #[tokio::test]
    async fn test_auth_responses() {
        let (status, body, _) = status_and_body(AppError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authenticated");

        let (status, body, _) = status_and_body(AppError::AuthenticationRequired).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["loginUrl"], LOGIN_URL);
    }

    #[tokio::test]
    async fn test_not_found_and_internal() {
        let (status, body, _) = status_and_body(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");

        let (status, body, _) = status_and_body(AppError::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::RateLimited { retry_after: 5 }.to_string(),
            "Too many requests, retry after 5 seconds"
        );
    }
}
