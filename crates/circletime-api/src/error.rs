//! CircleTime: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use circletime_core::error::StoryError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `StoryError` that implements `IntoResponse`.
///
/// Only the user-facing message is sent; diagnostic detail stays in logs.
#[derive(Debug)]
pub struct ApiError(pub StoryError);

impl From<StoryError> for ApiError {
    fn from(err: StoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.user_message().to_owned(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::Value;

    fn status_of(err: StoryError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(StoryError::Validation("topic must not be empty".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_provider_status_is_passed_through() {
        assert_eq!(
            status_of(StoryError::ProviderUnavailable {
                status: Some(503),
                reason: "busy".into(),
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_provider_without_status_maps_to_500() {
        assert_eq!(
            status_of(StoryError::ProviderUnavailable {
                status: None,
                reason: "timed out".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_shape_and_parse_failures_map_to_500() {
        assert_eq!(
            status_of(StoryError::MalformedResponse("eof".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(StoryError::InvalidStoryShape("pages is missing".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_body_carries_code_and_user_message_only() {
        // Arrange
        let err = StoryError::ProviderUnavailable {
            status: Some(401),
            reason: "bad key sk-or-secret".into(),
        };

        // Act
        let response = ApiError(err).into_response();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();

        // Assert
        assert_eq!(json["error"], "provider_unavailable");
        assert!(!json["message"].as_str().unwrap().contains("sk-or-secret"));
    }
}
