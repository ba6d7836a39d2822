use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// User-facing messages stay short and actionable; upstream payloads and stack
/// traces are logged, never surfaced.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Scoring service error (status {status})")]
    Upstream { status: u16, detail: String },

    #[error("Scoring service unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("Scoring service timed out")]
    UpstreamTimeout,

    #[error("Scoring service contract violation: {0}")]
    UpstreamContract(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                format!("File too large: {msg}"),
            ),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_FILE_FORMAT",
                format!("Invalid file format: {msg}"),
            ),
            AppError::Upstream { status, detail } => {
                tracing::error!("Scoring backend returned {status}: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_SERVICE_ERROR",
                    "The scoring service reported an error. Please try again.".to_string(),
                )
            }
            AppError::UpstreamUnavailable(detail) => {
                tracing::error!("Scoring backend unreachable: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_SERVICE_UNAVAILABLE",
                    "Could not reach the scoring service. Please try again.".to_string(),
                )
            }
            AppError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "PROCESSING_TIMEOUT",
                "Processing timed out. Please retry with fewer files.".to_string(),
            ),
            AppError::UpstreamContract(detail) => {
                tracing::error!("Scoring backend contract violation: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_CONTRACT_ERROR",
                    "The scoring service returned an unexpected response. Please try again."
                        .to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::PayloadTooLarge("a.pdf".into())),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status_of(AppError::UnsupportedFormat("a.txt".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Upstream {
                status: 500,
                detail: "boom".into()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::UpstreamTimeout),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(AppError::UpstreamContract("bad shape".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Validation("too short".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
