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
/// Extraction and LLM failures never reach this type: both recover locally.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing parameters")]
    MissingParameters(Option<String>),

    #[error("failed to decode file: {0}")]
    DecodeFailed(String),

    #[error("no fileData or textData provided")]
    NoPayload,

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("db update failed: {0}")]
    DbUpdateFailed(String),
}

impl AppError {
    /// Wire-level error code placed in the `error` field of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameters(_) => "missing parameters",
            AppError::DecodeFailed(_) => "failed to decode file",
            AppError::NoPayload => "no fileData or textData provided",
            AppError::JobNotFound(_) => "job not found",
            AppError::Database(_) => "database error",
            AppError::DbUpdateFailed(_) => "db update failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameters(_) | AppError::DecodeFailed(_) | AppError::NoPayload => {
                StatusCode::BAD_REQUEST
            }
            AppError::JobNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::DbUpdateFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AppError::MissingParameters(details) => details.clone(),
            AppError::DecodeFailed(details) | AppError::DbUpdateFailed(details) => {
                Some(details.clone())
            }
            AppError::Database(e) => Some(e.to_string()),
            AppError::NoPayload | AppError::JobNotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {e}"),
            AppError::DbUpdateFailed(msg) => tracing::error!("DB update failed: {msg}"),
            other => tracing::debug!("Rejecting request: {other}"),
        }

        let body = match self.details() {
            Some(details) => json!({ "error": self.code(), "details": details }),
            None => json!({ "error": self.code() }),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_parameters_is_bad_request() {
        let (status, body) = body_json(AppError::MissingParameters(None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "missing parameters" }));
    }

    #[tokio::test]
    async fn test_decode_failure_carries_details() {
        let (status, body) = body_json(AppError::DecodeFailed("Invalid padding".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "failed to decode file");
        assert_eq!(body["details"], "Invalid padding");
    }

    #[tokio::test]
    async fn test_job_not_found_is_404_without_details() {
        let (status, body) = body_json(AppError::JobNotFound("42".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "job not found" }));
    }

    #[tokio::test]
    async fn test_db_update_failure_is_500() {
        let (status, body) = body_json(AppError::DbUpdateFailed("deadlock".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "db update failed");
        assert_eq!(body["details"], "deadlock");
    }

    #[tokio::test]
    async fn test_database_error_is_500_with_details() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "database error");
        assert!(body["details"].is_string());
    }

    #[test]
    fn test_no_payload_code_matches_wire_text() {
        assert_eq!(AppError::NoPayload.code(), "no fileData or textData provided");
        assert_eq!(AppError::NoPayload.status(), StatusCode::BAD_REQUEST);
    }
}
