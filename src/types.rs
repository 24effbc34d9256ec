// Type definitions and error taxonomy

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type. Supported: .html, .pdf")]
    UnsupportedType,

    /// Parser reported an in-band error for an accepted file type. Carries the
    /// parser's `error` value verbatim so the response detail matches it.
    #[error("Parser reported an error: {0}")]
    ParseFailed(serde_json::Value),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transient storage error: {0}")]
    TransientIo(#[from] std::io::Error),

    #[error("Store insert error: {0}")]
    StoreInsert(#[from] sqlx::Error),

    /// Parser crash or any other failure without a dedicated category.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::ParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TransientIo(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreInsert(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The value placed under `detail` in the error body. `ParseFailed` keeps
    /// the parser's error value as-is; everything else is a message string.
    fn detail(self) -> serde_json::Value {
        match self {
            AppError::ParseFailed(value) => value,
            AppError::InvalidRequest(msg) => serde_json::Value::String(msg),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "detail": self.detail() });
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
