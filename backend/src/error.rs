use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use datalens_core::CoreError;
use datalens_core::errors::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Error returned by every handler. Rendered as
/// `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  /// Missing or malformed `x-user-id`.
  #[error("{0}")]
  Unauthorized(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("{0}")]
  Internal(String),
}

impl From<CoreError> for ApiError {
  fn from(err: CoreError) -> Self {
    match err {
      CoreError::Validation(v) => ApiError::Validation(v),
      CoreError::NotFound => ApiError::NotFound("dashboard not found".to_string()),
      CoreError::Repository(msg) => ApiError::Internal(msg),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = match &self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
      ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
      ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
      ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let body = Json(json!({
      "error": {
        "code": code,
        "message": self.to_string(),
      }
    }));

    (status, body).into_response()
  }
}

pub type ApiResult<T> = Result<T, ApiError>;
