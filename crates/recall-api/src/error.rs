//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("precondition failed")]
  PreconditionFailed,

  #[error("storage unavailable: {0}")]
  Unavailable(String),

  #[error("store error: {0}")]
  Store(#[source] recall_core::Error),
}

impl From<recall_core::Error> for ApiError {
  fn from(e: recall_core::Error) -> Self {
    use recall_core::Error as E;
    match e {
      E::Validation(v) => ApiError::BadRequest(v.to_string()),
      E::NotFound(id) => ApiError::NotFound(format!("concept {id} not found")),
      E::Conflict(id) => {
        ApiError::Conflict(format!("concept {id} was reviewed concurrently"))
      }
      E::StorageUnavailable(m) => ApiError::Unavailable(m),
      other @ E::Malformed(_) => ApiError::Store(other),
    }
  }
}

/// Convert a backend error into an [`ApiError`] via [`recall_core::Error`].
pub fn store_error<E: Into<recall_core::Error>>(e: E) -> ApiError {
  ApiError::from(e.into())
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!("{self}");
    }
    let message = match &self {
      ApiError::NotFound(m)
      | ApiError::BadRequest(m)
      | ApiError::Conflict(m)
      | ApiError::Unavailable(m) => m.clone(),
      other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
