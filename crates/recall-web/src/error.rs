//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use recall_core::concept::ConceptId;
use thiserror::Error;

use crate::render;

#[derive(Debug, Error)]
pub enum Error {
  #[error("concept {0} not found")]
  NotFound(ConceptId),
  #[error("concept {0} was reviewed by another request; reload and try again")]
  Conflict(ConceptId),
  #[error("store error: {0}")]
  Store(#[source] recall_core::Error),
}

impl From<recall_core::Error> for Error {
  fn from(e: recall_core::Error) -> Self {
    match e {
      recall_core::Error::NotFound(id) => Error::NotFound(id),
      recall_core::Error::Conflict(id) => Error::Conflict(id),
      other => Error::Store(other),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Conflict(_) => StatusCode::CONFLICT,
      Error::Store(recall_core::Error::Validation(_)) => StatusCode::BAD_REQUEST,
      Error::Store(recall_core::Error::StorageUnavailable(_)) => {
        StatusCode::SERVICE_UNAVAILABLE
      }
      Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!("{self}");
    }
    (status, Html(render::error_page(status, &self.to_string()))).into_response()
  }
}
