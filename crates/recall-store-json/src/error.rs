//! Error type for `recall-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The file is valid JSON but neither an array of records nor a store
  /// document.
  #[error("unrecognised store layout in {0}")]
  Layout(PathBuf),

  #[error(transparent)]
  Malformed(#[from] recall_core::MalformedRecord),
}

impl From<Error> for recall_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Malformed(m) => recall_core::Error::Malformed(m),
      other => recall_core::Error::StorageUnavailable(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
