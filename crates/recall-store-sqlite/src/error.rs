//! Error type for `recall-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// An id that does not fit SQLite's signed 64-bit integer.
  #[error("concept id out of range: {0}")]
  IdRange(u64),

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
