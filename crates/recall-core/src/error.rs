//! Error types for `recall-core`.

use thiserror::Error;

use crate::concept::ConceptId;

/// Input rejected before it becomes a concept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("title must not be empty")]
  EmptyTitle,
}

/// A persisted record that could not be decoded into a
/// [`Concept`](crate::concept::Concept).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record {}: {reason}", describe_id(.id))]
pub struct MalformedRecord {
  /// The record's id, when it was at least readable.
  pub id:     Option<u64>,
  pub reason: String,
}

impl MalformedRecord {
  pub fn new(id: Option<u64>, reason: impl Into<String>) -> Self {
    Self { id, reason: reason.into() }
  }
}

fn describe_id(id: &Option<u64>) -> String {
  match id {
    Some(id) => format!("#{id}"),
    None => "(no id)".to_owned(),
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("concept not found: {0}")]
  NotFound(ConceptId),

  #[error("concept {0} was modified concurrently")]
  Conflict(ConceptId),

  #[error(transparent)]
  Malformed(#[from] MalformedRecord),

  #[error("storage unavailable: {0}")]
  StorageUnavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
