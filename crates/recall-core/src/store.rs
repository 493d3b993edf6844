//! The `ConceptStore` trait and the snapshot type it returns.
//!
//! The trait is implemented by storage backends (`recall-store-json`,
//! `recall-store-sqlite`). Higher layers (`recall-api`, `recall-web`) depend
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  MalformedRecord,
  concept::{Concept, ConceptId, ConceptRecord, NewConcept},
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Everything a backend could read in one pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  /// Well-formed concepts, in storage order.
  pub concepts:  Vec<Concept>,
  /// Records skipped because they failed validation.
  pub malformed: Vec<MalformedRecord>,
}

impl Snapshot {
  /// Validate raw records, keeping the good ones and setting aside the rest.
  pub fn from_records<I>(records: I) -> Self
  where
    I: IntoIterator<Item = Result<ConceptRecord, MalformedRecord>>,
  {
    let mut snapshot = Self::default();
    for record in records {
      match record.and_then(Concept::try_from) {
        Ok(concept) => snapshot.concepts.push(concept),
        Err(bad) => snapshot.malformed.push(bad),
      }
    }
    snapshot
  }
}

// ─── Update outcome ──────────────────────────────────────────────────────────

/// Result of a conditional write via [`ConceptStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
  Updated,
  /// No record with that id exists.
  NotFound,
  /// The record exists but its cycle count no longer matches the caller's
  /// expectation; another writer got there first.
  Stale,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a concept store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ConceptStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every record. Malformed records are reported in the snapshot, not
  /// as an error.
  fn load_all(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Retrieve one concept. Returns `None` if no record has this id.
  fn get(
    &self,
    id: ConceptId,
  ) -> impl Future<Output = Result<Option<Concept>, Self::Error>> + Send + '_;

  /// Persist a new concept. The store assigns its id; ids are never handed
  /// out twice, even after deletion.
  fn insert(
    &self,
    input: NewConcept,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Concept, Self::Error>> + Send + '_;

  /// Overwrite an existing concept, but only if the stored record still has
  /// `expected_cycle` completed reviews.
  ///
  /// The cycle count rises by one on every completion, so it serves as the
  /// record's version for optimistic concurrency.
  fn update(
    &self,
    expected_cycle: u32,
    concept: Concept,
  ) -> impl Future<Output = Result<UpdateOutcome, Self::Error>> + Send + '_;

  /// Permanently remove a concept. Returns `false` if it did not exist.
  fn delete(
    &self,
    id: ConceptId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
