//! Concept lifecycle: add, complete a review, delete.
//!
//! [`complete`] is the only place the cycle count and the next review date
//! change together. The async helpers run it against a [`ConceptStore`] and
//! translate backend errors into [`Error`].

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  concept::{Concept, ConceptId, NewConcept},
  schedule::next_review_date,
  store::{ConceptStore, UpdateOutcome},
};

fn into_core<E: Into<Error>>(e: E) -> Error { e.into() }

/// Record one completed review of `concept` at `now`.
///
/// The cycle count goes up by one before the table lookup, so the first
/// completion lands on the second interval (3 days). The 1-day slot is never
/// reached through completion.
pub fn complete(concept: &Concept, now: DateTime<Utc>) -> Concept {
  let current_cycle = concept.current_cycle.saturating_add(1);
  Concept {
    current_cycle,
    last_completed: Some(now),
    next_review: next_review_date(current_cycle, now),
    ..concept.clone()
  }
}

/// Create a concept from validated input.
pub async fn add_concept<S>(
  store: &S,
  input: NewConcept,
  now: DateTime<Utc>,
) -> Result<Concept>
where
  S: ConceptStore,
  S::Error: Into<Error>,
{
  store.insert(input, now).await.map_err(into_core)
}

/// Complete a review of the concept with `id` and persist the result.
///
/// Fails with [`Error::NotFound`] if the concept is gone, and with
/// [`Error::Conflict`] if another completion was written in between the read
/// and the write.
pub async fn record_review<S>(
  store: &S,
  id: ConceptId,
  now: DateTime<Utc>,
) -> Result<Concept>
where
  S: ConceptStore,
  S::Error: Into<Error>,
{
  let current = store
    .get(id)
    .await
    .map_err(into_core)?
    .ok_or(Error::NotFound(id))?;

  record_review_of(store, &current, now).await
}

/// Complete a review of `current`, a concept the caller has already read.
///
/// The write only lands if the stored concept still has the cycle count
/// `current` was read with; otherwise [`Error::Conflict`].
pub async fn record_review_of<S>(
  store: &S,
  current: &Concept,
  now: DateTime<Utc>,
) -> Result<Concept>
where
  S: ConceptStore,
  S::Error: Into<Error>,
{
  let updated = complete(current, now);

  match store
    .update(current.current_cycle, updated.clone())
    .await
    .map_err(into_core)?
  {
    UpdateOutcome::Updated => Ok(updated),
    UpdateOutcome::NotFound => Err(Error::NotFound(current.id)),
    UpdateOutcome::Stale => Err(Error::Conflict(current.id)),
  }
}

/// Permanently delete the concept with `id`.
pub async fn delete_concept<S>(store: &S, id: ConceptId) -> Result<()>
where
  S: ConceptStore,
  S::Error: Into<Error>,
{
  if store.delete(id).await.map_err(into_core)? {
    Ok(())
  } else {
    Err(Error::NotFound(id))
  }
}
