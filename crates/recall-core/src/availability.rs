//! Availability — which concepts are due now and which are waiting.
//!
//! Computed on every read from a snapshot of the store; nothing here is
//! persisted or cached.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::concept::Concept;

/// A pending concept that is not yet due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledConcept {
  #[serde(flatten)]
  pub concept:   Concept,
  /// Whole days until `next_review`, truncated toward zero.
  pub wait_days: u64,
}

/// The result of [`partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
  /// Due concepts, in input (storage) order.
  pub due:       Vec<Concept>,
  /// Waiting concepts, soonest first; ties keep input order.
  pub scheduled: Vec<ScheduledConcept>,
}

/// Split the pending concepts into due and scheduled sets as of `now`.
///
/// A concept is due when `next_review <= now`. Non-pending concepts appear
/// in neither set.
pub fn partition(concepts: &[Concept], now: DateTime<Utc>) -> Availability {
  let mut availability = Availability::default();

  for concept in concepts.iter().filter(|c| c.is_pending()) {
    if concept.next_review <= now {
      availability.due.push(concept.clone());
    } else {
      let wait_days = (concept.next_review - now).num_days().max(0) as u64;
      availability.scheduled.push(ScheduledConcept {
        concept: concept.clone(),
        wait_days,
      });
    }
  }

  // `sort_by_key` is stable, so equal timestamps keep storage order.
  availability.scheduled.sort_by_key(|s| s.concept.next_review);
  availability
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
  /// Every concept, whatever its status.
  pub total: usize,
  pub due:   usize,
  /// Pending concepts that are not yet due.
  pub later: usize,
}

impl Stats {
  pub fn derive(concepts: &[Concept], availability: &Availability) -> Self {
    let pending = concepts.iter().filter(|c| c.is_pending()).count();
    let due = availability.due.len();
    Self { total: concepts.len(), due, later: pending.saturating_sub(due) }
  }
}
