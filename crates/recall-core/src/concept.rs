//! Concept — the unit of learning content the user reviews periodically.
//!
//! A concept carries its own review history (cycle count and timestamps).
//! Storage backends persist it as a [`ConceptRecord`], a loosely-typed shape
//! that is validated back into a [`Concept`] on every read.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MalformedRecord, ValidationError};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned identifier. Never reused after deletion within a store.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConceptId(pub u64);

impl fmt::Display for ConceptId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Only `Pending` concepts take part in scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  #[default]
  Pending,
  Archived,
}

impl Status {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Archived => "archived",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(Self::Pending),
      "archived" => Some(Self::Archived),
      _ => None,
    }
  }
}

// ─── Concept ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
  pub id:             ConceptId,
  pub title:          String,
  pub description:    Option<String>,
  pub status:         Status,
  /// Number of completed reviews.
  pub current_cycle:  u32,
  /// Set once at creation.
  pub created_at:     DateTime<Utc>,
  pub last_completed: Option<DateTime<Utc>>,
  /// The concept is due at or after this instant.
  pub next_review:    DateTime<Utc>,
}

impl Concept {
  pub fn is_pending(&self) -> bool { self.status == Status::Pending }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.is_pending() && self.next_review <= now
  }
}

// ─── NewConcept ──────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::ConceptStore::insert`].
///
/// The title is trimmed and guaranteed non-empty; a blank description is
/// normalised to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConcept {
  title:       String,
  description: Option<String>,
}

impl NewConcept {
  pub fn new(
    title: impl AsRef<str>,
    description: Option<&str>,
  ) -> Result<Self, ValidationError> {
    let title = title.as_ref().trim();
    if title.is_empty() {
      return Err(ValidationError::EmptyTitle);
    }
    let description = description
      .map(str::trim)
      .filter(|d| !d.is_empty())
      .map(str::to_owned);
    Ok(Self { title: title.to_owned(), description })
  }

  pub fn title(&self) -> &str { &self.title }

  pub fn description(&self) -> Option<&str> { self.description.as_deref() }

  /// Build the initial concept: pending, cycle 0, due immediately.
  pub fn into_concept(self, id: ConceptId, now: DateTime<Utc>) -> Concept {
    Concept {
      id,
      title: self.title,
      description: self.description,
      status: Status::Pending,
      current_cycle: 0,
      created_at: now,
      last_completed: None,
      next_review: now,
    }
  }
}

// ─── Timestamps ──────────────────────────────────────────────────────────────

/// Encode a timestamp the way every backend stores it (RFC 3339).
pub fn format_timestamp(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, and also the offset-less ISO 8601 form written by older
/// task files (`2024-03-01T09:30:00.123456`), which is read as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
    .map(|naive| naive.and_utc())
    .map_err(|e| format!("invalid timestamp {s:?}: {e}"))
}

// ─── ConceptRecord ───────────────────────────────────────────────────────────

/// The persisted shape of a concept, exactly as a backend reads it.
///
/// Every field is optional so that a damaged record decodes into a
/// [`MalformedRecord`] naming the problem instead of failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
  pub id:             Option<u64>,
  pub title:          Option<String>,
  #[serde(default)]
  pub description:    Option<String>,
  pub status:         Option<String>,
  pub current_cycle:  Option<i64>,
  pub created_at:     Option<String>,
  #[serde(default)]
  pub last_completed: Option<String>,
  pub next_review:    Option<String>,
}

impl From<&Concept> for ConceptRecord {
  fn from(c: &Concept) -> Self {
    Self {
      id:             Some(c.id.0),
      title:          Some(c.title.clone()),
      description:    c.description.clone(),
      status:         Some(c.status.as_str().to_owned()),
      current_cycle:  Some(i64::from(c.current_cycle)),
      created_at:     Some(format_timestamp(c.created_at)),
      last_completed: c.last_completed.map(format_timestamp),
      next_review:    Some(format_timestamp(c.next_review)),
    }
  }
}

impl TryFrom<ConceptRecord> for Concept {
  type Error = MalformedRecord;

  fn try_from(r: ConceptRecord) -> Result<Self, Self::Error> {
    let id = r.id;
    let bad = |reason: String| MalformedRecord::new(id, reason);
    let required = |field: Option<String>, name: &str| {
      field.ok_or_else(|| MalformedRecord::new(id, format!("missing {name}")))
    };

    let concept_id = ConceptId(id.ok_or_else(|| bad("missing id".into()))?);

    let title = required(r.title, "title")?;
    if title.trim().is_empty() {
      return Err(bad("empty title".into()));
    }

    let status_str = r.status.unwrap_or_else(|| "pending".to_owned());
    let status = Status::parse(&status_str)
      .ok_or_else(|| bad(format!("unknown status {status_str:?}")))?;

    let cycle = r.current_cycle.unwrap_or(0);
    let current_cycle = u32::try_from(cycle)
      .map_err(|_| bad(format!("cycle count out of range: {cycle}")))?;

    let created_at = parse_timestamp(&required(r.created_at, "created_at")?)
      .map_err(&bad)?;
    let next_review = parse_timestamp(&required(r.next_review, "next_review")?)
      .map_err(&bad)?;
    let last_completed = r
      .last_completed
      .as_deref()
      .map(parse_timestamp)
      .transpose()
      .map_err(&bad)?;

    Ok(Concept {
      id: concept_id,
      title,
      description: r
        .description
        .map(|d| d.trim().to_owned())
        .filter(|d| !d.is_empty()),
      status,
      current_cycle,
      created_at,
      last_completed,
      next_review,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn record() -> ConceptRecord {
    ConceptRecord {
      id:             Some(7),
      title:          Some("Borrow checker".into()),
      description:    Some(String::new()),
      status:         Some("pending".into()),
      current_cycle:  Some(2),
      created_at:     Some("2024-03-01T09:30:00+00:00".into()),
      last_completed: None,
      next_review:    Some("2024-03-04T09:30:00Z".into()),
    }
  }

  #[test]
  fn new_concept_rejects_blank_title() {
    assert_eq!(NewConcept::new("   ", None), Err(ValidationError::EmptyTitle));
    assert_eq!(NewConcept::new("", Some("notes")), Err(ValidationError::EmptyTitle));
  }

  #[test]
  fn new_concept_trims_and_normalises() {
    let input = NewConcept::new("  Lifetimes ", Some("  ")).unwrap();
    assert_eq!(input.title(), "Lifetimes");
    assert_eq!(input.description(), None);
  }

  #[test]
  fn new_concept_is_due_immediately() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let concept = NewConcept::new("Traits", Some("dyn vs impl"))
      .unwrap()
      .into_concept(ConceptId(1), now);

    assert_eq!(concept.status, Status::Pending);
    assert_eq!(concept.current_cycle, 0);
    assert_eq!(concept.created_at, now);
    assert_eq!(concept.next_review, now);
    assert!(concept.last_completed.is_none());
    assert!(concept.is_due(now));
  }

  #[test]
  fn record_decodes_into_concept() {
    let concept = Concept::try_from(record()).unwrap();
    assert_eq!(concept.id, ConceptId(7));
    assert_eq!(concept.current_cycle, 2);
    assert_eq!(concept.description, None);
    assert_eq!(
      concept.next_review,
      Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap()
    );
  }

  #[test]
  fn record_description_is_trimmed_like_new_input() {
    let mut r = record();
    r.description = Some(" \t\n ".into());
    assert_eq!(Concept::try_from(r).unwrap().description, None);

    let mut r = record();
    r.description = Some("  moves and copies ".into());
    assert_eq!(
      Concept::try_from(r).unwrap().description.as_deref(),
      Some("moves and copies")
    );
  }

  #[test]
  fn record_accepts_naive_legacy_timestamps() {
    let mut r = record();
    r.created_at = Some("2024-03-01T09:30:00.123456".into());
    r.last_completed = Some("2024-03-02T10:00:00".into());

    let concept = Concept::try_from(r).unwrap();
    assert_eq!(
      concept.last_completed,
      Some(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap())
    );
  }

  #[test]
  fn encode_then_decode_preserves_concept() {
    let original = Concept::try_from(record()).unwrap();
    let decoded = Concept::try_from(ConceptRecord::from(&original)).unwrap();
    assert_eq!(decoded, original);
  }

  #[test]
  fn negative_cycle_is_malformed() {
    let mut r = record();
    r.current_cycle = Some(-1);
    let err = Concept::try_from(r).unwrap_err();
    assert_eq!(err.id, Some(7));
    assert!(err.reason.contains("cycle"), "{err}");
  }

  #[test]
  fn unparseable_timestamp_is_malformed() {
    let mut r = record();
    r.next_review = Some("next tuesday".into());
    let err = Concept::try_from(r).unwrap_err();
    assert!(err.reason.contains("next tuesday"), "{err}");
  }

  #[test]
  fn missing_fields_are_malformed() {
    let mut r = record();
    r.next_review = None;
    assert!(Concept::try_from(r).unwrap_err().reason.contains("next_review"));

    let mut r = record();
    r.id = None;
    assert_eq!(Concept::try_from(r).unwrap_err().id, None);
  }

  #[test]
  fn unknown_status_is_malformed() {
    let mut r = record();
    r.status = Some("done".into());
    assert!(Concept::try_from(r).is_err());
  }
}
