//! Encoding and decoding helpers between Recall domain types and SQLite
//! columns.
//!
//! Timestamps are stored as RFC 3339 strings. Rows are read loosely into a
//! [`RawConcept`] and validated through [`ConceptRecord`], so a damaged row
//! becomes a [`MalformedRecord`] rather than a failed query.

use recall_core::{
  MalformedRecord,
  concept::{Concept, ConceptId, ConceptRecord, format_timestamp},
};
use rusqlite::{Row, types::ValueRef};

use crate::{Error, Result};

/// Column list shared by every `SELECT` that builds a [`RawConcept`].
pub const CONCEPT_COLUMNS: &str = "id, title, description, status, current_cycle, \
   created_at, last_completed, next_review";

// ─── Ids ─────────────────────────────────────────────────────────────────────

pub fn encode_id(id: ConceptId) -> Result<i64> {
  i64::try_from(id.0).map_err(|_| Error::IdRange(id.0))
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// Read a column as text, whatever its storage class.
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Null => None,
    ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
      Some(String::from_utf8_lossy(bytes).into_owned())
    }
    ValueRef::Integer(i) => Some(i.to_string()),
    ValueRef::Real(f) => Some(f.to_string()),
  })
}

/// Read a column as an integer; anything else is described in the `Err`.
fn integer(row: &Row<'_>, idx: usize) -> rusqlite::Result<Result<Option<i64>, String>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Null => Ok(None),
    ValueRef::Integer(i) => Ok(Some(i)),
    other => Err(format!("non-integer cycle count ({:?})", other.data_type())),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Values read directly from a `concepts` row.
pub struct RawConcept {
  pub id:             i64,
  pub title:          Option<String>,
  pub description:    Option<String>,
  pub status:         Option<String>,
  pub current_cycle:  Result<Option<i64>, String>,
  pub created_at:     Option<String>,
  pub last_completed: Option<String>,
  pub next_review:    Option<String>,
}

impl RawConcept {
  /// Map a row selected with [`CONCEPT_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      title:          text(row, 1)?,
      description:    text(row, 2)?,
      status:         text(row, 3)?,
      current_cycle:  integer(row, 4)?,
      created_at:     text(row, 5)?,
      last_completed: text(row, 6)?,
      next_review:    text(row, 7)?,
    })
  }

  pub fn into_record(self) -> Result<ConceptRecord, MalformedRecord> {
    let id = u64::try_from(self.id).ok();
    let current_cycle = self
      .current_cycle
      .map_err(|reason| MalformedRecord::new(id, reason))?;
    Ok(ConceptRecord {
      id,
      title: self.title,
      description: self.description,
      status: self.status,
      current_cycle,
      created_at: self.created_at,
      last_completed: self.last_completed,
      next_review: self.next_review,
    })
  }

  pub fn into_concept(self) -> Result<Concept> {
    Ok(Concept::try_from(self.into_record()?)?)
  }
}

/// Owned column values for binding a [`Concept`] into an `INSERT`/`UPDATE`.
pub struct ConceptColumns {
  pub title:          String,
  pub description:    Option<String>,
  pub status:         String,
  pub current_cycle:  i64,
  pub created_at:     String,
  pub last_completed: Option<String>,
  pub next_review:    String,
}

impl From<&Concept> for ConceptColumns {
  fn from(c: &Concept) -> Self {
    Self {
      title:          c.title.clone(),
      description:    c.description.clone(),
      status:         c.status.as_str().to_owned(),
      current_cycle:  i64::from(c.current_cycle),
      created_at:     format_timestamp(c.created_at),
      last_completed: c.last_completed.map(format_timestamp),
      next_review:    format_timestamp(c.next_review),
    }
  }
}
