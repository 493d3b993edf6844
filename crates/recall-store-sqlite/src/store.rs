//! [`SqliteStore`] — the SQLite implementation of [`ConceptStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use recall_core::{
  concept::{Concept, ConceptId, NewConcept},
  store::{ConceptStore, Snapshot, UpdateOutcome},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{CONCEPT_COLUMNS, ConceptColumns, RawConcept, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A concept store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the connection, waiting for queued calls to finish.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  /// Run arbitrary SQL, bypassing the typed API.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ConceptStore impl ───────────────────────────────────────────────────────

impl ConceptStore for SqliteStore {
  type Error = crate::Error;

  async fn load_all(&self) -> Result<Snapshot> {
    let raws: Vec<RawConcept> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONCEPT_COLUMNS} FROM concepts ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawConcept::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let snapshot = Snapshot::from_records(raws.into_iter().map(RawConcept::into_record));
    for bad in &snapshot.malformed {
      tracing::warn!("skipping {bad}");
    }
    Ok(snapshot)
  }

  async fn get(&self, id: ConceptId) -> Result<Option<Concept>> {
    let id_val = encode_id(id)?;

    let raw: Option<RawConcept> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONCEPT_COLUMNS} FROM concepts WHERE id = ?1"),
              rusqlite::params![id_val],
              RawConcept::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawConcept::into_concept).transpose()
  }

  async fn insert(&self, input: NewConcept, now: DateTime<Utc>) -> Result<Concept> {
    // The real id is only known after the row exists.
    let draft = input.into_concept(ConceptId(0), now);
    let cols = ConceptColumns::from(&draft);

    let rowid: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO concepts (
             title, description, status, current_cycle,
             created_at, last_completed, next_review
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            cols.title,
            cols.description,
            cols.status,
            cols.current_cycle,
            cols.created_at,
            cols.last_completed,
            cols.next_review,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    // AUTOINCREMENT rowids start at 1 and only grow.
    let concept = Concept { id: ConceptId(rowid as u64), ..draft };
    tracing::debug!(id = %concept.id, "inserted concept");
    Ok(concept)
  }

  async fn update(&self, expected_cycle: u32, concept: Concept) -> Result<UpdateOutcome> {
    let id_val = encode_id(concept.id)?;
    let expected = i64::from(expected_cycle);
    let cols = ConceptColumns::from(&concept);

    let outcome = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE concepts SET
             title = ?1, description = ?2, status = ?3, current_cycle = ?4,
             last_completed = ?5, next_review = ?6
           WHERE id = ?7 AND current_cycle = ?8",
          rusqlite::params![
            cols.title,
            cols.description,
            cols.status,
            cols.current_cycle,
            cols.last_completed,
            cols.next_review,
            id_val,
            expected,
          ],
        )?;
        if changed > 0 {
          return Ok(UpdateOutcome::Updated);
        }

        let exists = conn
          .query_row(
            "SELECT 1 FROM concepts WHERE id = ?1",
            rusqlite::params![id_val],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        Ok(if exists { UpdateOutcome::Stale } else { UpdateOutcome::NotFound })
      })
      .await?;

    Ok(outcome)
  }

  async fn delete(&self, id: ConceptId) -> Result<bool> {
    let id_val = encode_id(id)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM concepts WHERE id = ?1", rusqlite::params![id_val])?)
      })
      .await?;

    Ok(changed > 0)
  }
}
