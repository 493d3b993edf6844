//! [`JsonStore`] — the flat-file implementation of [`ConceptStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::{DateTime, Utc};
use recall_core::{
  concept::{Concept, ConceptId, NewConcept},
  store::{ConceptStore, Snapshot, UpdateOutcome},
};
use tokio::sync::Mutex;

use crate::{
  Error, Result,
  document::{self, Document},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A concept store backed by a single JSON file.
///
/// Every operation reads the file afresh. Writers take an in-process lock
/// around read-modify-write, and the file is replaced by rename so readers
/// never see a partial document.
///
/// Cloning is cheap — clones share the same lock.
#[derive(Clone)]
pub struct JsonStore {
  path: PathBuf,
  lock: Arc<Mutex<()>>,
}

impl JsonStore {
  /// Open the store at `path`, creating its parent directory if needed.
  ///
  /// A missing file is an empty store; it is created on the first write. An
  /// existing file must parse, so a corrupt store fails at startup rather
  /// than on the first request.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
    }

    let store = Self { path, lock: Arc::new(Mutex::new(())) };
    let doc = store.read().await?;
    tracing::debug!(
      path = %store.path.display(),
      records = doc.concepts.len(),
      "opened json store"
    );
    Ok(store)
  }

  pub fn path(&self) -> &Path { &self.path }

  async fn read(&self) -> Result<Document> {
    match tokio::fs::read(&self.path).await {
      Ok(bytes) => Document::parse(&bytes, &self.path),
      Err(e) if e.kind() == ErrorKind::NotFound => Document::parse(b"", &self.path),
      Err(source) => Err(Error::Io { path: self.path.clone(), source }),
    }
  }

  /// Replace the file with `doc` via a sibling temp file and rename.
  async fn write(&self, doc: &Document) -> Result<()> {
    let tmp = self.path.with_extension("json.tmp");
    let bytes = doc.to_bytes()?;
    tokio::fs::write(&tmp, bytes)
      .await
      .map_err(|source| Error::Io { path: tmp.clone(), source })?;
    tokio::fs::rename(&tmp, &self.path)
      .await
      .map_err(|source| Error::Io { path: self.path.clone(), source })?;
    Ok(())
  }
}

// ─── ConceptStore impl ───────────────────────────────────────────────────────

impl ConceptStore for JsonStore {
  type Error = Error;

  async fn load_all(&self) -> Result<Snapshot> {
    let doc = self.read().await?;
    let snapshot = Snapshot::from_records(doc.records());
    for bad in &snapshot.malformed {
      tracing::warn!(path = %self.path.display(), "skipping {bad}");
    }
    Ok(snapshot)
  }

  async fn get(&self, id: ConceptId) -> Result<Option<Concept>> {
    let doc = self.read().await?;
    let Some(index) = doc.position(id) else {
      return Ok(None);
    };
    let record = document::decode(&doc.concepts[index])?;
    Ok(Some(Concept::try_from(record)?))
  }

  async fn insert(&self, input: NewConcept, now: DateTime<Utc>) -> Result<Concept> {
    let _guard = self.lock.lock().await;
    let mut doc = self.read().await?;

    let concept = input.into_concept(doc.allocate_id(), now);
    doc.concepts.push(document::encode(&concept)?);
    self.write(&doc).await?;

    tracing::debug!(id = %concept.id, "inserted concept");
    Ok(concept)
  }

  async fn update(&self, expected_cycle: u32, concept: Concept) -> Result<UpdateOutcome> {
    let _guard = self.lock.lock().await;
    let mut doc = self.read().await?;

    let Some(index) = doc.position(concept.id) else {
      return Ok(UpdateOutcome::NotFound);
    };

    // A record that no longer decodes cannot satisfy the precondition.
    let stored_cycle = document::decode(&doc.concepts[index])
      .and_then(Concept::try_from)
      .map(|stored| stored.current_cycle);
    if stored_cycle != Ok(expected_cycle) {
      return Ok(UpdateOutcome::Stale);
    }

    doc.concepts[index] = document::encode(&concept)?;
    self.write(&doc).await?;
    Ok(UpdateOutcome::Updated)
  }

  async fn delete(&self, id: ConceptId) -> Result<bool> {
    let _guard = self.lock.lock().await;
    let mut doc = self.read().await?;

    let Some(index) = doc.position(id) else {
      return Ok(false);
    };
    doc.concepts.remove(index);
    self.write(&doc).await?;
    Ok(true)
  }
}
