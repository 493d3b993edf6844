//! On-disk layout of the JSON store.
//!
//! The current layout is an object carrying the id counter alongside the
//! records:
//!
//! ```json
//! { "next_id": 4, "concepts": [ { "id": 1, "title": "...", ... } ] }
//! ```
//!
//! Older task files are a bare array of records with no counter; those are
//! read transparently and upgraded on the next write. Records are kept as raw
//! JSON values so a damaged record survives rewrites untouched.

use std::path::Path;

use recall_core::{
  MalformedRecord,
  concept::{Concept, ConceptId, ConceptRecord},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
  /// Next id to hand out. Only ever grows, so deleted ids are not reused.
  #[serde(default)]
  pub next_id:  u64,
  #[serde(default)]
  pub concepts: Vec<Value>,
}

impl Document {
  /// Parse file contents in either layout. An empty file is an empty store.
  pub fn parse(bytes: &[u8], path: &Path) -> Result<Self> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self { next_id: 1, concepts: Vec::new() });
    }

    let mut doc = match serde_json::from_slice::<Value>(bytes)? {
      Value::Array(concepts) => Self { next_id: 0, concepts },
      value @ Value::Object(_) => serde_json::from_value(value)?,
      _ => return Err(Error::Layout(path.to_path_buf())),
    };

    let after_max = doc
      .concepts
      .iter()
      .filter_map(record_id)
      .max()
      .map_or(1, |max| max.saturating_add(1));
    doc.next_id = doc.next_id.max(after_max);
    Ok(doc)
  }

  pub fn to_bytes(&self) -> Result<Vec<u8>> { Ok(serde_json::to_vec_pretty(self)?) }

  /// Hand out the next id and advance the counter.
  pub fn allocate_id(&mut self) -> ConceptId {
    let id = ConceptId(self.next_id);
    self.next_id += 1;
    id
  }

  pub fn position(&self, id: ConceptId) -> Option<usize> {
    self.concepts.iter().position(|v| record_id(v) == Some(id.0))
  }

  pub fn records(&self) -> impl Iterator<Item = Result<ConceptRecord, MalformedRecord>> + '_ {
    self.concepts.iter().map(decode)
  }
}

/// The numeric id of a raw record, if it has one.
pub fn record_id(value: &Value) -> Option<u64> { value.get("id").and_then(Value::as_u64) }

pub fn decode(value: &Value) -> Result<ConceptRecord, MalformedRecord> {
  ConceptRecord::deserialize(value)
    .map_err(|e| MalformedRecord::new(record_id(value), e.to_string()))
}

pub fn encode(concept: &Concept) -> Result<Value> {
  Ok(serde_json::to_value(ConceptRecord::from(concept))?)
}
