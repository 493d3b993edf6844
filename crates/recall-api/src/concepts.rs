//! Handlers for `/concepts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/concepts` | Due and scheduled sets, stats, malformed count |
//! | `POST`   | `/concepts` | Body: `{"title":"...","description":"..."}`; returns 201 |
//! | `GET`    | `/concepts/:id` | Sets `ETag` |
//! | `POST`   | `/concepts/:id/complete` | Honours `If-Match`; 412 on mismatch |
//! | `DELETE` | `/concepts/:id` | 204, or 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use chrono::Utc;
use recall_core::{
  availability::{Availability, ScheduledConcept, Stats, partition},
  concept::{Concept, ConceptId, NewConcept},
  lifecycle,
  store::ConceptStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::{ApiError, store_error},
  etag::{compute_etag, if_match_accepts},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub stats:     Stats,
  pub due:       Vec<Concept>,
  pub scheduled: Vec<ScheduledConcept>,
  /// Records the store could not decode; they are left untouched.
  pub malformed: usize,
}

/// `GET /concepts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: ConceptStore,
  S::Error: Into<recall_core::Error>,
{
  let snapshot = store.load_all().await.map_err(store_error)?;
  let availability = partition(&snapshot.concepts, Utc::now());
  let stats = Stats::derive(&snapshot.concepts, &availability);
  let Availability { due, scheduled } = availability;

  Ok(Json(ListResponse {
    stats,
    due,
    scheduled,
    malformed: snapshot.malformed.len(),
  }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
}

/// `POST /concepts`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConceptStore,
  S::Error: Into<recall_core::Error>,
{
  let input = NewConcept::new(&body.title, body.description.as_deref())
    .map_err(|e| ApiError::from(recall_core::Error::from(e)))?;
  let concept = lifecycle::add_concept(store.as_ref(), input, Utc::now()).await?;

  tracing::info!(id = %concept.id, title = %concept.title, "concept added");
  let etag = compute_etag(&concept);
  Ok((StatusCode::CREATED, [(header::ETAG, etag)], Json(concept)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /concepts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConceptStore,
  S::Error: Into<recall_core::Error>,
{
  let id = ConceptId(id);
  let concept = store
    .get(id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| ApiError::NotFound(format!("concept {id} not found")))?;

  let etag = compute_etag(&concept);
  Ok(([(header::ETAG, etag)], Json(concept)))
}

// ─── Complete ─────────────────────────────────────────────────────────────────

/// `POST /concepts/:id/complete`
///
/// With `If-Match`, the review is only recorded if the concept still has the
/// given ETag, both when read and when written back.
pub async fn complete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<u64>,
  headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConceptStore,
  S::Error: Into<recall_core::Error>,
{
  let id = ConceptId(id);
  let if_match = headers
    .get(header::IF_MATCH)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);

  let current = store
    .get(id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| ApiError::NotFound(format!("concept {id} not found")))?;

  if let Some(ref tag) = if_match
    && !if_match_accepts(tag, &compute_etag(&current))
  {
    return Err(ApiError::PreconditionFailed);
  }

  let updated = match lifecycle::record_review_of(store.as_ref(), &current, Utc::now()).await {
    Ok(updated) => updated,
    Err(recall_core::Error::Conflict(_)) if if_match.is_some() => {
      return Err(ApiError::PreconditionFailed);
    }
    Err(e) => return Err(e.into()),
  };

  tracing::info!(
    id = %id,
    cycle = updated.current_cycle,
    next_review = %updated.next_review,
    "review recorded"
  );
  let etag = compute_etag(&updated);
  Ok(([(header::ETAG, etag)], Json(updated)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /concepts/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<u64>,
) -> Result<StatusCode, ApiError>
where
  S: ConceptStore,
  S::Error: Into<recall_core::Error>,
{
  let id = ConceptId(id);
  lifecycle::delete_concept(store.as_ref(), id).await?;
  tracing::info!(id = %id, "concept deleted");
  Ok(StatusCode::NO_CONTENT)
}
