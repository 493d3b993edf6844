//! `POST /complete/:id` — record a review.

use axum::{
  extract::{Path, State},
  response::Redirect,
};
use chrono::Utc;
use recall_core::{concept::ConceptId, lifecycle, store::ConceptStore};

use crate::{AppState, error::Error};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Redirect, Error>
where
  S: ConceptStore + Clone + 'static,
  S::Error: Into<recall_core::Error>,
{
  let concept =
    lifecycle::record_review(state.store.as_ref(), ConceptId(id), Utc::now()).await?;
  tracing::info!(
    id = %concept.id,
    cycle = concept.current_cycle,
    next_review = %concept.next_review,
    "review recorded"
  );
  Ok(Redirect::to("/"))
}
