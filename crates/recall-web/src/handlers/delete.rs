//! `POST /delete/:id` — remove a concept permanently.

use axum::{
  extract::{Path, State},
  response::Redirect,
};
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
  let id = ConceptId(id);
  lifecycle::delete_concept(state.store.as_ref(), id).await?;
  tracing::info!(id = %id, "concept deleted");
  Ok(Redirect::to("/all"))
}
