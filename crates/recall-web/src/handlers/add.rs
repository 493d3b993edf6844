//! `POST /add` — create a concept from the dashboard form.
//!
//! A blank title is not an error here: the form simply returns to the
//! dashboard without storing anything.

use axum::{
  Form,
  extract::State,
  response::Redirect,
};
use chrono::Utc;
use recall_core::{concept::NewConcept, lifecycle, store::ConceptStore};
use serde::Deserialize;

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
pub struct AddForm {
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: String,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<AddForm>,
) -> Result<Redirect, Error>
where
  S: ConceptStore + Clone + 'static,
  S::Error: Into<recall_core::Error>,
{
  let input = match NewConcept::new(&form.title, Some(form.description.as_str())) {
    Ok(input) => input,
    Err(e) => {
      tracing::debug!("ignoring add: {e}");
      return Ok(Redirect::to("/"));
    }
  };

  let concept = lifecycle::add_concept(state.store.as_ref(), input, Utc::now()).await?;
  tracing::info!(id = %concept.id, title = %concept.title, "concept added");
  Ok(Redirect::to("/"))
}
