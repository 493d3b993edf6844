//! `GET /all` — every pending concept with its schedule.

use axum::{
  extract::State,
  response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use recall_core::store::ConceptStore;

use crate::{AppState, handlers::listing, render};

pub async fn handler<S>(State(state): State<AppState<S>>) -> Response
where
  S: ConceptStore + Clone + 'static,
  S::Error: Into<recall_core::Error>,
{
  let (status, listing) = listing(state.store.as_ref(), Utc::now()).await;
  (status, Html(render::overview(&listing))).into_response()
}
