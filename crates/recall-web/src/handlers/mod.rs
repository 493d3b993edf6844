pub mod add;
pub mod complete;
pub mod dashboard;
pub mod delete;
pub mod favicon;
pub mod overview;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use recall_core::{
  availability::{Stats, partition},
  store::ConceptStore,
};

use crate::render::Listing;

/// Read the store and partition it as of `now`.
///
/// A failed read still yields a listing, with empty sets and the problem
/// recorded, plus the status the page should be served with.
pub(super) async fn listing<S>(store: &S, now: DateTime<Utc>) -> (StatusCode, Listing)
where
  S: ConceptStore,
  S::Error: Into<recall_core::Error>,
{
  match store.load_all().await {
    Ok(snapshot) => {
      let availability = partition(&snapshot.concepts, now);
      let stats = Stats::derive(&snapshot.concepts, &availability);
      (StatusCode::OK, Listing {
        availability,
        stats,
        malformed: snapshot.malformed.len(),
        problem: None,
      })
    }
    Err(e) => {
      let e: recall_core::Error = e.into();
      tracing::error!("failed to load concepts: {e}");
      (StatusCode::SERVICE_UNAVAILABLE, Listing {
        problem: Some(e.to_string()),
        ..Listing::default()
      })
    }
  }
}
