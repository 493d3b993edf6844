//! JSON REST API for Recall.
//!
//! Exposes an axum [`Router`] backed by any [`recall_core::store::ConceptStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", recall_api::api_router(store.clone()))
//! ```

pub mod concepts;
pub mod error;
pub mod etag;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use recall_core::store::ConceptStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ConceptStore + 'static,
  S::Error: Into<recall_core::Error>,
{
  Router::new()
    .route("/concepts", get(concepts::list::<S>).post(concepts::create::<S>))
    .route(
      "/concepts/{id}",
      get(concepts::get_one::<S>).delete(concepts::delete_one::<S>),
    )
    .route("/concepts/{id}/complete", post(concepts::complete_one::<S>))
    .with_state(store)
}
