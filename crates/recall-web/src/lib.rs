//! HTML dashboard and HTTP server for Recall.
//!
//! Exposes an axum [`Router`] serving the review dashboard, backed by any
//! [`ConceptStore`], with the JSON API from `recall-api` nested under `/api`.

pub mod error;
pub mod handlers;
pub mod render;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use recall_core::store::ConceptStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which storage backend to serve from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// A single JSON file; reads the legacy `tasks.json` layout too.
  #[default]
  Json,
  Sqlite,
}

/// Runtime server configuration, deserialised from `recall.toml` and
/// `RECALL_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  #[serde(default)]
  pub backend:   Backend,
  /// The JSON file or SQLite database, depending on `backend`.
  #[serde(default = "default_data_path")]
  pub data_path: PathBuf,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_data_path() -> PathBuf { PathBuf::from("tasks.json") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:      default_host(),
      port:      default_port(),
      backend:   Backend::default(),
      data_path: default_data_path(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ConceptStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: HTML pages, the JSON API under
/// `/api`, and request tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ConceptStore + Clone + 'static,
  S::Error: Into<recall_core::Error>,
{
  let api = recall_api::api_router(state.store.clone());

  Router::new()
    .route("/",              get(handlers::dashboard::handler::<S>))
    .route("/all",           get(handlers::overview::handler::<S>))
    .route("/add",           post(handlers::add::handler::<S>))
    .route("/complete/{id}", post(handlers::complete::handler::<S>))
    .route("/delete/{id}",   post(handlers::delete::handler::<S>))
    .route("/favicon.ico",   get(handlers::favicon::handler))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use chrono::{DateTime, Utc};
  use recall_core::{
    concept::{Concept, ConceptId, NewConcept},
    store::{Snapshot, UpdateOutcome},
  };
  use recall_store_json::JsonStore;
  use recall_store_sqlite::SqliteStore;
  use tempfile::TempDir;
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState { store: Arc::new(store) }
  }

  async fn oneshot_raw<S>(state: AppState<S>, method: &str, uri: &str, body: &str) -> Response
  where
    S: ConceptStore + Clone + 'static,
    S::Error: Into<recall_core::Error>,
  {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(body.to_string()))
      .unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn location(resp: &Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
  }

  // ── Dashboard ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_dashboard_renders() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Total Concepts"));
    assert!(html.contains("No concepts due for review right now!"));
  }

  #[tokio::test]
  async fn added_concept_appears_on_dashboard() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/add",
      "title=Ownership+rules&description=one+owner+at+a+time",
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");

    let html = body_text(oneshot_raw(state, "GET", "/", "").await).await;
    assert!(html.contains("Ownership rules"));
    assert!(html.contains("one owner at a time"));
    assert!(html.contains("Review #1"));
    assert!(html.contains(r#"action="/complete/1""#));
  }

  #[tokio::test]
  async fn blank_title_adds_nothing() {
    let state = make_state().await;
    let resp = oneshot_raw(state.clone(), "POST", "/add", "title=+++&description=x").await;
    assert!(resp.status().is_redirection());

    let snapshot = state.store.load_all().await.unwrap();
    assert!(snapshot.concepts.is_empty());
  }

  // ── Complete ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn complete_redirects_and_schedules_second_interval() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/add", "title=Borrowing").await;

    let resp = oneshot_raw(state.clone(), "POST", "/complete/1", "").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");

    let html = body_text(oneshot_raw(state.clone(), "GET", "/all", "").await).await;
    assert!(html.contains("Available for Review (0)"));
    assert!(html.contains("Scheduled for Later (1)"));
    assert!(html.contains("Due in 2 days"));
    assert!(html.contains("Review #2"));

    let stored = state.store.get(ConceptId(1)).await.unwrap().unwrap();
    assert_eq!(stored.current_cycle, 1);
    let last = stored.last_completed.unwrap();
    assert_eq!(stored.next_review - last, chrono::TimeDelta::days(3));
  }

  #[tokio::test]
  async fn complete_unknown_returns_404_page() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "POST", "/complete/42", "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("concept 42 not found"));
  }

  // ── Delete ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_redirects_to_overview() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/add", "title=Lifetimes").await;

    let resp = oneshot_raw(state.clone(), "POST", "/delete/1", "").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/all");
    assert!(state.store.get(ConceptId(1)).await.unwrap().is_none());

    let resp = oneshot_raw(state, "POST", "/delete/1", "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Misc ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn favicon_is_no_content() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/favicon.ico", "").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  }

  #[tokio::test]
  async fn api_is_nested() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/add", "title=Modules").await;
    let resp = oneshot_raw(state, "GET", "/api/concepts/1", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ETAG));
  }

  #[tokio::test]
  async fn json_backend_serves_legacy_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(
      &path,
      r#"[{"id": 3, "title": "Decorators", "description": "", "status": "pending",
           "current_cycle": 1, "created_at": "2024-01-01T10:00:00",
           "last_completed": "2024-01-02T10:00:00",
           "next_review": "2024-01-03T10:00:00"}]"#,
    )
    .unwrap();
    let state = AppState { store: Arc::new(JsonStore::open(&path).await.unwrap()) };

    let html = body_text(oneshot_raw(state, "GET", "/", "").await).await;
    assert!(html.contains("Decorators"));
    assert!(html.contains("Review #2"));
    assert!(html.contains("Last Reviewed:</strong> 2024-01-02"));
  }

  // ── Degraded rendering ───────────────────────────────────────────────────────

  /// A store whose backend is never reachable.
  #[derive(Clone)]
  struct FailingStore;

  fn unavailable() -> recall_core::Error {
    recall_core::Error::StorageUnavailable("connection refused".into())
  }

  impl ConceptStore for FailingStore {
    type Error = recall_core::Error;

    async fn load_all(&self) -> Result<Snapshot, Self::Error> { Err(unavailable()) }

    async fn get(&self, _id: ConceptId) -> Result<Option<Concept>, Self::Error> {
      Err(unavailable())
    }

    async fn insert(
      &self,
      _input: NewConcept,
      _now: DateTime<Utc>,
    ) -> Result<Concept, Self::Error> {
      Err(unavailable())
    }

    async fn update(
      &self,
      _expected_cycle: u32,
      _concept: Concept,
    ) -> Result<UpdateOutcome, Self::Error> {
      Err(unavailable())
    }

    async fn delete(&self, _id: ConceptId) -> Result<bool, Self::Error> {
      Err(unavailable())
    }
  }

  #[tokio::test]
  async fn unreachable_store_still_renders_dashboard() {
    let state = AppState { store: Arc::new(FailingStore) };
    let resp = oneshot_raw(state.clone(), "GET", "/", "").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_text(resp).await;
    assert!(html.contains("Storage unavailable."));
    assert!(html.contains("connection refused"));
    assert!(html.contains("Add New Concept"));

    let resp = oneshot_raw(state, "POST", "/complete/1", "").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
  }
}
