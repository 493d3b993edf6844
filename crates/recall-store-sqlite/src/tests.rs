//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use recall_core::{
  concept::{ConceptId, NewConcept, Status},
  lifecycle::{self, complete},
  store::{ConceptStore, UpdateOutcome},
};

use crate::{Error, SqliteStore};

fn t0() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() }

fn input(title: &str) -> NewConcept { NewConcept::new(title, None).unwrap() }

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Basic CRUD ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_loads_nothing() {
  let s = store().await;
  let snapshot = s.load_all().await.unwrap();
  assert!(snapshot.concepts.is_empty());
  assert!(snapshot.malformed.is_empty());
}

#[tokio::test]
async fn insert_and_get() {
  let s = store().await;
  let c = s
    .insert(NewConcept::new("Traits", Some("shared behaviour")).unwrap(), t0())
    .await
    .unwrap();

  assert_eq!(c.id, ConceptId(1));
  assert_eq!(c.status, Status::Pending);
  assert_eq!(c.current_cycle, 0);
  assert_eq!(c.next_review, t0());
  assert_eq!(c.last_completed, None);

  let fetched = s.get(c.id).await.unwrap();
  assert_eq!(fetched, Some(c));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(ConceptId(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn load_all_in_id_order() {
  let s = store().await;
  let a = s.insert(input("Ownership"), t0()).await.unwrap();
  let b = s.insert(input("Borrowing"), t0()).await.unwrap();
  let c = s.insert(input("Lifetimes"), t0()).await.unwrap();

  let concepts = s.load_all().await.unwrap().concepts;
  assert_eq!(concepts, [a, b, c]);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  s.insert(input("one"), t0()).await.unwrap();
  let two = s.insert(input("two"), t0()).await.unwrap();

  assert!(s.delete(two.id).await.unwrap());
  let three = s.insert(input("three"), t0()).await.unwrap();
  assert_eq!(three.id, ConceptId(3));
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete(ConceptId(7)).await.unwrap());
}

#[tokio::test]
async fn out_of_range_id_is_rejected() {
  let s = store().await;
  let err = s.get(ConceptId(u64::MAX)).await.unwrap_err();
  assert!(matches!(err, Error::IdRange(u64::MAX)));
}

// ─── Conditional update ──────────────────────────────────────────────────────

#[tokio::test]
async fn update_with_matching_cycle_succeeds() {
  let s = store().await;
  let c = s.insert(input("Closures"), t0()).await.unwrap();
  let done = complete(&c, t0());

  assert_eq!(s.update(0, done.clone()).await.unwrap(), UpdateOutcome::Updated);
  assert_eq!(s.get(c.id).await.unwrap(), Some(done));
}

#[tokio::test]
async fn update_with_stale_cycle_is_rejected() {
  let s = store().await;
  let c = s.insert(input("Closures"), t0()).await.unwrap();

  let first = complete(&c, t0());
  s.update(0, first.clone()).await.unwrap();

  let second = complete(&c, t0() + TimeDelta::minutes(1));
  assert_eq!(s.update(0, second).await.unwrap(), UpdateOutcome::Stale);
  assert_eq!(s.get(c.id).await.unwrap(), Some(first));
}

#[tokio::test]
async fn update_of_missing_concept_is_not_found() {
  let s = store().await;
  let ghost = input("Ghost").into_concept(ConceptId(9), t0());
  assert_eq!(s.update(0, ghost).await.unwrap(), UpdateOutcome::NotFound);
}

#[tokio::test]
async fn review_lifecycle_round_trips_through_sqlite() {
  let s = store().await;
  let c = lifecycle::add_concept(&s, input("Iterators"), t0()).await.unwrap();

  let mut now = t0();
  for _ in 0..3 {
    let reviewed = lifecycle::record_review(&s, c.id, now).await.unwrap();
    now = reviewed.next_review;
  }

  let stored = s.get(c.id).await.unwrap().unwrap();
  assert_eq!(stored.current_cycle, 3);
  // 3 + 7 + 14 days after the first review.
  assert_eq!(stored.next_review - t0(), TimeDelta::days(24));
}

// ─── Damaged rows ────────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_rows_are_reported_not_fatal() {
  let s = store().await;
  s.insert(input("Good"), t0()).await.unwrap();
  s.execute_raw(
    "INSERT INTO concepts (title, status, current_cycle, created_at, next_review)
     VALUES ('Bad date', 'pending', 0, '2024-05-01T08:00:00Z', 'soon');
     INSERT INTO concepts (title, status, current_cycle, created_at, next_review)
     VALUES ('Bad cycle', 'pending', -3, '2024-05-01T08:00:00Z', '2024-05-01T08:00:00Z');
     INSERT INTO concepts (title, status, current_cycle, created_at, next_review)
     VALUES ('Bad status', 'someday', 0, '2024-05-01T08:00:00Z', '2024-05-01T08:00:00Z');",
  )
  .await
  .unwrap();

  let snapshot = s.load_all().await.unwrap();
  assert_eq!(snapshot.concepts.len(), 1);
  let bad_ids: Vec<_> = snapshot.malformed.iter().map(|m| m.id).collect();
  assert_eq!(bad_ids, [Some(2), Some(3), Some(4)]);
}

#[tokio::test]
async fn get_of_malformed_row_is_a_typed_error() {
  let s = store().await;
  s.execute_raw(
    "INSERT INTO concepts (title, status, current_cycle, created_at, next_review)
     VALUES ('Text cycle', 'pending', 'two', '2024-05-01T08:00:00Z', '2024-05-01T08:00:00Z');",
  )
  .await
  .unwrap();

  let err = s.get(ConceptId(1)).await.unwrap_err();
  assert!(matches!(err, Error::Malformed(ref m) if m.id == Some(1)), "{err}");

  let core: recall_core::Error = err.into();
  assert!(matches!(core, recall_core::Error::Malformed(_)));
}

#[tokio::test]
async fn database_errors_map_to_unavailable() {
  let err: recall_core::Error = Error::IdRange(u64::MAX).into();
  assert!(matches!(err, recall_core::Error::StorageUnavailable(_)));
}
