//! ETag computation for concept resources.
//!
//! The tag is a SHA-256 over the fields a review changes, so it moves
//! whenever the concept is completed and stays put otherwise.

use recall_core::concept::Concept;
use sha2::{Digest, Sha256};

/// Compute a quoted strong ETag for `concept`.
pub fn compute_etag(concept: &Concept) -> String {
  let mut hasher = Sha256::new();
  hasher.update(concept.id.0.to_le_bytes());
  hasher.update(concept.current_cycle.to_le_bytes());
  hasher.update(concept.next_review.timestamp_micros().to_le_bytes());
  if let Some(last) = concept.last_completed {
    hasher.update(last.timestamp_micros().to_le_bytes());
  }
  format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Does an `If-Match` header value accept `etag`?
///
/// Accepts `*`, a comma-separated list, and bare tags without quotes.
pub fn if_match_accepts(header: &str, etag: &str) -> bool {
  let want = strip_quotes(etag);
  header
    .split(',')
    .map(str::trim)
    .any(|candidate| candidate == "*" || strip_quotes(candidate) == want)
}

fn strip_quotes(s: &str) -> &str {
  s.trim_start_matches("W/").trim_matches('"')
}
