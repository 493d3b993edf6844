//! The review schedule: a fixed, expanding-then-flat interval table.
//!
//! `next_review_date(c, now)` waits `INTERVAL_DAYS[c]` days. Completion
//! increments the cycle count before the lookup; see
//! [`crate::lifecycle::complete`].

use chrono::{DateTime, TimeDelta, Utc};

/// Days to wait before the next review, indexed by cycle count.
pub const INTERVAL_DAYS: [u32; 5] = [1, 3, 7, 14, 20];

/// Interval applied to every cycle past the end of [`INTERVAL_DAYS`].
pub const STEADY_STATE_DAYS: u32 = 20;

/// The interval, in days, for a given cycle count.
pub fn interval_days(cycle: u32) -> u32 {
  usize::try_from(cycle)
    .ok()
    .and_then(|i| INTERVAL_DAYS.get(i))
    .copied()
    .unwrap_or(STEADY_STATE_DAYS)
}

/// When a concept with `current_cycle` completed reviews becomes due again,
/// counting from `now`.
///
/// Total over every cycle value; saturates at the latest representable
/// instant instead of overflowing.
pub fn next_review_date(current_cycle: u32, now: DateTime<Utc>) -> DateTime<Utc> {
  let delta = TimeDelta::days(i64::from(interval_days(current_cycle)));
  now.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
