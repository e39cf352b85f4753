//! Sudden-death clock arithmetic: one clock per side, no increments.
//! Pure functions operating on microsecond durations.

use chrono::{DateTime, Utc};

/// Remaining time after subtracting the elapsed wall-clock time since
/// `last_move_time`. Clamped at zero — callers check for exhaustion
/// separately via `is_exhausted`.
pub fn subtract_elapsed(remaining_micros: i64, last_move_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = now.signed_duration_since(last_move_time);
    let elapsed_micros = elapsed.num_microseconds().unwrap_or(0).max(0);
    (remaining_micros - elapsed_micros).max(0)
}

pub fn is_exhausted(remaining_micros: i64) -> bool {
    remaining_micros <= 0
}
