//! Timestamp value generators.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;

/// Generate a random timestamp in `[start, end]` at second resolution.
///
/// Returns `start` when the range is empty.
pub fn timestamp_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        start
    } else {
        let random_ts = rng.gen_range(start_ts..=end_ts);
        DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
    }
}

/// Generate a random calendar date in `[start, end]`.
///
/// Returns `start` when the range is empty.
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        start
    } else {
        start + Duration::days(rng.gen_range(0..=span))
    }
}

/// `timestamp` plus a whole number of seconds drawn from `[min, max]`.
pub fn seconds_after<R: Rng + ?Sized>(
    rng: &mut R,
    timestamp: DateTime<Utc>,
    min: i64,
    max: i64,
) -> DateTime<Utc> {
    timestamp + Duration::seconds(rng.gen_range(min..=max))
}
