/// Day clock: canonical day keys and day-boundary detection
///
/// Days run midnight to midnight in local time. The clock is a pure
/// function of wall-clock time; callers persist the marker themselves.

use chrono::{Duration, Local, NaiveDate};

/// The current day in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether a rollover boundary has been crossed since the marker was stored
pub fn has_day_changed(last_marker: NaiveDate, now: NaiveDate) -> bool {
    last_marker != now
}

/// The `n` days ending at (and including) `end`, oldest first
pub fn trailing_days(end: NaiveDate, n: u32) -> Vec<NaiveDate> {
    (0..n as i64)
        .rev()
        .map(|offset| end - Duration::days(offset))
        .collect()
}
