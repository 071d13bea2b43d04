use chrono::{Local, NaiveDate};

/// The local calendar date used as "today" for budgeting.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Counts calendar days from `from` through `to`, both ends included.
///
/// Returns 0 when `to` is before `from`, so a finished period never yields
/// a negative day count.
pub fn count_days_inclusive(from: NaiveDate, to: NaiveDate) -> u32 {
    if to < from {
        return 0;
    }
    let days = (to - from).num_days() + 1;
    u32::try_from(days).unwrap_or(u32::MAX)
}
