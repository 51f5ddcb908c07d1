//! Period key resolution.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::server::model::quest::Bucket;

/// Period key of the lifetime bucket; lifetime progress never resets.
pub const LIFETIME_PERIOD: &str = "lifetime";

/// Resolves the reset window a bucket is in at `now`.
///
/// Daily periods are UTC calendar dates (`2025-06-01`), weekly periods are ISO-8601
/// weeks (`2025-W22`, Monday start, week 1 holds the year's first Thursday) and the
/// lifetime bucket always resolves to the same constant.
///
/// # Arguments
/// - `bucket` - Bucket to resolve
/// - `now` - Instant to resolve at
///
/// # Returns
/// - `String` - Period key
pub fn period_key(bucket: Bucket, now: DateTime<Utc>) -> String {
    match bucket {
        Bucket::Daily => now.date_naive().format("%Y-%m-%d").to_string(),
        Bucket::Weekly => {
            let week = now.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Bucket::Lifetime => LIFETIME_PERIOD.to_string(),
    }
}

/// Start of the UTC day containing `now`.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Instant used to account work done just before `rollover` to the period that ended.
pub fn last_instant_before(rollover: DateTime<Utc>) -> DateTime<Utc> {
    rollover - Duration::seconds(1)
}
