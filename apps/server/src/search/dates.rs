//! Year-boundary normalization for production-date filters
//!
//! Clients send epoch milliseconds. Only the UTC year of the instant matters: `after`
//! widens to the first second of that year and `before` to the last one.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::{Error, Result};

fn instant(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::Validation(format!("timestamp {millis} is out of range")))
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .ok_or_else(|| Error::Validation(format!("year {year} is out of range")))
}

/// January 1st, 00:00:00 UTC of the year containing `millis`.
pub fn year_start(millis: i64) -> Result<DateTime<Utc>> {
    at(instant(millis)?.year(), 1, 1, 0, 0, 0)
}

/// December 31st, 23:59:59 UTC of the year containing `millis`.
pub fn year_end(millis: i64) -> Result<DateTime<Utc>> {
    at(instant(millis)?.year(), 12, 31, 23, 59, 59)
}
