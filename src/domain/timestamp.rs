//! Conversion between Core Data timestamps and standard instants.
//!
//! Bear stores dates as (possibly fractional) seconds since the Core Data
//! reference date, 2001-01-01T00:00:00Z.

use chrono::{DateTime, TimeZone, Utc};

/// Seconds between the Unix epoch and the Core Data reference date.
pub const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

/// Converts Core Data seconds to an instant, rounded to the millisecond.
///
/// Returns `None` when the value is not finite or falls outside the
/// representable range.
pub fn to_instant(store_seconds: f64) -> Option<DateTime<Utc>> {
    if !store_seconds.is_finite() {
        return None;
    }

    let millis = (store_seconds * 1000.0).round();
    if millis.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }

    let unix_millis = (millis as i64).checked_add(CORE_DATA_EPOCH_OFFSET * 1000)?;
    DateTime::from_timestamp_millis(unix_millis)
}

/// Converts an instant to whole Core Data seconds.
///
/// Sub-second precision is truncated towards the earlier second.
pub fn to_store_seconds<Tz: TimeZone>(instant: &DateTime<Tz>) -> i64 {
    instant.timestamp() - CORE_DATA_EPOCH_OFFSET
}
