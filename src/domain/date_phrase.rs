//! Relative and absolute date phrase parsing.

use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

/// Phrases accepted in addition to calendar dates.
pub const SUPPORTED_PHRASES: &[&str] = &[
    "today",
    "yesterday",
    "last week",
    "week ago",
    "last month",
    "month ago",
    "start of last month",
    "end of last month",
];

/// Error returned when a date phrase cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid date format: \"{input}\". Use ISO format (YYYY-MM-DD) or relative dates (today, yesterday, last week, last month, start of last month, end of last month)"
)]
pub struct InvalidDateFormat {
    pub input: String,
}

impl InvalidDateFormat {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Parses a date phrase relative to the current local time.
///
/// See [`parse_date_phrase_at`] for the accepted forms.
pub fn parse_date_phrase(input: &str) -> Result<DateTime<Local>, InvalidDateFormat> {
    parse_date_phrase_at(input, Local::now())
}

/// Parses a date phrase relative to `now`.
///
/// Accepts (case-insensitive, surrounding whitespace ignored):
/// - `today`, `yesterday`: start of that local day
/// - `last week`, `week ago`: start of the day seven days back
/// - `last month`, `month ago`, `start of last month`: first day of the
///   previous calendar month, 00:00:00.000
/// - `end of last month`: last day of the previous month, 23:59:59.999
/// - `YYYY-MM-DD`: start of that local day
/// - RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]` local date-times
pub fn parse_date_phrase_at(
    input: &str,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, InvalidDateFormat> {
    let phrase = input.trim().to_lowercase();
    let today = now.date_naive();

    let resolved = match phrase.as_str() {
        "today" => start_of_day(today),
        "yesterday" => today.checked_sub_days(Days::new(1)).and_then(start_of_day),
        "last week" | "week ago" => today.checked_sub_days(Days::new(7)).and_then(start_of_day),
        "last month" | "month ago" | "start of last month" => {
            first_of_previous_month(today).and_then(start_of_day)
        }
        "end of last month" => first_of_month(today)
            .and_then(|first| first.pred_opt())
            .and_then(end_of_day),
        _ => parse_calendar(input.trim()),
    };

    resolved.ok_or_else(|| InvalidDateFormat::new(input))
}

/// Returns the first instant of the given local day.
pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    local_instant(date.and_hms_opt(0, 0, 0)?)
}

/// Returns the last millisecond of the given local day.
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    local_instant(date.and_hms_milli_opt(23, 59, 59, 999)?)
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

fn first_of_previous_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn parse_calendar(input: &str) -> Option<DateTime<Local>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return start_of_day(date);
    }

    if let Ok(instant) = DateTime::<FixedOffset>::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Local));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .and_then(local_instant)
}

// Midnight can fall inside a DST gap in some zones; the first valid local
// time after the gap is used instead.
fn local_instant(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(chrono::Duration::hours(1))?;
            Local.from_local_datetime(&shifted).earliest()
        })
}
