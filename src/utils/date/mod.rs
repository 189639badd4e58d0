// Date utility functions

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::models::error::CalendarError;
use crate::models::settings::ViewerZone;

/// Storage format for naive date-times (seconds precision).
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date-time into viewer wall-clock time.
///
/// Values carrying an offset (`Z`, `+03:00`) are converted into `zone`;
/// naive values are taken as already being wall-clock time; a bare date
/// means midnight.
pub fn parse_event_datetime(value: &str, zone: &ViewerZone) -> Result<NaiveDateTime, CalendarError> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(zone.wall_clock(&instant));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| CalendarError::InvalidDateTime(value.to_string()))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(value.trim().to_string()))
}

pub fn format_storage(value: NaiveDateTime) -> String {
    value.format(STORAGE_FORMAT).to_string()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(date))
}

/// `date` moved by `days`, saturating at the ends of the supported calendar.
pub fn add_days_saturating(date: NaiveDate, days: i64) -> NaiveDate {
    let bound = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(bound)
}

/// Latest date on or before `date` that falls on `week_start`.
pub fn week_start(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let first = week_start.num_days_from_sunday() as i64;
    let offset = (weekday - first + 7) % 7;
    add_days_saturating(date, -offset)
}

/// Earliest date on or after `date` that ends a week beginning on `week_start`.
pub fn week_end(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let last = (first_day.num_days_from_sunday() as i64 + 6) % 7;
    add_days_saturating(date, (last - weekday + 7) % 7)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(first_of_next)) => (first_of_next - first).num_days() as u32,
        _ => 31,
    }
}

/// Move `current` by `delta_months`, clamping the day to the target month length.
pub fn shift_month_clamped(current: NaiveDate, delta_months: i32, desired_day: u32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;
    let day = desired_day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(current)
}
