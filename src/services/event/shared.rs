use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{self, Result, Row};

use crate::models::event::CalendarEvent;
use crate::models::recurrence::{Recurrence, RecurrencePattern};
use crate::utils::date::STORAGE_FORMAT;

pub(crate) const EVENT_COLUMNS: &str = "id, title, description, location, start_datetime, end_datetime,
        is_all_day, event_type, recurrence_pattern, recurrence_interval, recurrence_end_date";

pub(crate) fn map_event_row(row: &Row<'_>) -> Result<CalendarEvent> {
    Ok(CalendarEvent {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        start: to_datetime(row.get::<_, String>(4)?)?,
        end: to_datetime(row.get::<_, String>(5)?)?,
        is_all_day: row.get::<_, i32>(6)? != 0,
        event_type: row
            .get::<_, String>(7)?
            .parse()
            .map_err(|e| conversion_error(7, e))?,
        recurrence: to_recurrence(row.get(8)?, row.get(9)?, row.get(10)?)?,
    })
}

/// Column values for the recurrence of `event`: (pattern, interval, end date).
pub(crate) fn recurrence_columns(
    event: &CalendarEvent,
) -> (Option<&'static str>, Option<u32>, Option<String>) {
    match event.recurrence {
        Some(ref rule) => (
            Some(rule.pattern.as_str()),
            Some(rule.interval),
            rule.end_date.map(|date| date.format("%Y-%m-%d").to_string()),
        ),
        None => (None, None, None),
    }
}

fn to_recurrence(
    pattern: Option<String>,
    interval: Option<u32>,
    end_date: Option<String>,
) -> Result<Option<Recurrence>> {
    let Some(pattern) = pattern else {
        return Ok(None);
    };

    let pattern: RecurrencePattern = pattern.parse().map_err(|e| conversion_error(8, e))?;
    let end_date = end_date
        .map(|value| NaiveDate::parse_from_str(&value, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| conversion_error(10, e))?;

    Ok(Some(Recurrence {
        pattern,
        interval: interval.unwrap_or(1),
        end_date,
    }))
}

pub(crate) fn to_datetime(value: String) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&value, STORAGE_FORMAT).map_err(|e| conversion_error(4, e))
}

fn conversion_error<E>(column: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(error))
}
