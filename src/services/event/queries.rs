use super::shared::{map_event_row, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::CalendarEvent;
use crate::utils::date::format_storage;
use anyhow::Result;
use chrono::NaiveDateTime;

impl<'a> EventService<'a> {
    /// List every event ordered by start date.
    pub fn list_all(&self) -> Result<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_datetime ASC, id ASC"
        ))?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events overlapping `start..=end`, plus recurring events that began
    /// on or before `end` and may still have occurrences inside it.
    pub fn find_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS}
             FROM events
             WHERE (start_datetime <= ?1 AND end_datetime >= ?2)
                OR (recurrence_pattern IS NOT NULL AND start_datetime <= ?1)
             ORDER BY start_datetime ASC, id ASC"
        ))?;

        let events = stmt
            .query_map([format_storage(end), format_storage(start)], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}
