use super::shared::{map_event_row, recurrence_columns, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::{CalendarEvent, EventPatch};
use crate::utils::date::format_storage;
use anyhow::{anyhow, Context, Result};
use rusqlite::{self, params};

impl<'a> EventService<'a> {
    /// Insert a new event. Fails if the id is already taken.
    pub fn create(&self, event: CalendarEvent) -> Result<CalendarEvent> {
        event.validate()?;
        let (pattern, interval, until) = recurrence_columns(&event);

        self.conn
            .execute(
                "INSERT INTO events (
                    id, title, description, location, start_datetime, end_datetime,
                    is_all_day, event_type, recurrence_pattern, recurrence_interval,
                    recurrence_end_date
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.id,
                    event.title,
                    event.description,
                    event.location,
                    format_storage(event.start),
                    format_storage(event.end),
                    event.is_all_day as i32,
                    event.event_type.as_str(),
                    pattern,
                    interval,
                    until,
                ],
            )
            .with_context(|| format!("Failed to insert event {}", event.id))?;

        log::debug!("Created event {} ({})", event.id, event.title);
        Ok(event)
    }

    /// Retrieve an event by ID.
    pub fn get(&self, id: &str) -> Result<Option<CalendarEvent>> {
        let result = self.conn.query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"),
            [id],
            map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace every field of an existing event.
    pub fn update(&self, event: &CalendarEvent) -> Result<()> {
        event.validate()?;
        let (pattern, interval, until) = recurrence_columns(event);

        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET
                    title = ?, description = ?, location = ?, start_datetime = ?, end_datetime = ?,
                    is_all_day = ?, event_type = ?, recurrence_pattern = ?, recurrence_interval = ?,
                    recurrence_end_date = ?, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?",
                params![
                    event.title,
                    event.description,
                    event.location,
                    format_storage(event.start),
                    format_storage(event.end),
                    event.is_all_day as i32,
                    event.event_type.as_str(),
                    pattern,
                    interval,
                    until,
                    event.id,
                ],
            )
            .context("Failed to update event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", event.id));
        }

        Ok(())
    }

    /// Apply a partial update and return the stored result.
    pub fn patch(&self, id: &str, patch: &EventPatch) -> Result<CalendarEvent> {
        let mut event = self
            .get(id)?
            .ok_or_else(|| anyhow!("Event with id {} not found", id))?;
        patch.apply(&mut event)?;
        self.update(&event)?;
        Ok(event)
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        log::debug!("Deleted event {}", id);
        Ok(())
    }

    /// Insert or replace a batch of events in one transaction.
    pub fn upsert_all(&self, events: &[CalendarEvent]) -> Result<usize> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to start import transaction")?;

        for event in events {
            event.validate()?;
            let (pattern, interval, until) = recurrence_columns(event);
            tx.execute(
                "INSERT INTO events (
                    id, title, description, location, start_datetime, end_datetime,
                    is_all_day, event_type, recurrence_pattern, recurrence_interval,
                    recurrence_end_date
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                ON CONFLICT(id) DO UPDATE SET
                    title = ?2, description = ?3, location = ?4, start_datetime = ?5,
                    end_datetime = ?6, is_all_day = ?7, event_type = ?8,
                    recurrence_pattern = ?9, recurrence_interval = ?10,
                    recurrence_end_date = ?11, updated_at = CURRENT_TIMESTAMP",
                params![
                    event.id,
                    event.title,
                    event.description,
                    event.location,
                    format_storage(event.start),
                    format_storage(event.end),
                    event.is_all_day as i32,
                    event.event_type.as_str(),
                    pattern,
                    interval,
                    until,
                ],
            )
            .with_context(|| format!("Failed to store event {}", event.id))?;
        }

        tx.commit().context("Failed to commit import")?;
        Ok(events.len())
    }
}
