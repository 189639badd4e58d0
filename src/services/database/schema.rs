use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_events_table(conn)?;
    create_event_indexes(conn)?;
    log::debug!("Calendar schema ready");
    Ok(())
}

fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            location TEXT,
            start_datetime TEXT NOT NULL,
            end_datetime TEXT NOT NULL,
            is_all_day INTEGER NOT NULL DEFAULT 0,
            event_type TEXT NOT NULL DEFAULT 'event',
            recurrence_pattern TEXT,
            recurrence_interval INTEGER,
            recurrence_end_date TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (end_datetime >= start_datetime)
        )",
        [],
    )
    .context("Failed to create events table")?;

    Ok(())
}

fn create_event_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_start ON events(start_datetime)",
        [],
    )
    .context("Failed to create events start index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_recurring
         ON events(start_datetime) WHERE recurrence_pattern IS NOT NULL",
        [],
    )
    .context("Failed to create recurring events index")?;

    Ok(())
}
