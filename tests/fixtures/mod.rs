// Test fixtures - reusable test data
// Provides consistent school calendar data across integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use school_calendar::models::event::{CalendarEvent, EventType};
use school_calendar::models::recurrence::{Recurrence, RecurrencePattern};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, July 16 2025
    pub fn mid_july_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Single 45-minute class
    pub fn lesson(id: &str, start: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title(format!("Lesson {id}"))
            .start(start)
            .end(start + chrono::Duration::minutes(45))
            .event_type(EventType::Class)
            .build()
            .unwrap()
    }

    /// Weekly Monday assembly during the autumn term
    pub fn monday_assembly() -> CalendarEvent {
        let start = dates::at(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), 8, 30);
        CalendarEvent::builder()
            .id("assembly")
            .title("Whole-school assembly")
            .start(start)
            .end(start + chrono::Duration::minutes(30))
            .event_type(EventType::Meeting)
            .recurrence(
                Recurrence::new(RecurrencePattern::Weekly)
                    .until(NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()),
            )
            .build()
            .unwrap()
    }

    /// All-day holiday
    pub fn holiday(id: &str, date: NaiveDate) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title("Holiday")
            .start(dates::at(date, 0, 0))
            .all_day(true)
            .event_type(EventType::Holiday)
            .build()
            .unwrap()
    }
}
