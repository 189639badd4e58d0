//! Validation and parsing errors shared by the calendar models.

use thiserror::Error;

/// Errors raised when constructing or parsing calendar values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Event title cannot be empty")]
    EmptyTitle,

    #[error("Event start time is required")]
    MissingStart,

    #[error("Event end time must not be before start time")]
    EndBeforeStart,

    #[error("Unrecognised date-time '{0}' (expected ISO-8601)")]
    InvalidDateTime(String),

    #[error("Unrecognised date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown event type '{0}'")]
    UnknownEventType(String),

    #[error("Unknown view mode '{0}'")]
    UnknownViewMode(String),

    #[error("Unknown recurrence pattern '{0}'")]
    UnknownPattern(String),

    #[error("Recurrence interval must be at least 1")]
    ZeroInterval,

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    #[error("Invalid hour slots {first}..={last} (need first <= last <= 23)")]
    InvalidHourRange { first: u32, last: u32 },
}
