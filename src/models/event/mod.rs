// Event module
// School calendar event model and its JSON wire format

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::error::CalendarError;
use crate::models::recurrence::Recurrence;
use crate::models::settings::ViewerZone;
use crate::utils::date::parse_event_datetime;

/// Kind of school event. Only affects colour and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Class,
    Meeting,
    Exam,
    #[default]
    Event,
    Holiday,
    Break,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        Self::Class,
        Self::Meeting,
        Self::Exam,
        Self::Event,
        Self::Holiday,
        Self::Break,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Meeting => "meeting",
            Self::Exam => "exam",
            Self::Event => "event",
            Self::Holiday => "holiday",
            Self::Break => "break",
        }
    }

    /// Hex colour used when rendering the event.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Class => "#3B82F6",
            Self::Meeting => "#8B5CF6",
            Self::Exam => "#EF4444",
            Self::Event => "#10B981",
            Self::Holiday => "#F59E0B",
            Self::Break => "#6B7280",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Class => "📚",
            Self::Meeting => "👥",
            Self::Exam => "📝",
            Self::Event => "🎉",
            Self::Holiday => "🏖",
            Self::Break => "☕",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalendarError::UnknownEventType(s.trim().to_string()))
    }
}

/// Calendar event. Start and end are wall-clock times in the viewer's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "startDateTime")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDateTime")]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl CalendarEvent {
    /// Create a new event with a fresh id.
    ///
    /// # Examples
    /// ```
    /// use school_calendar::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::minutes(45);
    /// let event = CalendarEvent::new("Algebra II", start, end).unwrap();
    /// assert!(!event.id.is_empty());
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, CalendarError> {
        let event = Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            is_all_day: false,
            event_type: EventType::default(),
            recurrence: None,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Build from a wire record, converting offsets into `zone`.
    pub fn from_record(record: EventRecord, zone: &ViewerZone) -> Result<Self, CalendarError> {
        let event = Self {
            id: record
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: record.title,
            description: record.description,
            location: record.location,
            start: parse_event_datetime(&record.start_date_time, zone)?,
            end: parse_event_datetime(&record.end_date_time, zone)?,
            is_all_day: record.is_all_day,
            event_type: record.event_type,
            recurrence: record.recurrence,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.title.trim().is_empty() {
            return Err(CalendarError::EmptyTitle);
        }
        if self.end < self.start {
            return Err(CalendarError::EndBeforeStart);
        }
        if let Some(ref recurrence) = self.recurrence {
            recurrence.validate()?;
        }
        Ok(())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn color(&self) -> &'static str {
        self.event_type.color()
    }
}

/// Event as exchanged with the school REST API.
///
/// Date-times stay strings so that offsets can be resolved against the
/// viewer's zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date_time: String,
    pub end_date_time: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub is_all_day: Option<bool>,
    pub event_type: Option<EventType>,
    pub recurrence: Option<Option<Recurrence>>,
}

impl EventPatch {
    /// Apply to `event` and re-validate. On error `event` is left unchanged.
    pub fn apply(&self, event: &mut CalendarEvent) -> Result<(), CalendarError> {
        let mut updated = event.clone();
        if let Some(ref title) = self.title {
            updated.title = title.clone();
        }
        if let Some(ref description) = self.description {
            updated.description = description.clone();
        }
        if let Some(ref location) = self.location {
            updated.location = location.clone();
        }
        if let Some(start) = self.start {
            updated.start = start;
        }
        if let Some(end) = self.end {
            updated.end = end;
        }
        if let Some(all_day) = self.is_all_day {
            updated.is_all_day = all_day;
        }
        if let Some(kind) = self.event_type {
            updated.event_type = kind;
        }
        if let Some(ref recurrence) = self.recurrence {
            updated.recurrence = recurrence.clone();
        }
        updated.validate()?;
        *event = updated;
        Ok(())
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    is_all_day: bool,
    event_type: EventType,
    recurrence: Option<Recurrence>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Build the event. A missing end defaults to the start.
    pub fn build(self) -> Result<CalendarEvent, CalendarError> {
        let start = self.start.ok_or(CalendarError::MissingStart)?;

        let event = CalendarEvent {
            id: self.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: self.title.unwrap_or_default(),
            description: self.description,
            location: self.location,
            start,
            end: self.end.unwrap_or(start),
            is_all_day: self.is_all_day,
            event_type: self.event_type,
            recurrence: self.recurrence,
        };

        event.validate()?;
        Ok(event)
    }
}
