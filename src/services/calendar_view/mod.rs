//! Assembles everything one calendar render needs: the visible range, the
//! events inside it with recurrences expanded, and the bucket index.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarConfig;
use crate::models::view::ViewMode;
use crate::services::bucket::{EventBuckets, HourSlots};
use crate::services::event::EventService;
use crate::services::navigation::Navigator;
use crate::services::range::DateRange;
use crate::services::recurrence::expand_all;
use crate::utils::date::{end_of_day, start_of_day};

/// Anything that can hand over the events relevant to a time window.
///
/// Implementations may return extra events (the view filters them), but
/// must include every recurring event that started before `end`.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    fn events_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<CalendarEvent>>;
}

impl EventSource for EventService<'_> {
    fn events_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<CalendarEvent>> {
        self.find_by_date_range(start, end)
    }
}

impl EventSource for [CalendarEvent] {
    fn events_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<CalendarEvent>> {
        Ok(self
            .iter()
            .filter(|event| event.start <= end && (event.end >= start || event.is_recurring()))
            .cloned()
            .collect())
    }
}

/// Rendered-ready calendar state for one navigator position.
#[derive(Debug, Clone)]
pub struct CalendarView {
    mode: ViewMode,
    reference: NaiveDate,
    range: DateRange,
    events: Vec<CalendarEvent>,
    buckets: EventBuckets,
}

impl CalendarView {
    /// Fetch from `source` and bucket for the navigator's current position.
    pub fn load<S>(source: &S, navigator: &Navigator, config: &CalendarConfig) -> Result<Self>
    where
        S: EventSource + ?Sized,
    {
        let slots = HourSlots::new(config.first_hour, config.last_hour)?;
        let range = navigator.range();
        let fetched = source
            .events_between(start_of_day(range.start), end_of_day(range.end))
            .with_context(|| format!("Failed to load events for {} .. {}", range.start, range.end))?;

        log::info!(
            "Loaded {} events for {} view {} .. {}",
            fetched.len(),
            navigator.mode(),
            range.start,
            range.end
        );

        Ok(Self::assemble(fetched, navigator, range, slots))
    }

    /// Build directly from an in-memory list.
    pub fn from_events(events: &[CalendarEvent], navigator: &Navigator, slots: HourSlots) -> Self {
        Self::assemble(events.to_vec(), navigator, navigator.range(), slots)
    }

    fn assemble(
        fetched: Vec<CalendarEvent>,
        navigator: &Navigator,
        range: DateRange,
        slots: HourSlots,
    ) -> Self {
        let events = expand_all(&fetched, &range);
        let buckets = EventBuckets::build(&events, &range, slots);
        Self {
            mode: navigator.mode(),
            reference: navigator.date(),
            range,
            events,
            buckets,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.range.days
    }

    pub fn slots(&self) -> HourSlots {
        self.buckets.slots()
    }

    /// All occurrences in the range, sorted by start.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.buckets.day(&self.events, date)
    }

    pub fn all_day_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.buckets.all_day(&self.events, date)
    }

    pub fn events_at(&self, date: NaiveDate, hour: u32) -> Vec<&CalendarEvent> {
        self.buckets.slot(&self.events, date, hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recurrence::{Recurrence, RecurrencePattern};
    use anyhow::anyhow;
    use mockall::predicate::eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn at(d: u32, hour: u32) -> NaiveDateTime {
        date(d).and_hms_opt(hour, 0, 0).unwrap()
    }

    fn lesson(title: &str, start: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::new(title, start, start + chrono::Duration::minutes(50)).unwrap()
    }

    #[test]
    fn test_load_requests_whole_days_of_range() {
        let mut source = MockEventSource::new();
        source
            .expect_events_between()
            .with(eq(at(13, 0)), eq(end_of_day(date(19))))
            .times(1)
            .returning(|_, _| Ok(vec![lesson("Biology", at(16, 9))]));

        let navigator = Navigator::new(date(16), ViewMode::Week);
        let view = CalendarView::load(&source, &navigator, &CalendarConfig::default()).unwrap();

        assert_eq!(view.days().len(), 7);
        assert_eq!(view.events_on(date(16)).len(), 1);
        assert_eq!(view.events_at(date(16), 9)[0].title, "Biology");
    }

    #[test]
    fn test_load_propagates_source_error() {
        let mut source = MockEventSource::new();
        source
            .expect_events_between()
            .returning(|_, _| Err(anyhow!("connection reset")));

        let navigator = Navigator::new(date(16), ViewMode::Day);
        let err = CalendarView::load(&source, &navigator, &CalendarConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("connection reset"));
    }

    #[test]
    fn test_load_rejects_invalid_hours() {
        let source = MockEventSource::new();
        let config = CalendarConfig {
            first_hour: 22,
            last_hour: 6,
            ..CalendarConfig::default()
        };
        let navigator = Navigator::new(date(16), ViewMode::Day);
        assert!(CalendarView::load(&source, &navigator, &config).is_err());
    }

    #[test]
    fn test_slice_source_expands_recurrences() {
        let assembly = CalendarEvent::builder()
            .title("Assembly")
            .start(at(1, 8))
            .end(at(1, 9))
            .recurrence(Recurrence::new(RecurrencePattern::Weekly))
            .build()
            .unwrap();
        let events = vec![assembly, lesson("Old", at(1, 10))];

        let navigator = Navigator::new(date(16), ViewMode::Week);
        let view = CalendarView::load(events.as_slice(), &navigator, &CalendarConfig::default()).unwrap();

        assert_eq!(view.events().len(), 1);
        assert_eq!(view.events_at(date(15), 8)[0].title, "Assembly");
        assert!(view.events_on(date(16)).is_empty());
    }

    #[test]
    fn test_from_events_month_view() {
        let events = vec![lesson("Maths", at(16, 9)), lesson("Outside", at(20, 21))];
        let navigator = Navigator::new(date(16), ViewMode::Month);
        let view = CalendarView::from_events(&events, &navigator, HourSlots::default());

        assert_eq!(view.mode(), ViewMode::Month);
        assert_eq!(view.reference(), date(16));
        assert_eq!(view.days().len(), 35);
        assert_eq!(view.events_on(date(20)).len(), 1);
        assert!(view.events_at(date(20), 21).is_empty());
    }
}
