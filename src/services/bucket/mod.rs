//! Event bucketing for grid rendering.
//!
//! Events are keyed by the calendar day of their start and, for the
//! week/day grids, by the hour their start falls in. An event belongs to
//! exactly one day bucket; it is not repeated across the days it spans.
//! Bucket contents keep the order of the input slice.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::error::CalendarError;
use crate::models::event::CalendarEvent;
use crate::services::range::DateRange;

/// Inclusive list of hour slots shown by time grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSlots {
    first: u32,
    last: u32,
}

impl Default for HourSlots {
    fn default() -> Self {
        Self { first: 8, last: 20 }
    }
}

impl HourSlots {
    pub fn new(first: u32, last: u32) -> Result<Self, CalendarError> {
        if first > last || last > 23 {
            return Err(CalendarError::InvalidHourRange { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.first <= hour && hour <= self.last
    }

    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// Events starting on `date`, in input order.
pub fn events_for_day<'a>(events: &'a [CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|event| event.start_date() == date).collect()
}

/// Timed events starting on `date` within `hour`, using the default 8..=20
/// slots. All-day events and hours outside the slots never match.
pub fn events_for_slot<'a>(
    events: &'a [CalendarEvent],
    date: NaiveDate,
    hour: u32,
) -> Vec<&'a CalendarEvent> {
    events_for_slot_in(events, date, hour, HourSlots::default())
}

/// [`events_for_slot`] against a custom slot list.
pub fn events_for_slot_in<'a>(
    events: &'a [CalendarEvent],
    date: NaiveDate,
    hour: u32,
    slots: HourSlots,
) -> Vec<&'a CalendarEvent> {
    if !slots.contains(hour) {
        return Vec::new();
    }
    events
        .iter()
        .filter(|event| !event.is_all_day)
        .filter(|event| event.start_date() == date && event.start_hour() == hour)
        .collect()
}

/// Pre-indexed buckets over a date range, holding indices into the source slice.
#[derive(Debug, Clone, Default)]
pub struct EventBuckets {
    by_day: HashMap<NaiveDate, Vec<usize>>,
    all_day: HashMap<NaiveDate, Vec<usize>>,
    by_slot: HashMap<(NaiveDate, u32), Vec<usize>>,
    slots: HourSlots,
}

impl EventBuckets {
    /// Index `events` that start inside `range`. Timed events outside
    /// `slots` land in their day bucket but in no hour slot.
    pub fn build(events: &[CalendarEvent], range: &DateRange, slots: HourSlots) -> Self {
        let mut buckets = Self {
            slots,
            ..Self::default()
        };

        for (index, event) in events.iter().enumerate() {
            let day = event.start_date();
            if !range.contains(day) {
                continue;
            }

            buckets.by_day.entry(day).or_default().push(index);

            if event.is_all_day {
                buckets.all_day.entry(day).or_default().push(index);
            } else if slots.contains(event.start_hour()) {
                buckets
                    .by_slot
                    .entry((day, event.start_hour()))
                    .or_default()
                    .push(index);
            }
        }

        log::debug!(
            "Bucketed {} of {} events into {} days",
            buckets.by_day.values().map(Vec::len).sum::<usize>(),
            events.len(),
            buckets.by_day.len()
        );

        buckets
    }

    pub fn slots(&self) -> HourSlots {
        self.slots
    }

    pub fn day<'a>(&self, events: &'a [CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
        resolve(events, self.by_day.get(&date))
    }

    pub fn all_day<'a>(&self, events: &'a [CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
        resolve(events, self.all_day.get(&date))
    }

    pub fn slot<'a>(
        &self,
        events: &'a [CalendarEvent],
        date: NaiveDate,
        hour: u32,
    ) -> Vec<&'a CalendarEvent> {
        resolve(events, self.by_slot.get(&(date, hour)))
    }

    pub fn day_count(&self, date: NaiveDate) -> usize {
        self.by_day.get(&date).map_or(0, Vec::len)
    }
}

fn resolve<'a>(events: &'a [CalendarEvent], indices: Option<&Vec<usize>>) -> Vec<&'a CalendarEvent> {
    indices
        .map(|indices| indices.iter().filter_map(|&i| events.get(i)).collect())
        .unwrap_or_default()
}
