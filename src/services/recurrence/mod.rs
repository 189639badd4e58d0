//! Recurrence expansion.
//!
//! Turns an event's repeat rule into concrete occurrences inside a window.
//! Monthly and yearly rules keep the anchor day; months without that day
//! (the 31st, Feb 29) are skipped rather than shifted.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::event::CalendarEvent;
use crate::models::recurrence::{Recurrence, RecurrencePattern};
use crate::services::range::DateRange;
use crate::utils::date::{end_of_day, start_of_day};

/// Upper bound on occurrences generated for one event in one window.
pub const MAX_OCCURRENCES: usize = 1000;

/// Upper bound on rule steps examined for one event in one window.
const MAX_STEPS: u64 = 100_000;

/// Occurrences of `event` whose start lies in `window_start..=window_end`.
/// A non-recurring event yields itself when it starts in the window.
pub fn expand(
    event: &CalendarEvent,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<CalendarEvent> {
    let Some(ref rule) = event.recurrence else {
        return if event.start >= window_start && event.start <= window_end {
            vec![event.clone()]
        } else {
            Vec::new()
        };
    };

    if rule.interval == 0 {
        log::warn!("Ignoring recurrence with zero interval on event {}", event.id);
        return Vec::new();
    }

    let duration = event.duration();
    let mut occurrences = Vec::new();
    let mut step = first_candidate_step(event.start, rule, window_start);

    for _ in 0..MAX_STEPS {
        let Some(candidate) = nth_start(event.start, rule, step) else {
            step += 1;
            continue;
        };

        if candidate > window_end {
            break;
        }
        if rule.end_date.is_some_and(|until| candidate.date() > until) {
            break;
        }
        if candidate >= window_start {
            occurrences.push(occurrence(event, candidate, duration));
            if occurrences.len() >= MAX_OCCURRENCES {
                log::warn!(
                    "Event {} produced more than {} occurrences; truncating",
                    event.id,
                    MAX_OCCURRENCES
                );
                break;
            }
        }
        step += 1;
    }

    occurrences
}

/// Expand every event over the days of `range`, sorted by start.
pub fn expand_all(events: &[CalendarEvent], range: &DateRange) -> Vec<CalendarEvent> {
    if range.is_empty() {
        return Vec::new();
    }
    let window_start = start_of_day(range.start);
    let window_end = end_of_day(range.end);

    let mut expanded: Vec<CalendarEvent> = events
        .iter()
        .flat_map(|event| expand(event, window_start, window_end))
        .collect();
    expanded.sort_by_key(|event| event.start);
    expanded
}

fn occurrence(event: &CalendarEvent, start: NaiveDateTime, duration: Duration) -> CalendarEvent {
    let mut occurrence = event.clone();
    occurrence.id = format!("{}:{}", event.id, start.format("%Y%m%d"));
    occurrence.start = start;
    occurrence.end = start.checked_add_signed(duration).unwrap_or(NaiveDateTime::MAX);
    occurrence
}

/// Skip whole steps that certainly end before the window.
fn first_candidate_step(anchor: NaiveDateTime, rule: &Recurrence, window_start: NaiveDateTime) -> u64 {
    if window_start <= anchor {
        return 0;
    }
    let interval = rule.interval as i64;
    let steps = match rule.pattern {
        RecurrencePattern::Daily => (window_start - anchor).num_days() / interval,
        RecurrencePattern::Weekly => (window_start - anchor).num_weeks() / interval,
        RecurrencePattern::Monthly => months_between(anchor.date(), window_start.date()) / interval - 1,
        RecurrencePattern::Yearly => {
            (window_start.year() - anchor.year()) as i64 / interval - 1
        }
    };
    steps.max(0) as u64
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() - from.year()) as i64 * 12 + to.month() as i64 - from.month() as i64
}

/// Start of the `step`-th repetition, or `None` when that month lacks the anchor day.
fn nth_start(anchor: NaiveDateTime, rule: &Recurrence, step: u64) -> Option<NaiveDateTime> {
    let units = step.checked_mul(rule.interval as u64)?;
    let units = i64::try_from(units).ok()?;
    match rule.pattern {
        RecurrencePattern::Daily => anchor.checked_add_signed(Duration::try_days(units)?),
        RecurrencePattern::Weekly => anchor.checked_add_signed(Duration::try_weeks(units)?),
        RecurrencePattern::Monthly => add_months_exact(anchor, units),
        RecurrencePattern::Yearly => add_months_exact(anchor, units.checked_mul(12)?),
    }
}

fn add_months_exact(anchor: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let total = anchor.year() as i64 * 12 + anchor.month0() as i64 + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, anchor.day()).map(|date| date.and_time(anchor.time()))
}
