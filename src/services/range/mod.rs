//! Date range building for the month, week and day grids.
//!
//! A range is always whole days, inclusive at both ends. Month ranges are
//! padded out to full weeks so the grid is rectangular, except where the
//! padding would run past the first or last date chrono can represent.

use chrono::{NaiveDate, Weekday};

use crate::models::view::ViewMode;
use crate::utils::date::{first_of_month, last_of_month, week_end, week_start};

/// Inclusive span of days displayed by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<NaiveDate>,
}

impl DateRange {
    /// Range for `mode` around `reference`, with weeks starting on Sunday.
    pub fn for_view(reference: NaiveDate, mode: ViewMode) -> Self {
        Self::for_view_with_week_start(reference, mode, Weekday::Sun)
    }

    pub fn for_view_with_week_start(reference: NaiveDate, mode: ViewMode, first_day: Weekday) -> Self {
        let (start, end) = match mode {
            ViewMode::Month => (
                week_start(first_of_month(reference), first_day),
                week_end(last_of_month(reference), first_day),
            ),
            ViewMode::Week => (week_start(reference, first_day), week_end(reference, first_day)),
            ViewMode::Day => (reference, reference),
        };
        Self::between(start, end)
    }

    /// Every day from `start` to `end`. Empty when `end < start`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let mut days = Vec::new();
        let mut day = start;
        while day <= end {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        Self { start, end, days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days grouped into grid rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }
}
