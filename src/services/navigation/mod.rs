//! Moving the reference date by one view unit.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::view::{Direction, ViewMode};
use crate::services::range::DateRange;
use crate::models::settings::ViewerZone;
use crate::utils::date::{add_days_saturating, shift_month_clamped};

/// Step `date` one view unit in `direction`.
///
/// Month steps keep the day of month, clamped to the length of the target
/// month, so Jan 31 moves to Feb 28. Use [`Navigator`] when stepping back
/// must restore the original day. Steps past the first or last representable
/// date leave `date` at that limit.
pub fn shift(date: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    match mode {
        ViewMode::Day => add_days_saturating(date, direction.sign() as i64),
        ViewMode::Week => add_days_saturating(date, direction.sign() as i64 * 7),
        ViewMode::Month => shift_month_clamped(date, direction.sign(), date.day()),
    }
}

/// Calendar cursor: current reference date and view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    date: NaiveDate,
    mode: ViewMode,
    week_start: Weekday,
    /// Day of month to return to once a month that has it is reached again
    preferred_day: u32,
}

impl Navigator {
    pub fn new(date: NaiveDate, mode: ViewMode) -> Self {
        Self {
            date,
            mode,
            week_start: Weekday::Sun,
            preferred_day: date.day(),
        }
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.date = date;
        self.preferred_day = date.day();
    }

    /// Jump to the current date in `zone`.
    pub fn today(&mut self, zone: &ViewerZone) -> NaiveDate {
        self.jump_to(zone.today());
        self.date
    }

    pub fn step(&mut self, direction: Direction) -> NaiveDate {
        self.date = match self.mode {
            ViewMode::Month => shift_month_clamped(self.date, direction.sign(), self.preferred_day),
            mode => {
                let next = shift(self.date, mode, direction);
                self.preferred_day = next.day();
                next
            }
        };
        log::trace!("Navigated {:?} to {} ({})", direction, self.date, self.mode);
        self.date
    }

    pub fn next(&mut self) -> NaiveDate {
        self.step(Direction::Next)
    }

    pub fn previous(&mut self) -> NaiveDate {
        self.step(Direction::Previous)
    }

    /// Apply `offset` steps; negative values move backwards.
    pub fn step_by(&mut self, offset: i32) -> NaiveDate {
        let direction = if offset < 0 { Direction::Previous } else { Direction::Next };
        for _ in 0..offset.unsigned_abs() {
            self.step(direction);
        }
        self.date
    }

    /// Date range for the current position.
    pub fn range(&self) -> DateRange {
        DateRange::for_view_with_week_start(self.date, self.mode, self.week_start)
    }
}
