// Property-based tests for range building, bucketing and navigation

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use school_calendar::models::event::CalendarEvent;
use school_calendar::models::view::{Direction, ViewMode};
use school_calendar::services::bucket::events_for_day;
use school_calendar::services::navigation::{shift, Navigator};
use school_calendar::services::range::DateRange;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 1900-01-01 .. 2199-12-31
    (0i64..109_572).prop_map(|offset| NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(offset))
}

fn any_mode() -> impl Strategy<Value = ViewMode> {
    prop_oneof![Just(ViewMode::Month), Just(ViewMode::Week), Just(ViewMode::Day)]
}

fn any_weekday() -> impl Strategy<Value = Weekday> {
    prop::sample::select(vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ])
}

proptest! {
    /// Property: month grids are whole weeks (28, 35 or 42 days)
    #[test]
    fn prop_month_is_whole_weeks(reference in any_date(), first_day in any_weekday()) {
        let range = DateRange::for_view_with_week_start(reference, ViewMode::Month, first_day);
        prop_assert_eq!(range.len() % 7, 0);
        prop_assert!((28..=42).contains(&range.len()));
        prop_assert_eq!(range.start.weekday(), first_day);
    }

    /// Property: month grids cover the whole reference month
    #[test]
    fn prop_month_covers_month(reference in any_date()) {
        let range = DateRange::for_view(reference, ViewMode::Month);
        let first = reference.with_day(1).unwrap();
        prop_assert!(range.contains(first));
        prop_assert!(range.start > first - Duration::days(7));
        prop_assert_eq!(range.start.weekday(), Weekday::Sun);
        prop_assert_eq!(range.end.weekday(), Weekday::Sat);
    }

    /// Property: week grids are exactly seven consecutive days from Sunday
    #[test]
    fn prop_week_is_seven_days(reference in any_date()) {
        let range = DateRange::for_view(reference, ViewMode::Week);
        prop_assert_eq!(range.len(), 7);
        prop_assert_eq!(range.start.weekday(), Weekday::Sun);
        prop_assert_eq!(range.end - range.start, Duration::days(6));
    }

    /// Property: day grids are exactly the reference date
    #[test]
    fn prop_day_is_reference(reference in any_date()) {
        let range = DateRange::for_view(reference, ViewMode::Day);
        prop_assert_eq!(range.days, vec![reference]);
    }

    /// Property: the reference date always lies inside its range
    #[test]
    fn prop_reference_inside_range(reference in any_date(), mode in any_mode()) {
        let range = DateRange::for_view(reference, mode);
        prop_assert!(range.start <= reference && reference <= range.end);
        prop_assert_eq!(range.days.first().copied(), Some(range.start));
        prop_assert_eq!(range.days.last().copied(), Some(range.end));
    }

    /// Property: an event is found on its start day and no other day of the week
    #[test]
    fn prop_event_in_exactly_one_day_bucket(
        reference in any_date(),
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let start = reference.and_hms_opt(hour, minute, 0).unwrap();
        let events = vec![CalendarEvent::new("Tutorial", start, start + Duration::minutes(30)).unwrap()];
        let range = DateRange::for_view(reference, ViewMode::Week);
        let hits: Vec<NaiveDate> = range
            .days
            .iter()
            .copied()
            .filter(|day| !events_for_day(&events, *day).is_empty())
            .collect();
        prop_assert_eq!(hits, vec![reference]);
    }

    /// Property: navigator next then previous (and back) restores the date
    #[test]
    fn prop_navigator_round_trip(reference in any_date(), mode in any_mode()) {
        let mut nav = Navigator::new(reference, mode);
        nav.next();
        prop_assert_eq!(nav.previous(), reference);
        nav.previous();
        prop_assert_eq!(nav.next(), reference);
    }

    /// Property: several steps out and back return to the start
    #[test]
    fn prop_navigator_multi_step_round_trip(reference in any_date(), mode in any_mode(), steps in 1i32..24) {
        let mut nav = Navigator::new(reference, mode);
        nav.step_by(steps);
        prop_assert_eq!(nav.step_by(-steps), reference);
    }

    /// Property: plain shifting is reversible for week/day and for early month days
    #[test]
    fn prop_shift_round_trip(reference in any_date(), mode in any_mode()) {
        prop_assume!(mode != ViewMode::Month || reference.day() <= 28);
        let there = shift(reference, mode, Direction::Next);
        prop_assert_eq!(shift(there, mode, Direction::Previous), reference);
    }

    /// Property: a forward step always moves past the current view unit
    #[test]
    fn prop_step_moves_forward(reference in any_date(), mode in any_mode()) {
        let mut nav = Navigator::new(reference, mode);
        let before = nav.range();
        let after = nav.next();
        prop_assert!(after > reference);
        match mode {
            ViewMode::Month => {
                prop_assert_ne!(after.month(), reference.month());
            }
            ViewMode::Week | ViewMode::Day => {
                prop_assert!(nav.range().start > before.end);
            }
        }
    }
}
