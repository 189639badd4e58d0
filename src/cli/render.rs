//! Plain-text rendering of a [`CalendarView`].

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::models::event::CalendarEvent;
use crate::models::view::ViewMode;
use crate::services::calendar_view::CalendarView;

const MONTH_CELL: usize = 8;
const SLOT_CELL: usize = 16;
const TIME_LABEL: usize = 7;

/// Text grid for a view: a month table or an hourly week/day table,
/// followed by the agenda.
pub struct Grid<'a>(pub &'a CalendarView);

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.mode() {
            ViewMode::Month => month(f, self.0)?,
            ViewMode::Week | ViewMode::Day => time_grid(f, self.0)?,
        }
        agenda(f, self.0)
    }
}

pub fn render(view: &CalendarView) -> String {
    Grid(view).to_string()
}

fn month(f: &mut fmt::Formatter<'_>, view: &CalendarView) -> fmt::Result {
    let reference = view.reference();
    writeln!(f, "{}", reference.format("%B %Y"))?;

    if let Some(first_week) = view.range().weeks().next() {
        let header = first_week
            .iter()
            .map(|day| format!("{:<MONTH_CELL$}", day.format("%a").to_string()))
            .collect::<String>();
        writeln!(f, "{}", header.trim_end())?;
    }

    for week in view.range().weeks() {
        let row = week
            .iter()
            .map(|day| {
                let count = view.events_on(*day).len();
                let label = match (day.month() == reference.month(), count) {
                    (false, _) => format!("({})", day.day()),
                    (true, 0) => format!("{}", day.day()),
                    (true, n) => format!("{}*{}", day.day(), n),
                };
                format!("{label:<MONTH_CELL$}")
            })
            .collect::<String>();
        writeln!(f, "{}", row.trim_end())?;
    }
    Ok(())
}

fn time_grid(f: &mut fmt::Formatter<'_>, view: &CalendarView) -> fmt::Result {
    let days = view.days();
    let row = |label: String, cells: Vec<String>| -> String {
        let mut line = format!("{label:<TIME_LABEL$}");
        for text in cells {
            line.push_str(&format!("{text:<SLOT_CELL$}"));
        }
        line.trim_end().to_string()
    };

    let header = days.iter().map(|day| day.format("%a %d %b").to_string()).collect();
    writeln!(f, "{}", row(String::new(), header))?;

    if days.iter().any(|day| !view.all_day_on(*day).is_empty()) {
        let cells = days.iter().map(|day| cell(&view.all_day_on(*day))).collect();
        writeln!(f, "{}", row("all-day".to_string(), cells))?;
    }

    for hour in view.slots().hours() {
        let cells = days.iter().map(|day| cell(&view.events_at(*day, hour))).collect();
        writeln!(f, "{}", row(format!("{hour:02}:00"), cells))?;
    }
    Ok(())
}

/// Event list below the grid, grouped by day.
fn agenda(f: &mut fmt::Formatter<'_>, view: &CalendarView) -> fmt::Result {
    for day in view.days() {
        let events = view.events_on(*day);
        if events.is_empty() {
            continue;
        }
        writeln!(f, "\n{}", day.format("%A %Y-%m-%d"))?;
        for event in events {
            writeln!(f, "  {}", describe(event))?;
        }
    }
    Ok(())
}

/// One-line summary of an event.
pub fn describe(event: &CalendarEvent) -> String {
    let when = if event.is_all_day {
        "all day".to_string()
    } else {
        format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"))
    };
    let mut line = format!("{} {} [{}] {}", event.event_type.icon(), when, event.event_type, event.title);
    if let Some(ref location) = event.location {
        line.push_str(&format!(" @ {}", location));
    }
    if let Some(ref rule) = event.recurrence {
        line.push_str(&format!(" ({})", rule.to_rrule()));
    }
    line
}

fn cell(events: &[&CalendarEvent]) -> String {
    let Some(first) = events.first() else {
        return String::new();
    };
    let mut text: String = first.title.chars().take(SLOT_CELL - 4).collect();
    if events.len() > 1 {
        text.push_str(&format!(" +{}", events.len() - 1));
    }
    text
}

/// Short header used by the `list` command.
pub fn day_heading(date: NaiveDate) -> String {
    date.format("%a %Y-%m-%d").to_string()
}
