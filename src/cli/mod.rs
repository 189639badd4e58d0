//! Command-line front end.

pub mod render;

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::event::{CalendarEvent, EventRecord, EventType};
use crate::models::recurrence::{Recurrence, RecurrencePattern};
use crate::models::settings::CalendarConfig;
use crate::models::view::ViewMode;
use crate::services::calendar_view::CalendarView;
use crate::services::database::Database;
use crate::services::event::EventService;
use crate::services::navigation::Navigator;
use crate::services::settings::SettingsService;
use crate::utils::date::parse_event_datetime;

#[derive(Parser, Debug)]
#[command(
    name = "school-calendar",
    version,
    about = "Month, week and day views of the school calendar"
)]
pub struct Cli {
    /// Config file (defaults to $SCHOOL_CALENDAR_CONFIG or the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a month, week or day grid
    Show {
        #[arg(long)]
        view: Option<ViewMode>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of views to move forward (negative moves back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Create an event
    Add(AddArgs),
    /// List every stored event
    List,
    /// Delete an event by id
    Delete { id: String },
    /// Import a JSON array of events, replacing ones with the same id
    Import { file: PathBuf },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    /// ISO-8601 start, e.g. 2025-07-16T09:30
    #[arg(long)]
    pub start: String,
    /// ISO-8601 end (defaults to one hour after start, or the start for all-day events)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long = "type", default_value = "event")]
    pub event_type: EventType,
    #[arg(long)]
    pub all_day: bool,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub repeat: Option<RecurrencePattern>,
    #[arg(long, default_value_t = 1)]
    pub interval: u32,
    /// Last date of the repetition, YYYY-MM-DD
    #[arg(long)]
    pub until: Option<NaiveDate>,
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let settings = SettingsService::locate(cli.config.as_deref())?;
    let config = settings.load()?;

    let db_path = match cli.db {
        Some(path) => path,
        None => SettingsService::database_path(&config)?,
    };
    let db_path = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path {} is not valid UTF-8", db_path.display()))?
        .to_string();
    let db = Database::new(&db_path)?;
    db.initialize_schema()?;
    let service = EventService::new(db.connection());

    match cli.command {
        Command::Show { view, date, offset } => show(&service, &config, view, date, offset),
        Command::Add(args) => add(&service, &config, args),
        Command::List => list(&service),
        Command::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
        Command::Import { file } => import(&service, &config, &file),
    }
}

fn show(
    service: &EventService,
    config: &CalendarConfig,
    view: Option<ViewMode>,
    date: Option<NaiveDate>,
    offset: i32,
) -> Result<()> {
    let zone = config.zone()?;
    let mut navigator = Navigator::new(NaiveDate::default(), view.unwrap_or(config.default_view))
        .with_week_start(config.week_start);
    match date {
        Some(date) => navigator.jump_to(date),
        None => {
            navigator.today(&zone);
        }
    }
    navigator.step_by(offset);

    let view = CalendarView::load(service, &navigator, config)?;
    print!("{}", render::Grid(&view));
    Ok(())
}

fn add(service: &EventService, config: &CalendarConfig, args: AddArgs) -> Result<()> {
    let zone = config.zone()?;
    let start = parse_event_datetime(&args.start, &zone)?;
    let end = match args.end {
        Some(ref end) => parse_event_datetime(end, &zone)?,
        None if args.all_day => start,
        None => start
            .checked_add_signed(Duration::hours(1))
            .ok_or_else(|| anyhow!("No default end after {}", start))?,
    };

    let mut builder = CalendarEvent::builder()
        .title(args.title)
        .start(start)
        .end(end)
        .all_day(args.all_day)
        .event_type(args.event_type);
    if let Some(location) = args.location {
        builder = builder.location(location);
    }
    if let Some(description) = args.description {
        builder = builder.description(description);
    }
    if let Some(pattern) = args.repeat {
        let mut rule = Recurrence::new(pattern).every(args.interval);
        rule.end_date = args.until;
        builder = builder.recurrence(rule);
    }

    let event = service.create(builder.build()?)?;
    println!("{}", event.id);
    Ok(())
}

fn list(service: &EventService) -> Result<()> {
    let mut current_day = None;
    for event in service.list_all()? {
        if current_day != Some(event.start_date()) {
            current_day = Some(event.start_date());
            println!("{}", render::day_heading(event.start_date()));
        }
        println!("  {}  {}", event.id, render::describe(&event));
    }
    Ok(())
}

fn import(service: &EventService, config: &CalendarConfig, file: &Path) -> Result<()> {
    let zone = config.zone()?;
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<EventRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse events from {}", file.display()))?;

    let events = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            CalendarEvent::from_record(record, &zone)
                .with_context(|| format!("Invalid event at index {}", index))
        })
        .collect::<Result<Vec<_>>>()?;

    let stored = service.upsert_all(&events)?;
    log::info!("Imported {} events from {}", stored, file.display());
    println!("Imported {} events", stored);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_negative_offset() {
        let cli = Cli::try_parse_from([
            "school-calendar",
            "show",
            "--view",
            "week",
            "--date",
            "2025-07-16",
            "--offset",
            "-2",
        ])
        .unwrap();

        match cli.command {
            Command::Show { view, date, offset } => {
                assert_eq!(view, Some(ViewMode::Week));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 16));
                assert_eq!(offset, -2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "school-calendar",
            "--db",
            "/tmp/cal.db",
            "add",
            "--title",
            "Mock exams",
            "--start",
            "2025-11-03T09:00",
            "--type",
            "exam",
            "--repeat",
            "daily",
            "--until",
            "2025-11-07",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/cal.db")));
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.event_type, EventType::Exam);
        assert_eq!(args.repeat, Some(RecurrencePattern::Daily));
        assert_eq!(args.interval, 1);
    }

    #[test]
    fn test_rejects_unknown_view() {
        assert!(Cli::try_parse_from(["school-calendar", "show", "--view", "year"]).is_err());
    }
}
