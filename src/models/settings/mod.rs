// Settings module
// User-adjustable calendar configuration

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::error::CalendarError;
use crate::models::view::ViewMode;

/// Calendar configuration, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// First hour slot shown in week/day grids
    pub first_hour: u32,
    /// Last hour slot shown in week/day grids (inclusive)
    pub last_hour: u32,
    /// Day that begins each week row
    pub week_start: Weekday,
    /// "local" or an IANA zone name such as "Europe/Helsinki"
    pub time_zone: String,
    pub default_view: ViewMode,
    /// Overrides the platform data directory location of the database
    pub database_path: Option<PathBuf>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_hour: 8,
            last_hour: 20,
            week_start: Weekday::Sun,
            time_zone: "local".to_string(),
            default_view: ViewMode::Month,
            database_path: None,
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return Err(CalendarError::InvalidHourRange {
                first: self.first_hour,
                last: self.last_hour,
            });
        }
        self.zone()?;
        Ok(())
    }

    /// Resolve the configured time zone.
    pub fn zone(&self) -> Result<ViewerZone, CalendarError> {
        ViewerZone::parse(&self.time_zone)
    }
}

/// Time zone in which event instants are turned into wall-clock days and hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerZone {
    #[default]
    Local,
    Named(Tz),
}

impl ViewerZone {
    pub fn parse(name: &str) -> Result<Self, CalendarError> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| CalendarError::UnknownTimeZone(name.to_string()))
    }

    /// Wall-clock time of `instant` in this zone.
    pub fn wall_clock<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.wall_clock(&chrono::Utc::now())
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn test_defaults_match_school_day() {
        let config = CalendarConfig::default();
        assert_eq!(config.first_hour, 8);
        assert_eq!(config.last_hour, 20);
        assert_eq!(config.week_start, Weekday::Sun);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_hour_range() {
        let config = CalendarConfig {
            first_hour: 18,
            last_hour: 9,
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(CalendarError::InvalidHourRange { first: 18, last: 9 })
        );

        let config = CalendarConfig {
            last_hour: 24,
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_zone() {
        let config = CalendarConfig {
            time_zone: "Mars/Olympus".to_string(),
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(CalendarError::UnknownTimeZone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn test_named_zone_wall_clock() {
        let zone = ViewerZone::parse("Europe/Helsinki").unwrap();
        let instant = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 7, 15, 22, 30, 0)
            .unwrap();
        // Helsinki is UTC+3 in summer, so this is already the next day there.
        let wall = zone.wall_clock(&instant);
        assert_eq!(wall.date(), NaiveDate::from_ymd_opt(2025, 7, 16).unwrap());
        assert_eq!(wall.hour(), 1);
    }

    #[test]
    fn test_local_aliases() {
        assert_eq!(ViewerZone::parse("local"), Ok(ViewerZone::Local));
        assert_eq!(ViewerZone::parse(""), Ok(ViewerZone::Local));
    }

    #[test]
    fn test_toml_partial_config_uses_defaults() {
        let config: CalendarConfig =
            toml::from_str("first_hour = 7\ntime_zone = \"UTC\"\n").unwrap();
        assert_eq!(config.first_hour, 7);
        assert_eq!(config.last_hour, 20);
        assert_eq!(config.zone().unwrap(), ViewerZone::Named(chrono_tz::UTC));
    }
}
