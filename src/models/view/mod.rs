// View mode module
// Granularity of the calendar grid and navigation direction

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::error::CalendarError;

/// Calendar view modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }

    /// Whether the grid is broken into hour slots.
    pub fn has_time_slots(&self) -> bool {
        matches!(self, Self::Week | Self::Day)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            other => Err(CalendarError::UnknownViewMode(other.to_string())),
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn sign(&self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Self::Previous => Self::Next,
            Self::Next => Self::Previous,
        }
    }
}
