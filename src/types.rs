use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;

pub type EntryId = u32;

/// Wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn signed_duration_since(self, earlier: ClockTime) -> TimeDelta {
        self.0.signed_duration_since(earlier.0)
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| TimeParseError(s.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Closed vocabulary classifying the nature of the work in an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Development,
    Meeting,
    Documentation,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [
        ActivityType::Development,
        ActivityType::Meeting,
        ActivityType::Documentation,
    ];

    /// Stable tag, also used as the sort value of the activity column.
    pub fn key(self) -> &'static str {
        match self {
            ActivityType::Development => "development",
            ActivityType::Meeting => "meeting",
            ActivityType::Documentation => "documentation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityType::Development => "Development",
            ActivityType::Meeting => "Meeting",
            ActivityType::Documentation => "Documentation",
        }
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|activity| activity.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown activity type '{s}'"))
    }
}

///A single recorded block of time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub activity_type: ActivityType,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// An entry that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDraft {
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub activity_type: ActivityType,
    pub project: String,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_parses_and_formats() {
        let time: ClockTime = "09:05".parse().unwrap();
        assert_eq!(time, ClockTime::new(9, 5).unwrap());
        assert_eq!(time.to_string(), "09:05");
    }

    #[test]
    fn clock_time_rejects_malformed_input() {
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("".parse::<ClockTime>().is_err());
    }

    #[test]
    fn activity_type_parses_case_insensitively() {
        assert_eq!("Meeting".parse::<ActivityType>(), Ok(ActivityType::Meeting));
        assert!("lunch".parse::<ActivityType>().is_err());
    }
}
