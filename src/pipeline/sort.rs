use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnKey;
use crate::types::{ClockTime, TimeEntry};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column: ColumnKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self {
            column: ColumnKey::StartTime,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortDescriptor {
    /// Header click: same column flips direction, another column starts ascending.
    pub fn clicked(self, column: ColumnKey) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::Ascending,
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Number(u32),
    Time(ClockTime),
    Text(&'a str),
    MaybeText(Option<&'a str>),
}

fn sort_value(entry: &TimeEntry, column: ColumnKey) -> Option<SortValue<'_>> {
    match column {
        ColumnKey::Id => Some(SortValue::Number(entry.id)),
        ColumnKey::StartTime => Some(SortValue::Time(entry.start_time)),
        ColumnKey::EndTime => Some(SortValue::Time(entry.end_time)),
        ColumnKey::ActivityType => Some(SortValue::Text(entry.activity_type.key())),
        ColumnKey::Project => Some(SortValue::Text(&entry.project)),
        ColumnKey::Location => Some(SortValue::MaybeText(entry.location.as_deref())),
        ColumnKey::Actions => None,
    }
}

/// Three-way comparison of one column. Columns without a value compare equal.
pub fn compare_entries(a: &TimeEntry, b: &TimeEntry, sort: SortDescriptor) -> Ordering {
    let cmp = match (sort_value(a, sort.column), sort_value(b, sort.column)) {
        (Some(first), Some(second)) => first.cmp(&second),
        _ => Ordering::Equal,
    };
    match sort.direction {
        SortDirection::Ascending => cmp,
        SortDirection::Descending => cmp.reverse(),
    }
}

/// Returns a stably sorted copy of `entries`.
pub fn sort_entries(entries: &[TimeEntry], sort: SortDescriptor) -> Vec<TimeEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| compare_entries(a, b, sort));
    sorted
}
