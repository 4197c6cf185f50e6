use std::fmt;

use chrono::TimeDelta;
use tracing::warn;

use crate::types::{EntryId, TimeEntry};

/// Sum of entry durations over a whole collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TotalDuration {
    pub minutes: i64,
    /// Entries that end before they start. They count as zero.
    pub rejected: Vec<EntryId>,
}

impl TotalDuration {
    pub fn hours(&self) -> f64 {
        self.minutes as f64 / 60.0
    }
}

impl fmt::Display for TotalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.hours())
    }
}

/// Duration of one entry, or `None` when it ends before its start.
pub fn entry_duration(entry: &TimeEntry) -> Option<TimeDelta> {
    let delta = entry.end_time.signed_duration_since(entry.start_time);
    (delta >= TimeDelta::zero()).then_some(delta)
}

pub fn total_duration(entries: &[TimeEntry]) -> TotalDuration {
    entries
        .iter()
        .fold(TotalDuration::default(), |mut total, entry| {
            match entry_duration(entry) {
                Some(delta) => total.minutes += delta.num_minutes(),
                None => {
                    warn!(id = entry.id, "entry ends before it starts, counted as zero");
                    total.rejected.push(entry.id);
                }
            }
            total
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_entries;

    #[test]
    fn sums_reference_entries() {
        let entries = &mock_entries()[..3];
        let total = total_duration(entries);
        assert_eq!(total.minutes, 435);
        assert_eq!(total.hours(), 7.25);
        assert_eq!(total.to_string(), "7.25");
        assert!(total.rejected.is_empty());
    }

    #[test]
    fn empty_collection_is_zero() {
        assert_eq!(total_duration(&[]).to_string(), "0.00");
    }

    #[test]
    fn end_before_start_counts_zero_and_is_reported() {
        let mut entries = mock_entries()[..3].to_vec();
        entries[1].end_time = "10:00".parse().unwrap();
        let total = total_duration(&entries);
        assert_eq!(total.to_string(), "6.00");
        assert_eq!(total.rejected, vec![2]);
    }

    #[test]
    fn zero_length_entry_counts_zero_without_warning() {
        let mut entries = mock_entries()[..2].to_vec();
        entries[0].end_time = entries[0].start_time;
        let total = total_duration(&entries);
        assert_eq!(total.to_string(), "1.25");
        assert!(total.rejected.is_empty());
    }

    #[test]
    fn thirds_of_an_hour_round_to_two_decimals() {
        let mut entries = mock_entries()[..1].to_vec();
        entries[0].start_time = "09:00".parse().unwrap();
        entries[0].end_time = "09:20".parse().unwrap();
        assert_eq!(total_duration(&entries).to_string(), "0.33");
    }
}
