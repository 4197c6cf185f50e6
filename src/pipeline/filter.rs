use std::collections::BTreeSet;

use crate::types::{ActivityType, TimeEntry};

/// Which activity types the table shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivityFilter {
    #[default]
    All,
    Only(BTreeSet<ActivityType>),
}

impl ActivityFilter {
    /// The predicate only applies to a proper, non-total subset.
    pub fn is_restrictive(&self) -> bool {
        match self {
            ActivityFilter::All => false,
            ActivityFilter::Only(selected) => selected.len() != ActivityType::ALL.len(),
        }
    }

    pub fn contains(&self, activity: ActivityType) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Only(selected) => selected.contains(&activity),
        }
    }

    /// Flips one activity. Deselecting the last one is refused, and a
    /// selection covering every activity collapses back to `All`.
    pub fn toggled(&self, activity: ActivityType) -> ActivityFilter {
        let mut selected: BTreeSet<ActivityType> = match self {
            ActivityFilter::All => ActivityType::ALL.into_iter().collect(),
            ActivityFilter::Only(selected) => selected.clone(),
        };
        if !selected.remove(&activity) {
            selected.insert(activity);
        }
        if selected.is_empty() {
            return self.clone();
        }
        if selected.len() == ActivityType::ALL.len() {
            return ActivityFilter::All;
        }
        ActivityFilter::Only(selected)
    }
}

fn matches_search(entry: &TimeEntry, needle: &str) -> bool {
    needle.is_empty() || entry.project.to_lowercase().contains(needle)
}

/// Keeps the entries whose project contains `search_text` (ignoring case)
/// and whose activity passes `activity`, in input order.
pub fn filter_entries(
    entries: &[TimeEntry],
    search_text: &str,
    activity: &ActivityFilter,
) -> Vec<TimeEntry> {
    let needle = search_text.to_lowercase();
    let restrictive = activity.is_restrictive();
    entries
        .iter()
        .filter(|entry| matches_search(entry, &needle))
        .filter(|entry| !restrictive || activity.contains(entry.activity_type))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_entries;

    fn ids(entries: &[TimeEntry]) -> Vec<u32> {
        entries.iter().map(|entry| entry.id).collect()
    }

    fn only(activities: &[ActivityType]) -> ActivityFilter {
        ActivityFilter::Only(activities.iter().copied().collect())
    }

    #[test]
    fn search_is_case_insensitive() {
        let entries = &mock_entries()[..2];
        let filtered = filter_entries(entries, "proyecto a", &ActivityFilter::All);
        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let entries = mock_entries();
        assert_eq!(filter_entries(&entries, "", &ActivityFilter::All), entries);
    }

    #[test]
    fn activity_subset_filters_and_preserves_order() {
        let entries = mock_entries();
        let filtered = filter_entries(&entries, "", &only(&[ActivityType::Development]));
        assert_eq!(ids(&filtered), vec![1, 5, 7]);
    }

    #[test]
    fn full_activity_set_is_not_applied() {
        let entries = mock_entries();
        let filtered = filter_entries(&entries, "", &only(&ActivityType::ALL));
        assert_eq!(filtered, entries);
    }

    #[test]
    fn empty_activity_set_passes_nothing() {
        let entries = mock_entries();
        assert!(filter_entries(&entries, "", &only(&[])).is_empty());
    }

    #[test]
    fn both_predicates_combine() {
        let entries = mock_entries();
        let filtered = filter_entries(&entries, "PROYECTO", &only(&[ActivityType::Meeting]));
        assert_eq!(ids(&filtered), vec![2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let entries = mock_entries();
        let selectors = [ActivityFilter::All, only(&[ActivityType::Meeting, ActivityType::Development])];
        for activity in &selectors {
            for search in ["", "a", "finance", "proyecto", "zzz"] {
                let once = filter_entries(&entries, search, activity);
                let twice = filter_entries(&once, search, activity);
                assert_eq!(once, twice, "search {search:?}");
            }
        }
    }

    #[test]
    fn longer_search_yields_a_subset() {
        let entries = mock_entries();
        let activity = only(&[ActivityType::Development, ActivityType::Documentation]);
        let steps = ["", "p", "pr", "proyecto", "proyecto ", "proyecto a"];
        for pair in steps.windows(2) {
            let broad = filter_entries(&entries, pair[0], &activity);
            let narrow = filter_entries(&entries, pair[1], &activity);
            assert!(narrow.iter().all(|entry| broad.contains(entry)));
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let entries = mock_entries();
        let before = entries.clone();
        let _ = filter_entries(&entries, "unity", &only(&[ActivityType::Development]));
        assert_eq!(entries, before);
    }

    #[test]
    fn toggling_from_all_deselects_one() {
        let toggled = ActivityFilter::All.toggled(ActivityType::Meeting);
        assert_eq!(toggled, only(&[ActivityType::Development, ActivityType::Documentation]));
        assert_eq!(toggled.toggled(ActivityType::Meeting), ActivityFilter::All);
    }

    #[test]
    fn last_activity_cannot_be_deselected() {
        let single = only(&[ActivityType::Meeting]);
        assert_eq!(single.toggled(ActivityType::Meeting), single);
    }
}
