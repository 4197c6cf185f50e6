/// Color utilities for activity types and UI.
use std::collections::BTreeMap;

use crate::types::ActivityType;

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Built-in color of an activity: green, amber and blue.
pub fn default_activity_color(activity: ActivityType) -> &'static str {
    match activity {
        ActivityType::Development => "#22C55E",
        ActivityType::Meeting => "#F5A524",
        ActivityType::Documentation => "#3B82F6",
    }
}

/// Configured color for `activity`, falling back to the built-in palette.
pub fn activity_color(activity: ActivityType, overrides: &BTreeMap<ActivityType, String>) -> String {
    overrides
        .get(&activity)
        .filter(|color| is_valid_hex(color))
        .cloned()
        .unwrap_or_else(|| default_activity_color(activity).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_validation() {
        assert!(is_valid_hex("#A1b2C3"));
        assert!(!is_valid_hex("A1B2C3"));
        assert!(!is_valid_hex("#A1B2C"));
        assert!(!is_valid_hex("#GGGGGG"));
    }

    #[test]
    fn override_wins_when_valid() {
        let mut overrides = BTreeMap::new();
        overrides.insert(ActivityType::Meeting, "#123456".to_string());
        overrides.insert(ActivityType::Development, "green".to_string());
        assert_eq!(activity_color(ActivityType::Meeting, &overrides), "#123456");
        assert_eq!(activity_color(ActivityType::Development, &overrides), "#22C55E");
    }
}
