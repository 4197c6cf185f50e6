/// Column descriptors and the per-column cell renderers.
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{ActivityType, ClockTime, TimeEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Id,
    StartTime,
    EndTime,
    ActivityType,
    Project,
    Location,
    Actions,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 7] = [
        ColumnKey::Id,
        ColumnKey::StartTime,
        ColumnKey::EndTime,
        ColumnKey::ActivityType,
        ColumnKey::Project,
        ColumnKey::Location,
        ColumnKey::Actions,
    ];

    pub fn uid(self) -> &'static str {
        match self {
            ColumnKey::Id => "id",
            ColumnKey::StartTime => "startTime",
            ColumnKey::EndTime => "endTime",
            ColumnKey::ActivityType => "activityType",
            ColumnKey::Project => "project",
            ColumnKey::Location => "location",
            ColumnKey::Actions => "actions",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uid())
    }
}

impl FromStr for ColumnKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColumnKey::ALL
            .into_iter()
            .find(|key| {
                key.uid().eq_ignore_ascii_case(wanted)
                    || key.uid().eq_ignore_ascii_case(&wanted.replace(['_', '-'], ""))
            })
            .ok_or_else(|| format!("unknown column '{s}'"))
    }
}

pub const DEFAULT_VISIBLE_COLUMNS: [ColumnKey; 5] = [
    ColumnKey::StartTime,
    ColumnKey::EndTime,
    ColumnKey::ActivityType,
    ColumnKey::Project,
    ColumnKey::Actions,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub key: ColumnKey,
    pub sortable: bool,
}

/// What a single table cell shows; the UI layer decides how to draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Time(ClockTime),
    Activity(ActivityType),
    Actions,
    Empty,
}

impl CellContent {
    pub fn plain_text(&self) -> String {
        match self {
            CellContent::Text(text) => text.clone(),
            CellContent::Time(time) => time.to_string(),
            CellContent::Activity(activity) => activity.label().to_string(),
            CellContent::Actions => "edit | delete".to_string(),
            CellContent::Empty => String::new(),
        }
    }
}

pub type CellRenderer = fn(&TimeEntry) -> CellContent;

#[derive(Clone, Debug)]
pub struct ColumnDef {
    pub descriptor: ColumnDescriptor,
    pub render: CellRenderer,
}

/// The validated set of columns a table can show, in display order.
#[derive(Clone, Debug)]
pub struct ColumnSet {
    columns: Vec<ColumnDef>,
}

impl ColumnSet {
    /// Pairs every descriptor with its renderer. Fails when a key is
    /// duplicated, lacks a renderer, or a renderer names an unknown column.
    pub fn new(
        descriptors: Vec<ColumnDescriptor>,
        renderers: &[(ColumnKey, CellRenderer)],
    ) -> Result<Self, ConfigError> {
        let mut by_key: HashMap<ColumnKey, CellRenderer> = HashMap::new();
        for (key, render) in renderers {
            if by_key.insert(*key, *render).is_some() {
                return Err(ConfigError::DuplicateColumn(*key));
            }
        }

        let mut seen = BTreeSet::new();
        let mut columns = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !seen.insert(descriptor.key) {
                return Err(ConfigError::DuplicateColumn(descriptor.key));
            }
            let render = by_key
                .remove(&descriptor.key)
                .ok_or(ConfigError::MissingRenderer(descriptor.key))?;
            columns.push(ColumnDef { descriptor, render });
        }

        if let Some(key) = by_key.keys().min() {
            return Err(ConfigError::UnknownRenderer(*key));
        }
        Ok(Self { columns })
    }

    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(standard_descriptors(), &STANDARD_RENDERERS)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn get(&self, key: ColumnKey) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.descriptor.key == key)
    }

    pub fn is_sortable(&self, key: ColumnKey) -> bool {
        self.get(key).is_some_and(|column| column.descriptor.sortable)
    }

    /// Columns to draw in the header, in configured order.
    pub fn header_columns(&self, visible: &BTreeSet<ColumnKey>) -> Vec<&ColumnDef> {
        self.columns
            .iter()
            .filter(|column| visible.contains(&column.descriptor.key))
            .collect()
    }

    pub fn render_row(&self, entry: &TimeEntry, visible: &BTreeSet<ColumnKey>) -> Vec<CellContent> {
        self.header_columns(visible)
            .into_iter()
            .map(|column| (column.render)(entry))
            .collect()
    }
}

fn standard_descriptors() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor { name: "ID", key: ColumnKey::Id, sortable: true },
        ColumnDescriptor { name: "START", key: ColumnKey::StartTime, sortable: true },
        ColumnDescriptor { name: "END", key: ColumnKey::EndTime, sortable: true },
        ColumnDescriptor { name: "ACTIVITY", key: ColumnKey::ActivityType, sortable: true },
        ColumnDescriptor { name: "PROJECT", key: ColumnKey::Project, sortable: true },
        ColumnDescriptor { name: "LOCATION", key: ColumnKey::Location, sortable: true },
        ColumnDescriptor { name: "ACTIONS", key: ColumnKey::Actions, sortable: false },
    ]
}

const STANDARD_RENDERERS: [(ColumnKey, CellRenderer); 7] = [
    (ColumnKey::Id, render_id),
    (ColumnKey::StartTime, render_start),
    (ColumnKey::EndTime, render_end),
    (ColumnKey::ActivityType, render_activity),
    (ColumnKey::Project, render_project),
    (ColumnKey::Location, render_location),
    (ColumnKey::Actions, render_actions),
];

fn render_id(entry: &TimeEntry) -> CellContent {
    CellContent::Text(entry.id.to_string())
}

fn render_start(entry: &TimeEntry) -> CellContent {
    CellContent::Time(entry.start_time)
}

fn render_end(entry: &TimeEntry) -> CellContent {
    CellContent::Time(entry.end_time)
}

fn render_activity(entry: &TimeEntry) -> CellContent {
    CellContent::Activity(entry.activity_type)
}

fn render_project(entry: &TimeEntry) -> CellContent {
    CellContent::Text(entry.project.clone())
}

fn render_location(entry: &TimeEntry) -> CellContent {
    match &entry.location {
        Some(location) => CellContent::Text(location.clone()),
        None => CellContent::Empty,
    }
}

fn render_actions(_entry: &TimeEntry) -> CellContent {
    CellContent::Actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_entries;

    fn default_visible() -> BTreeSet<ColumnKey> {
        DEFAULT_VISIBLE_COLUMNS.into_iter().collect()
    }

    #[test]
    fn standard_set_is_valid_and_ordered() {
        let set = ColumnSet::standard().unwrap();
        let keys: Vec<_> = set.columns().iter().map(|c| c.descriptor.key).collect();
        assert_eq!(keys, ColumnKey::ALL.to_vec());
        assert!(!set.is_sortable(ColumnKey::Actions));
        assert!(set.is_sortable(ColumnKey::Project));
    }

    #[test]
    fn missing_renderer_is_rejected() {
        let renderers = &STANDARD_RENDERERS[..6];
        let err = ColumnSet::new(standard_descriptors(), renderers).unwrap_err();
        assert_eq!(err, ConfigError::MissingRenderer(ColumnKey::Actions));
    }

    #[test]
    fn renderer_for_unknown_column_is_rejected() {
        let descriptors: Vec<_> = standard_descriptors()
            .into_iter()
            .filter(|d| d.key != ColumnKey::Location)
            .collect();
        let err = ColumnSet::new(descriptors, &STANDARD_RENDERERS).unwrap_err();
        assert_eq!(err, ConfigError::UnknownRenderer(ColumnKey::Location));
    }

    #[test]
    fn duplicate_descriptor_is_rejected() {
        let mut descriptors = standard_descriptors();
        descriptors.push(ColumnDescriptor { name: "ID AGAIN", key: ColumnKey::Id, sortable: true });
        let err = ColumnSet::new(descriptors, &STANDARD_RENDERERS).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateColumn(ColumnKey::Id));
    }

    #[test]
    fn toggling_a_column_removes_and_restores_exactly_that_column() {
        let set = ColumnSet::standard().unwrap();
        let entry = &mock_entries()[0];
        let mut visible = default_visible();
        let headers_before: Vec<_> = set.header_columns(&visible).iter().map(|c| c.descriptor.key).collect();
        let cells_before = set.render_row(entry, &visible);

        visible.remove(&ColumnKey::Project);
        let headers_without: Vec<_> = set.header_columns(&visible).iter().map(|c| c.descriptor.key).collect();
        let cells_without = set.render_row(entry, &visible);
        assert_eq!(headers_without.len(), headers_before.len() - 1);
        assert!(!headers_without.contains(&ColumnKey::Project));
        assert!(!cells_without.contains(&CellContent::Text(entry.project.clone())));

        visible.insert(ColumnKey::Project);
        let headers_after: Vec<_> = set.header_columns(&visible).iter().map(|c| c.descriptor.key).collect();
        assert_eq!(headers_after, headers_before);
        assert_eq!(set.render_row(entry, &visible), cells_before);
    }

    #[test]
    fn column_keys_parse_from_uid_or_snake_case() {
        assert_eq!("startTime".parse::<ColumnKey>(), Ok(ColumnKey::StartTime));
        assert_eq!("start_time".parse::<ColumnKey>(), Ok(ColumnKey::StartTime));
        assert!("duration".parse::<ColumnKey>().is_err());
    }
}
