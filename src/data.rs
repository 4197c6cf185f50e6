/// Entry sources: built-in mock data, TOML entries files and the in-memory store.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::error::EntryError;
use crate::types::{ActivityType, ClockTime, EntryDraft, EntryId, TimeEntry};

/// Project names offered by the new-entry form.
pub const PROJECT_OPTIONS: [&str; 2] = ["Finance", "Unity"];

/// Holds the active entry collection. Every mutation bumps `revision`,
/// which derived views use as part of their cache key.
#[derive(Clone, Debug, Default)]
pub struct EntryStore {
    entries: Vec<TimeEntry>,
    revision: u64,
}

impl EntryStore {
    pub fn new(entries: Vec<TimeEntry>) -> Result<Self, EntryError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(EntryError::DuplicateId(entry.id));
            }
        }
        Ok(Self { entries, revision: 0 })
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: EntryId) -> Option<&TimeEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn next_id(&self) -> Result<EntryId, EntryError> {
        let max = self.entries.iter().map(|entry| entry.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(EntryError::IdsExhausted(max))
    }

    /// Validates the draft and appends it with a freshly assigned id.
    pub fn add(&mut self, draft: EntryDraft) -> Result<EntryId, EntryError> {
        if draft.end_time <= draft.start_time {
            return Err(EntryError::EndNotAfterStart {
                start: draft.start_time.to_string(),
                end: draft.end_time.to_string(),
            });
        }
        let project = draft.project.trim().to_string();
        if project.is_empty() {
            return Err(EntryError::EmptyProject);
        }
        let id = self.next_id()?;
        self.entries.push(TimeEntry {
            id,
            start_time: draft.start_time,
            end_time: draft.end_time,
            activity_type: draft.activity_type,
            project,
            location: draft
                .location
                .map(|location| location.trim().to_string())
                .filter(|location| !location.is_empty()),
        });
        self.revision += 1;
        info!(id, "entry added");
        Ok(id)
    }

    pub fn remove(&mut self, id: EntryId) -> Option<TimeEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(index);
        self.revision += 1;
        info!(id, "entry removed");
        Some(removed)
    }
}

#[derive(Deserialize)]
struct EntriesFile {
    #[serde(default)]
    entries: Vec<TimeEntry>,
}

/// Parses a TOML document with an `[[entries]]` array.
pub fn parse_entries(raw: &str) -> Result<Vec<TimeEntry>> {
    let file: EntriesFile = toml::from_str(raw)?;
    Ok(file.entries)
}

pub fn load_entries_file(path: &Path) -> Result<EntryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries file at {}", path.display()))?;
    let entries = parse_entries(&raw)
        .with_context(|| format!("Failed to parse entries file at {}", path.display()))?;
    let store = EntryStore::new(entries)
        .with_context(|| format!("Invalid entries in {}", path.display()))?;
    info!(path = %path.display(), count = store.len(), "loaded entries file");
    Ok(store)
}

fn entry(
    id: EntryId,
    start: (u32, u32),
    end: (u32, u32),
    activity_type: ActivityType,
    project: &str,
    location: Option<&str>,
) -> Option<TimeEntry> {
    Some(TimeEntry {
        id,
        start_time: ClockTime::new(start.0, start.1)?,
        end_time: ClockTime::new(end.0, end.1)?,
        activity_type,
        project: project.to_string(),
        location: location.map(str::to_string),
    })
}

/// Sample data shown when no entries file is configured.
pub fn mock_entries() -> Vec<TimeEntry> {
    use ActivityType::*;
    [
        entry(1, (9, 0), (11, 30), Development, "Proyecto A", None),
        entry(2, (11, 45), (13, 0), Meeting, "Proyecto B", None),
        entry(3, (14, 0), (17, 30), Documentation, "Proyecto A", None),
        entry(4, (8, 15), (9, 0), Meeting, "Finance", Some("Office")),
        entry(5, (13, 30), (14, 0), Development, "Unity", Some("Remote")),
        entry(6, (17, 45), (18, 30), Documentation, "Finance", Some("Office")),
        entry(7, (10, 0), (12, 15), Development, "Unity", Some("Remote")),
    ]
    .into_iter()
    .flatten()
    .collect()
}
