use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::is_valid_hex;
use crate::columns::{ColumnKey, ColumnSet, DEFAULT_VISIBLE_COLUMNS};
use crate::error::ConfigError;
use crate::pipeline::{DEFAULT_ROWS_PER_PAGE, SortDescriptor};
use crate::types::ActivityType;
use crate::view::ViewState;

const APP_DIR: &str = "timesheet";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rows_per_page: usize,
    pub visible_columns: Vec<ColumnKey>,
    pub sort: SortDescriptor,
    /// TOML file with `[[entries]]`; mock data is used when unset.
    pub entries_file: Option<PathBuf>,
    /// Log destination for the TUI.
    pub log_file: Option<PathBuf>,
    pub activity_colors: BTreeMap<ActivityType, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            visible_columns: DEFAULT_VISIBLE_COLUMNS.to_vec(),
            sort: SortDescriptor::default(),
            entries_file: None,
            log_file: None,
            activity_colors: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR)
            .join("config.toml"))
    }

    pub fn default_log_path() -> Result<PathBuf> {
        Ok(dirs::data_local_dir()
            .context("Cannot determine data directory")?
            .join(APP_DIR)
            .join("timesheet.log"))
    }

    /// Load config from `path`, or from the default location. A missing
    /// file at the default location yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = Self::parse(&raw)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows_per_page == 0 {
            return Err(ConfigError::InvalidRowsPerPage);
        }
        if self.visible_columns.is_empty() {
            return Err(ConfigError::NoVisibleColumns);
        }
        let mut seen = Vec::with_capacity(self.visible_columns.len());
        for column in &self.visible_columns {
            if seen.contains(column) {
                return Err(ConfigError::DuplicateColumn(*column));
            }
            seen.push(*column);
        }
        if self.sort.column == ColumnKey::Actions {
            return Err(ConfigError::NotSortable(self.sort.column));
        }
        for (activity, value) in &self.activity_colors {
            if !is_valid_hex(value) {
                return Err(ConfigError::InvalidColor {
                    activity: activity.key().to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks the default sort against the column set actually in use.
    pub fn check_columns(&self, columns: &ColumnSet) -> Result<(), ConfigError> {
        if !columns.is_sortable(self.sort.column) {
            return Err(ConfigError::NotSortable(self.sort.column));
        }
        Ok(())
    }

    pub fn initial_view(&self) -> ViewState {
        ViewState {
            rows_per_page: self.rows_per_page.max(1),
            visible_columns: self.visible_columns.iter().copied().collect(),
            sort: self.sort,
            ..ViewState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SortDirection;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn parses_all_fields() {
        let raw = r##"
            rows_per_page = 10
            visible_columns = ["id", "project", "location"]
            entries_file = "/tmp/entries.toml"

            [sort]
            column = "project"
            direction = "descending"

            [activity_colors]
            meeting = "#FF0000"
        "##;
        let config = Config::parse(raw).unwrap();
        assert_eq!(config.rows_per_page, 10);
        assert_eq!(
            config.visible_columns,
            vec![ColumnKey::Id, ColumnKey::Project, ColumnKey::Location]
        );
        assert_eq!(config.sort.direction, SortDirection::Descending);
        assert_eq!(config.activity_colors[&ActivityType::Meeting], "#FF0000");

        let view = config.initial_view();
        assert_eq!(view.rows_per_page, 10);
        assert!(view.visible_columns.contains(&ColumnKey::Location));
        assert_eq!(view.sort.column, ColumnKey::Project);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Config::parse("rows_per_page = 0").is_err());
        assert!(Config::parse("visible_columns = []").is_err());
        assert!(Config::parse("visible_columns = [\"duration\"]").is_err());
        assert!(Config::parse("[sort]\ncolumn = \"actions\"").is_err());
        assert!(Config::parse("[activity_colors]\nmeeting = \"red\"").is_err());
    }

    #[test]
    fn validate_reports_specific_error() {
        let config = Config {
            visible_columns: vec![ColumnKey::Id, ColumnKey::Id],
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateColumn(ColumnKey::Id)));
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rows_per_page = 15\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.rows_per_page, 15);
    }

    #[test]
    fn load_fails_for_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn default_config_matches_standard_columns() {
        let columns = ColumnSet::standard().unwrap();
        assert!(Config::default().check_columns(&columns).is_ok());
    }
}
