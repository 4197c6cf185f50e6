use thiserror::Error;

use crate::columns::ColumnKey;
use crate::types::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time '{0}', expected HH:MM")]
pub struct TimeParseError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: String, end: String },
    #[error("project must not be empty")]
    EmptyProject,
    #[error("duplicate entry id {0}")]
    DuplicateId(EntryId),
    #[error("no entry id left above {0}")]
    IdsExhausted(EntryId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rows_per_page must be at least 1")]
    InvalidRowsPerPage,
    #[error("at least one column must be visible")]
    NoVisibleColumns,
    #[error("column '{0}' is not sortable")]
    NotSortable(ColumnKey),
    #[error("invalid color '{value}' for {activity}, expected #RRGGBB")]
    InvalidColor { activity: String, value: String },
    #[error("column '{0}' is configured more than once")]
    DuplicateColumn(ColumnKey),
    #[error("column '{0}' has no cell renderer")]
    MissingRenderer(ColumnKey),
    #[error("renderer registered for unknown column '{0}'")]
    UnknownRenderer(ColumnKey),
}
