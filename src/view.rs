//! Per-session table state and the messages that change it.
use std::collections::BTreeSet;

use crate::columns::{ColumnKey, DEFAULT_VISIBLE_COLUMNS};
use crate::pipeline::{ActivityFilter, DEFAULT_ROWS_PER_PAGE, SortDescriptor};
use crate::types::{ActivityType, EntryId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowSelection {
    All,
    Keys(BTreeSet<EntryId>),
}

impl Default for RowSelection {
    fn default() -> Self {
        RowSelection::Keys(BTreeSet::new())
    }
}

impl RowSelection {
    pub fn contains(&self, id: EntryId) -> bool {
        match self {
            RowSelection::All => true,
            RowSelection::Keys(keys) => keys.contains(&id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub activity_filter: ActivityFilter,
    pub visible_columns: BTreeSet<ColumnKey>,
    pub rows_per_page: usize,
    /// 1-based.
    pub page: usize,
    pub sort: SortDescriptor,
    pub selection: RowSelection,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            activity_filter: ActivityFilter::All,
            visible_columns: DEFAULT_VISIBLE_COLUMNS.into_iter().collect(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page: 1,
            sort: SortDescriptor::default(),
            selection: RowSelection::default(),
        }
    }
}

/// Every way the table state can change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    SetSearch(String),
    ClearSearch,
    SetActivityFilter(ActivityFilter),
    ToggleActivity(ActivityType),
    SetVisibleColumns(BTreeSet<ColumnKey>),
    ToggleColumn(ColumnKey),
    SetRowsPerPage(usize),
    SetPage(usize),
    NextPage,
    PrevPage,
    SetSort(SortDescriptor),
    /// A click on a column header. Sortability is checked by the sheet,
    /// which owns the column set.
    SortByColumn(ColumnKey),
    /// Flips one key of a key selection. While everything is selected the
    /// sheet first expands `All` into the keys of the current page.
    ToggleRowSelected(EntryId),
    SelectAll,
    ClearSelection,
}

impl ViewState {
    /// Applies one action. Returns `false` when the state did not change.
    ///
    /// Page bounds depend on the filtered result, so callers clamp `page`
    /// afterwards.
    pub fn apply(&mut self, action: ViewAction) -> bool {
        let before = self.clone();
        match action {
            ViewAction::SetSearch(text) => {
                if text != self.search_text {
                    self.search_text = text;
                    self.page = 1;
                }
            }
            ViewAction::ClearSearch => {
                if !self.search_text.is_empty() {
                    self.search_text.clear();
                    self.page = 1;
                }
            }
            ViewAction::SetActivityFilter(filter) => {
                if filter != self.activity_filter {
                    self.activity_filter = filter;
                    self.page = 1;
                }
            }
            ViewAction::ToggleActivity(activity) => {
                let toggled = self.activity_filter.toggled(activity);
                if toggled != self.activity_filter {
                    self.activity_filter = toggled;
                    self.page = 1;
                }
            }
            ViewAction::SetVisibleColumns(columns) => {
                if !columns.is_empty() {
                    self.visible_columns = columns;
                }
            }
            ViewAction::ToggleColumn(column) => {
                if !self.visible_columns.remove(&column) {
                    self.visible_columns.insert(column);
                } else if self.visible_columns.is_empty() {
                    self.visible_columns.insert(column);
                }
            }
            ViewAction::SetRowsPerPage(rows) => {
                if rows >= 1 {
                    self.rows_per_page = rows;
                    self.page = 1;
                }
            }
            ViewAction::SetPage(page) => self.page = page.max(1),
            ViewAction::NextPage => self.page = self.page.saturating_add(1),
            ViewAction::PrevPage => self.page = self.page.saturating_sub(1).max(1),
            ViewAction::SetSort(sort) => self.sort = sort,
            ViewAction::SortByColumn(column) => self.sort = self.sort.clicked(column),
            ViewAction::ToggleRowSelected(id) => {
                if let RowSelection::Keys(keys) = &mut self.selection {
                    if !keys.remove(&id) {
                        keys.insert(id);
                    }
                }
            }
            ViewAction::SelectAll => self.selection = RowSelection::All,
            ViewAction::ClearSelection => self.selection = RowSelection::default(),
        }
        *self != before
    }
}
