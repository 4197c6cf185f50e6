//! The time-sheet page: entries, table state and derived views in one owner.
use std::fmt;

use tracing::debug;

use crate::columns::{CellContent, ColumnDef, ColumnSet};
use crate::data::EntryStore;
use crate::error::EntryError;
use crate::pipeline::{PageView, TotalDuration, ViewPipeline, clamp_page, page_count};
use crate::types::{EntryDraft, EntryId, TimeEntry};
use crate::view::{RowSelection, ViewAction, ViewState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSummary {
    All,
    Partial { selected: usize, on_page: usize },
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSummary::All => write!(f, "All entries selected"),
            SelectionSummary::Partial { selected, on_page } => {
                write!(f, "{selected} of {on_page} selected")
            }
        }
    }
}

#[derive(Debug)]
pub struct TimeSheet {
    store: EntryStore,
    columns: ColumnSet,
    view: ViewState,
    pipeline: ViewPipeline,
}

impl TimeSheet {
    pub fn new(store: EntryStore, columns: ColumnSet, view: ViewState) -> Self {
        let mut sheet = Self {
            store,
            columns,
            view,
            pipeline: ViewPipeline::default(),
        };
        sheet.clamp_page();
        sheet
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Applies one state transition and keeps the page in range.
    pub fn dispatch(&mut self, action: ViewAction) -> bool {
        debug!(?action, "dispatch");
        match action {
            ViewAction::SortByColumn(column) if !self.columns.is_sortable(column) => {
                debug!(%column, "header click on unsortable column ignored");
                return false;
            }
            ViewAction::ToggleRowSelected(_) if self.view.selection == RowSelection::All => {
                let keys = self.page_view().rows.iter().map(|entry| entry.id).collect();
                self.view.selection = RowSelection::Keys(keys);
            }
            _ => {}
        }
        let changed = self.view.apply(action);
        let clamped = self.clamp_page();
        changed || clamped
    }

    fn clamp_page(&mut self) -> bool {
        let filtered = self.pipeline.filtered(&self.store, &self.view).len();
        let page = clamp_page(self.view.page, page_count(filtered, self.view.rows_per_page));
        if page == self.view.page {
            return false;
        }
        self.view.page = page;
        true
    }

    pub fn page_view(&mut self) -> PageView {
        self.pipeline.page_view(&self.store, &self.view)
    }

    pub fn filtered_count(&mut self) -> usize {
        self.pipeline.filtered(&self.store, &self.view).len()
    }

    pub fn total_entries(&self) -> usize {
        self.store.len()
    }

    pub fn total_duration(&mut self) -> TotalDuration {
        self.pipeline.total_duration(&self.store).clone()
    }

    pub fn header_columns(&self) -> Vec<&ColumnDef> {
        self.columns.header_columns(&self.view.visible_columns)
    }

    pub fn render_row(&self, entry: &TimeEntry) -> Vec<CellContent> {
        self.columns.render_row(entry, &self.view.visible_columns)
    }

    pub fn selection_summary(&mut self) -> SelectionSummary {
        match &self.view.selection {
            RowSelection::All => SelectionSummary::All,
            RowSelection::Keys(keys) => {
                let selected = keys.len();
                let on_page = self.page_view().rows.len();
                SelectionSummary::Partial { selected, on_page }
            }
        }
    }

    pub fn add_entry(&mut self, draft: EntryDraft) -> Result<EntryId, EntryError> {
        let id = self.store.add(draft)?;
        self.clamp_page();
        Ok(id)
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Option<TimeEntry> {
        let removed = self.store.remove(id)?;
        if let RowSelection::Keys(keys) = &mut self.view.selection {
            keys.remove(&id);
        }
        self.clamp_page();
        Some(removed)
    }

    /// Computation counters of the filtered, sorted and total caches.
    #[cfg(test)]
    pub fn cache_computations(&self) -> (usize, usize, usize) {
        self.pipeline.computations()
    }
}
