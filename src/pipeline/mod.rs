//! Filter, sort, paginate and aggregate stages over time entries, plus the
//! caches that keep derived views until one of their inputs changes.
//!
//! Order of stages: filter, then sort, then paginate. Sorting runs on the
//! whole filtered result so that pages are carved from sorted order.

mod aggregate;
mod filter;
mod memo;
mod paginate;
mod sort;

pub use aggregate::TotalDuration;
pub use filter::ActivityFilter;
pub use paginate::{DEFAULT_ROWS_PER_PAGE, clamp_page, next_rows_option, page_count};
pub use sort::{SortDescriptor, SortDirection};

use aggregate::total_duration;
use filter::filter_entries;
use memo::Memo;
use paginate::page_slice;
use sort::sort_entries;

use crate::data::EntryStore;
use crate::types::TimeEntry;
use crate::view::ViewState;

/// What the table needs to draw one page and its pagination controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<TimeEntry>,
    pub page: usize,
    pub page_count: usize,
    /// Number of entries that passed the filter.
    pub total_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct FilterKey {
    revision: u64,
    search_text: String,
    activity: ActivityFilter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SortKey {
    filter: FilterKey,
    sort: SortDescriptor,
}

#[derive(Debug)]
pub struct ViewPipeline {
    filtered: Memo<FilterKey, Vec<TimeEntry>>,
    sorted: Memo<SortKey, Vec<TimeEntry>>,
    total: Memo<u64, TotalDuration>,
}

impl Default for ViewPipeline {
    fn default() -> Self {
        Self {
            filtered: Memo::new("filtered"),
            sorted: Memo::new("sorted"),
            total: Memo::new("total_duration"),
        }
    }
}

impl ViewPipeline {
    fn filter_key(store: &EntryStore, view: &ViewState) -> FilterKey {
        FilterKey {
            revision: store.revision(),
            search_text: view.search_text.clone(),
            activity: view.activity_filter.clone(),
        }
    }

    pub fn filtered(&mut self, store: &EntryStore, view: &ViewState) -> &[TimeEntry] {
        let key = Self::filter_key(store, view);
        self.filtered.get_or_compute(key, || {
            filter_entries(store.entries(), &view.search_text, &view.activity_filter)
        })
    }

    /// The filtered entries in sort order.
    pub fn sorted(&mut self, store: &EntryStore, view: &ViewState) -> &[TimeEntry] {
        let filter = Self::filter_key(store, view);
        let key = SortKey {
            filter: filter.clone(),
            sort: view.sort,
        };
        let filtered = self.filtered.get_or_compute(filter, || {
            filter_entries(store.entries(), &view.search_text, &view.activity_filter)
        });
        self.sorted
            .get_or_compute(key, || sort_entries(filtered, view.sort))
    }

    pub fn page_view(&mut self, store: &EntryStore, view: &ViewState) -> PageView {
        let sorted = self.sorted(store, view);
        PageView {
            rows: page_slice(sorted, view.page, view.rows_per_page).to_vec(),
            page: view.page,
            page_count: page_count(sorted.len(), view.rows_per_page),
            total_count: sorted.len(),
        }
    }

    /// Grand total over the whole store, independent of the active filter.
    pub fn total_duration(&mut self, store: &EntryStore) -> &TotalDuration {
        self.total
            .get_or_compute(store.revision(), || total_duration(store.entries()))
    }

    /// How many times each cache has been rebuilt: (filtered, sorted, total).
    #[cfg(test)]
    pub fn computations(&self) -> (usize, usize, usize) {
        (
            self.filtered.computations(),
            self.sorted.computations(),
            self.total.computations(),
        )
    }
}
