use std::collections::BTreeMap;

use crossterm::event::KeyCode;
use tracing::{debug, info};

use crate::data::PROJECT_OPTIONS;
use crate::pipeline::next_rows_option;
use crate::sheet::TimeSheet;
use crate::types::{ActivityType, ClockTime, EntryDraft, EntryId};
use crate::view::{RowSelection, ViewAction};

use super::{AppEvent, AppView};

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub sheet: TimeSheet,
    pub view: AppView,
    pub activity_colors: BTreeMap<ActivityType, String>,
    /// Highlighted row within the current page.
    pub cursor: usize,
    pub search_active: bool,
    pub status: Option<String>,
    pub activity_popup: Option<PickerPopup>,
    pub column_popup: Option<PickerPopup>,
    pub new_entry_popup: Option<NewEntryPopup>,
    pub confirm_popup: Option<ConfirmPopup>,
}

/// Cursor over a fixed list of toggleable options.
#[derive(Clone, Debug, Default)]
pub struct PickerPopup {
    pub index: usize,
}

impl PickerPopup {
    fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.index == 0 {
            self.index = len - 1;
        } else {
            self.index -= 1;
        }
    }

    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewEntryField {
    Start,
    End,
    Activity,
    Project,
    Location,
}

impl NewEntryField {
    fn next(self) -> Self {
        match self {
            NewEntryField::Start => NewEntryField::End,
            NewEntryField::End => NewEntryField::Activity,
            NewEntryField::Activity => NewEntryField::Project,
            NewEntryField::Project => NewEntryField::Location,
            NewEntryField::Location => NewEntryField::Start,
        }
    }

    fn prev(self) -> Self {
        match self {
            NewEntryField::Start => NewEntryField::Location,
            NewEntryField::End => NewEntryField::Start,
            NewEntryField::Activity => NewEntryField::End,
            NewEntryField::Project => NewEntryField::Activity,
            NewEntryField::Location => NewEntryField::Project,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewEntryPopup {
    pub start: String,
    pub end: String,
    pub activity_index: usize,
    pub project_index: usize,
    pub location: String,
    pub field: NewEntryField,
    pub error: Option<String>,
}

impl Default for NewEntryPopup {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            activity_index: 0,
            project_index: 0,
            location: String::new(),
            field: NewEntryField::Start,
            error: None,
        }
    }
}

impl NewEntryPopup {
    fn text_field(&mut self) -> Option<&mut String> {
        match self.field {
            NewEntryField::Start => Some(&mut self.start),
            NewEntryField::End => Some(&mut self.end),
            NewEntryField::Location => Some(&mut self.location),
            NewEntryField::Activity | NewEntryField::Project => None,
        }
    }

    fn cycle(&mut self, forward: bool) {
        let (index, len) = match self.field {
            NewEntryField::Activity => (&mut self.activity_index, ActivityType::ALL.len()),
            NewEntryField::Project => (&mut self.project_index, PROJECT_OPTIONS.len()),
            _ => return,
        };
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    pub fn activity(&self) -> ActivityType {
        ActivityType::ALL[self.activity_index % ActivityType::ALL.len()]
    }

    pub fn project(&self) -> &'static str {
        PROJECT_OPTIONS[self.project_index % PROJECT_OPTIONS.len()]
    }

    fn to_draft(&self) -> Result<EntryDraft, String> {
        let start_time: ClockTime = self.start.parse().map_err(|e| format!("Start: {e}"))?;
        let end_time: ClockTime = self.end.parse().map_err(|e| format!("End: {e}"))?;
        let location = Some(self.location.trim().to_string()).filter(|l| !l.is_empty());
        Ok(EntryDraft {
            start_time,
            end_time,
            activity_type: self.activity(),
            project: self.project().to_string(),
            location,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ConfirmPopup {
    pub message: String,
    pub entry_id: EntryId,
}

impl App {
    pub fn new(sheet: TimeSheet, activity_colors: BTreeMap<ActivityType, String>) -> Self {
        Self {
            running: true,
            sheet,
            view: AppView::Table,
            activity_colors,
            cursor: 0,
            search_active: false,
            status: None,
            activity_popup: None,
            column_popup: None,
            new_entry_popup: None,
            confirm_popup: None,
        }
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {}
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
        self.clamp_cursor();
    }

    fn dispatch(&mut self, action: ViewAction) {
        if self.sheet.dispatch(action) {
            self.status = None;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.confirm_popup.is_some() {
            self.handle_confirm_key(key);
            return;
        }
        if self.new_entry_popup.is_some() {
            self.handle_new_entry_key(key);
            return;
        }
        if self.activity_popup.is_some() {
            self.handle_activity_key(key);
            return;
        }
        if self.column_popup.is_some() {
            self.handle_column_key(key);
            return;
        }
        if self.search_active {
            self.handle_search_key(key);
            return;
        }
        if self.view == AppView::Help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.view = AppView::Table;
            } else if key == KeyCode::Char('q') {
                self.running = false;
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.view = AppView::Help,
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Esc => self.dispatch(ViewAction::ClearSearch),
            KeyCode::Char('a') => self.activity_popup = Some(PickerPopup::default()),
            KeyCode::Char('c') => self.column_popup = Some(PickerPopup::default()),
            KeyCode::Char('r') => {
                let rows = next_rows_option(self.sheet.view().rows_per_page);
                self.dispatch(ViewAction::SetRowsPerPage(rows));
            }
            KeyCode::Left => self.dispatch(ViewAction::PrevPage),
            KeyCode::Right => self.dispatch(ViewAction::NextPage),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = self.cursor.saturating_add(1),
            KeyCode::Char(' ') => {
                if let Some(id) = self.highlighted_entry() {
                    self.dispatch(ViewAction::ToggleRowSelected(id));
                }
            }
            KeyCode::Char('*') => {
                let action = if self.sheet.view().selection == RowSelection::All {
                    ViewAction::ClearSelection
                } else {
                    ViewAction::SelectAll
                };
                self.dispatch(action);
            }
            KeyCode::Char('n') => self.new_entry_popup = Some(NewEntryPopup::default()),
            KeyCode::Char('x') => self.open_confirm_popup(),
            KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
                let position = ch as usize - '1' as usize;
                self.click_header(position);
            }
            _ => {}
        }
    }

    fn click_header(&mut self, position: usize) {
        let Some((column, sortable)) = self
            .sheet
            .header_columns()
            .get(position)
            .map(|column| (column.descriptor.key, column.descriptor.sortable))
        else {
            return;
        };
        if !sortable {
            self.status = Some(format!("Column '{column}' is not sortable"));
            return;
        }
        self.dispatch(ViewAction::SortByColumn(column));
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.search_active = false,
            KeyCode::Esc => {
                self.search_active = false;
                self.dispatch(ViewAction::ClearSearch);
            }
            KeyCode::Backspace | KeyCode::Delete => {
                let mut text = self.sheet.view().search_text.clone();
                text.pop();
                self.dispatch(ViewAction::SetSearch(text));
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                let mut text = self.sheet.view().search_text.clone();
                text.push(ch);
                self.dispatch(ViewAction::SetSearch(text));
            }
            _ => {}
        }
    }

    fn handle_activity_key(&mut self, key: KeyCode) {
        let len = ActivityType::ALL.len();
        let Some(popup) = self.activity_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc | KeyCode::Char('a') => self.activity_popup = None,
            KeyCode::Up => popup.select_prev(len),
            KeyCode::Down => popup.select_next(len),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let activity = ActivityType::ALL[popup.index % len];
                self.dispatch(ViewAction::ToggleActivity(activity));
            }
            _ => {}
        }
    }

    fn handle_column_key(&mut self, key: KeyCode) {
        let len = self.sheet.columns().columns().len();
        let Some(popup) = self.column_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc | KeyCode::Char('c') => self.column_popup = None,
            KeyCode::Up => popup.select_prev(len),
            KeyCode::Down => popup.select_next(len),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let index = popup.index;
                let key = self
                    .sheet
                    .columns()
                    .columns()
                    .get(index)
                    .map(|column| column.descriptor.key);
                if let Some(key) = key {
                    self.dispatch(ViewAction::ToggleColumn(key));
                }
            }
            _ => {}
        }
    }

    fn handle_new_entry_key(&mut self, key: KeyCode) {
        let Some(popup) = self.new_entry_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.new_entry_popup = None,
            KeyCode::Enter => self.apply_new_entry_popup(),
            KeyCode::Tab => popup.field = popup.field.next(),
            KeyCode::BackTab => popup.field = popup.field.prev(),
            KeyCode::Up => popup.cycle(false),
            KeyCode::Down => popup.cycle(true),
            KeyCode::Backspace | KeyCode::Delete => {
                if let Some(text) = popup.text_field() {
                    text.pop();
                }
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                if let Some(text) = popup.text_field() {
                    text.push(ch);
                }
            }
            _ => {}
        }
    }

    fn apply_new_entry_popup(&mut self) {
        let Some(popup) = self.new_entry_popup.as_mut() else {
            return;
        };
        let draft = match popup.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                popup.error = Some(message);
                return;
            }
        };
        match self.sheet.add_entry(draft) {
            Ok(id) => {
                self.new_entry_popup = None;
                self.status = Some(format!("Added entry {id}"));
            }
            Err(err) => {
                debug!(error = %err, "new entry rejected");
                popup.error = Some(err.to_string());
            }
        }
    }

    fn open_confirm_popup(&mut self) {
        let Some(id) = self.highlighted_entry() else {
            self.status = Some("No entry to delete".to_string());
            return;
        };
        let project = self
            .sheet
            .store()
            .get(id)
            .map(|entry| entry.project.clone())
            .unwrap_or_default();
        self.confirm_popup = Some(ConfirmPopup {
            message: format!("Delete entry {id} ({project})?"),
            entry_id: id,
        });
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(popup) = self.confirm_popup.take() {
                    if self.sheet.remove_entry(popup.entry_id).is_some() {
                        info!(id = popup.entry_id, "entry deleted from table");
                        self.status = Some(format!("Deleted entry {}", popup.entry_id));
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_popup = None;
            }
            _ => {}
        }
    }

    /// Id of the row under the cursor on the current page.
    pub fn highlighted_entry(&mut self) -> Option<EntryId> {
        self.sheet.page_view().rows.get(self.cursor).map(|entry| entry.id)
    }

    fn clamp_cursor(&mut self) {
        let rows = self.sheet.page_view().rows.len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{ColumnKey, ColumnSet};
    use crate::data::{EntryStore, mock_entries};
    use crate::pipeline::{ActivityFilter, SortDirection};
    use crate::view::ViewState;

    fn test_app() -> App {
        let sheet = TimeSheet::new(
            EntryStore::new(mock_entries()).unwrap(),
            ColumnSet::standard().unwrap(),
            ViewState::default(),
        );
        App::new(sheet, BTreeMap::new())
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.update(AppEvent::KeyPress(*key));
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.update(AppEvent::KeyPress(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn search_filters_while_typing() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "unity");
        assert_eq!(app.sheet.filtered_count(), 2);
        press(&mut app, &[KeyCode::Enter]);
        assert!(!app.search_active);
        assert_eq!(app.sheet.view().search_text, "unity");

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.sheet.view().search_text, "");
        assert_eq!(app.sheet.filtered_count(), 7);
    }

    #[test]
    fn quit_key_inside_search_is_text() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('q')]);
        assert!(app.running);
        assert_eq!(app.sheet.view().search_text, "q");
    }

    #[test]
    fn digit_clicks_visible_header() {
        let mut app = test_app();
        // Visible headers: START, END, ACTIVITY, PROJECT, ACTIONS.
        press(&mut app, &[KeyCode::Char('1')]);
        assert_eq!(app.sheet.view().sort.direction, SortDirection::Descending);
        press(&mut app, &[KeyCode::Char('4')]);
        assert_eq!(app.sheet.view().sort.column, ColumnKey::Project);
        press(&mut app, &[KeyCode::Char('5')]);
        assert_eq!(app.sheet.view().sort.column, ColumnKey::Project);
        assert!(app.status.is_some());
    }

    #[test]
    fn activity_popup_toggles_filter() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Down, KeyCode::Char(' ')]);
        assert_eq!(
            app.sheet.view().activity_filter,
            ActivityFilter::All.toggled(ActivityType::Meeting)
        );
        press(&mut app, &[KeyCode::Esc]);
        assert!(app.activity_popup.is_none());
        assert_eq!(app.sheet.filtered_count(), 5);
    }

    #[test]
    fn column_popup_toggles_visibility() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Enter]);
        assert!(app.sheet.view().visible_columns.contains(&ColumnKey::Id));
        press(&mut app, &[KeyCode::Enter, KeyCode::Esc]);
        assert!(!app.sheet.view().visible_columns.contains(&ColumnKey::Id));
    }

    #[test]
    fn rows_key_cycles_and_resets_page() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.sheet.view().page, 2);
        press(&mut app, &[KeyCode::Char('r')]);
        assert_eq!(app.sheet.view().rows_per_page, 10);
        assert_eq!(app.sheet.view().page, 1);
    }

    #[test]
    fn new_entry_is_added() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('n')]);
        type_text(&mut app, "07:00");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "07:45");
        press(&mut app, &[KeyCode::Tab, KeyCode::Down, KeyCode::Tab, KeyCode::Down, KeyCode::Tab]);
        type_text(&mut app, "Home");
        press(&mut app, &[KeyCode::Enter]);

        assert!(app.new_entry_popup.is_none());
        let entry = app.sheet.store().get(8).unwrap();
        assert_eq!(entry.activity_type, ActivityType::Meeting);
        assert_eq!(entry.project, "Unity");
        assert_eq!(entry.location.as_deref(), Some("Home"));
        assert_eq!(app.status.as_deref(), Some("Added entry 8"));
    }

    #[test]
    fn new_entry_errors_stay_in_popup() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('n')]);
        type_text(&mut app, "9am");
        press(&mut app, &[KeyCode::Enter]);
        let error = app.new_entry_popup.as_ref().and_then(|p| p.error.clone()).unwrap();
        assert!(error.starts_with("Start:"));

        let popup = app.new_entry_popup.as_mut().unwrap();
        popup.start = "10:00".into();
        popup.end = "09:00".into();
        press(&mut app, &[KeyCode::Enter]);
        let error = app.new_entry_popup.as_ref().and_then(|p| p.error.clone()).unwrap();
        assert!(error.contains("must be after"));
        assert_eq!(app.sheet.total_entries(), 7);
    }

    #[test]
    fn exhausted_ids_are_reported_in_popup() {
        let mut entries = mock_entries();
        entries[6].id = EntryId::MAX;
        let sheet = TimeSheet::new(
            EntryStore::new(entries).unwrap(),
            ColumnSet::standard().unwrap(),
            ViewState::default(),
        );
        let mut app = App::new(sheet, BTreeMap::new());
        press(&mut app, &[KeyCode::Char('n')]);
        type_text(&mut app, "07:00");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "07:45");
        press(&mut app, &[KeyCode::Enter]);
        let error = app.new_entry_popup.as_ref().and_then(|p| p.error.clone()).unwrap();
        assert!(error.starts_with("no entry id left"));
        assert_eq!(app.sheet.total_entries(), 7);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Down, KeyCode::Char('x')]);
        assert_eq!(app.confirm_popup.as_ref().map(|p| p.entry_id), Some(1));
        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.sheet.total_entries(), 7);

        press(&mut app, &[KeyCode::Char('x'), KeyCode::Char('y')]);
        assert!(app.sheet.store().get(1).is_none());
        assert_eq!(app.sheet.total_entries(), 6);
    }

    #[test]
    fn space_selects_highlighted_row() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(app.sheet.view().selection.contains(4));
        press(&mut app, &[KeyCode::Char('*')]);
        assert_eq!(app.sheet.view().selection, RowSelection::All);
        press(&mut app, &[KeyCode::Char('*')]);
        assert_eq!(app.sheet.view().selection, RowSelection::default());
    }

    #[test]
    fn space_after_select_all_unselects_highlighted_row() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('*'), KeyCode::Char(' ')]);
        let selection = &app.sheet.view().selection;
        assert!(!selection.contains(4));
        assert!(selection.contains(1));
        assert_eq!(app.sheet.selection_summary().to_string(), "4 of 5 selected");
    }

    #[test]
    fn cursor_stays_on_page() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Down; 9]);
        assert_eq!(app.cursor, 4);
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn help_view_toggles() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.view, AppView::Help);
        press(&mut app, &[KeyCode::Char('a')]);
        assert!(app.activity_popup.is_none());
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.view, AppView::Table);
    }
}
