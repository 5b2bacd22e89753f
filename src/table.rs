//! DataTable: column schema, configuration and the full browsing pipeline.
//!
//! A `DataTable` holds no view state. The screen that shows the table owns a
//! `TableState` (search text, filters, sort, page, selection) and passes it in
//! on every call; `view` recomputes search → filters → sort → page from the
//! raw records each time.
//!
//! # Examples
//!
//! ```
//! use datatable::{ColumnSchema, DataTable, TableConfig};
//! use serde_json::{json, Value};
//!
//! let columns = vec![
//!     ColumnSchema::new("name", "Name").sortable(),
//!     ColumnSchema::new("score", "Score").sortable(),
//! ];
//! let config = TableConfig {
//!     searchable: true,
//!     search_key: Some("name".to_string()),
//!     pagination: true,
//!     page_size: 2,
//!     ..TableConfig::default()
//! };
//! let table: DataTable<Value> = DataTable::new(columns, config).unwrap();
//!
//! let players = vec![
//!     json!({"id": 1, "name": "Anna", "score": 12}),
//!     json!({"id": 2, "name": "Bob", "score": 30}),
//!     json!({"id": 3, "name": "Fran", "score": 7}),
//! ];
//!
//! let mut state = table.initial_state();
//! table.set_search(&mut state, "an");
//! table.click_header(&mut state, "score");
//!
//! let view = table.view(&players, &state);
//! assert_eq!(view.filtered_count, 2);
//! assert_eq!(view.visible_ids(), vec!["3", "1"]);
//! ```

use crate::column::ColumnSchema;
use crate::error::TableError;
use crate::identity::{resolve_identity, RowIdFn};
use crate::pagination::{paginate, total_pages, Page, PaginationState, DEFAULT_PAGE_SIZE};
use crate::query::{run_query, FilterMap, FilterOption};
use crate::record::Record;
use crate::selection::{
    materialize_selected, selection_state, toggle_select_all_visible, toggle_select_single,
    SelectionSet, SelectionState,
};
use crate::sort::{apply_sort, toggle_sort, SortState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder shown when no rows remain.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Options fixed when a table is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    pub searchable: bool,
    pub search_key: Option<String>,
    pub filter_options: Vec<FilterOption>,
    pub pagination: bool,
    pub page_size: usize,
    pub selectable: bool,
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            searchable: false,
            search_key: None,
            filter_options: Vec::new(),
            pagination: false,
            page_size: DEFAULT_PAGE_SIZE,
            selectable: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl TableConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    ///
    /// ```
    /// use datatable::TableConfig;
    ///
    /// let config = TableConfig::from_json(r#"{"pagination": true, "pageSize": 25}"#).unwrap();
    /// assert!(config.pagination);
    /// assert_eq!(config.page_size, 25);
    /// assert!(!config.searchable);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the configuration against the keys of the column schema.
    pub fn validate(&self, column_keys: &[&str]) -> Result<(), TableError> {
        if self.page_size == 0 {
            return Err(TableError::InvalidPageSize(self.page_size));
        }

        if self.searchable {
            if let Some(key) = &self.search_key {
                if !column_keys.contains(&key.as_str()) {
                    return Err(TableError::UnknownSearchKey(key.clone()));
                }
            }
        }

        for option in &self.filter_options {
            if !column_keys.contains(&option.key.as_str()) {
                return Err(TableError::UnknownFilterKey(option.key.clone()));
            }
        }

        Ok(())
    }
}

/// View parameters owned by the screen displaying a table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableState {
    search: String,
    filters: FilterMap,
    sort: SortState,
    pagination: PaginationState,
    selection: SelectionSet,
}

impl TableState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }
}

/// One visible row with its identity and selection flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<'a, R> {
    pub id: String,
    pub record: &'a R,
    pub selected: bool,
}

/// The derived view for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, R> {
    pub rows: Vec<ViewRow<'a, R>>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Rows left after search and filters
    pub filtered_count: usize,
    /// Rows in the raw collection
    pub total_count: usize,
    /// 1-based range of the visible rows, `(0, 0)` when empty
    pub range: (usize, usize),
    pub selection_state: SelectionState,
    pub empty_message: String,
}

impl<'a, R> TableView<'a, R> {
    /// True when nothing survived search and filters; render `empty_message`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id.as_str()).collect()
    }

    pub fn records(&self) -> Vec<&'a R> {
        self.rows.iter().map(|row| row.record).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// A table definition: columns, configuration and row identity.
pub struct DataTable<R> {
    columns: Vec<ColumnSchema<R>>,
    config: TableConfig,
    row_id: Option<RowIdFn<R>>,
}

impl<R: Record> DataTable<R> {
    /// Create a table, rejecting configurations that contradict the columns.
    pub fn new(columns: Vec<ColumnSchema<R>>, config: TableConfig) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key()) {
                return Err(TableError::DuplicateColumn(column.key().to_string()));
            }
        }

        let keys: Vec<&str> = columns.iter().map(|c| c.key()).collect();
        config.validate(&keys)?;

        log::debug!(
            "created table with {} columns (search: {:?}, pagination: {}, selectable: {})",
            columns.len(),
            config.search_key,
            config.pagination,
            config.selectable
        );

        Ok(DataTable {
            columns,
            config,
            row_id: None,
        })
    }

    /// Replace the default identity resolver.
    pub fn with_row_id<F>(mut self, row_id: F) -> Self
    where
        F: Fn(&R) -> String + 'static,
    {
        self.row_id = Some(Box::new(row_id));
        self
    }

    pub fn columns(&self) -> &[ColumnSchema<R>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&ColumnSchema<R>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Fresh state: no search, no filters, no sort, first page, no selection.
    pub fn initial_state(&self) -> TableState {
        TableState {
            pagination: PaginationState::new(self.config.page_size),
            ..TableState::default()
        }
    }

    /// Identity of a record under this table's resolver.
    pub fn row_id(&self, record: &R) -> String {
        match &self.row_id {
            Some(resolve) => resolve(record),
            None => resolve_identity(record),
        }
    }

    /// Display text of every column for one record, in column order.
    pub fn cell_text(&self, record: &R) -> Vec<String> {
        self.columns.iter().map(|c| c.display(record)).collect()
    }

    fn search_key(&self) -> Option<&str> {
        if self.config.searchable {
            self.config.search_key.as_deref()
        } else {
            None
        }
    }

    /// Search and filter, then sort.
    fn ordered_rows<'a>(&self, records: &'a [R], state: &TableState) -> Vec<&'a R> {
        let queried = run_query(records, self.search_key(), &state.search, &state.filters);
        apply_sort(queried, &state.sort)
    }

    fn page_of<'a>(&self, rows: &[&'a R], state: &TableState) -> Page<'a, R> {
        if self.config.pagination {
            paginate(rows, &state.pagination)
        } else {
            Page::unpaginated(rows)
        }
    }

    fn visible_ids(&self, records: &[R], state: &TableState) -> Vec<String> {
        let rows = self.ordered_rows(records, state);
        self.page_of(&rows, state)
            .rows
            .into_iter()
            .map(|r| self.row_id(r))
            .collect()
    }

    /// Run the full pipeline over `records`.
    pub fn view<'a>(&self, records: &'a [R], state: &TableState) -> TableView<'a, R> {
        let rows = self.ordered_rows(records, state);
        let page = self.page_of(&rows, state);
        let range = (page.start_index(), page.end_index());

        let view_rows: Vec<ViewRow<'a, R>> = page
            .rows
            .iter()
            .map(|&record| {
                let id = self.row_id(record);
                let selected = self.config.selectable && state.selection.contains(&id);
                ViewRow { id, record, selected }
            })
            .collect();

        let selection_state = if self.config.selectable {
            let ids: Vec<&str> = view_rows.iter().map(|r| r.id.as_str()).collect();
            selection_state(&state.selection, &ids)
        } else {
            SelectionState::None
        };

        log::trace!(
            "view: {} of {} rows match, page {}/{} shows {}",
            rows.len(),
            records.len(),
            page.current_page,
            page.total_pages,
            view_rows.len()
        );

        TableView {
            rows: view_rows,
            current_page: page.current_page,
            total_pages: page.total_pages,
            page_size: page.page_size,
            filtered_count: rows.len(),
            total_count: records.len(),
            range,
            selection_state,
            empty_message: self.config.empty_message.clone(),
        }
    }

    /// Change the search text. A change returns to the first page.
    pub fn set_search(&self, state: &mut TableState, query: &str) {
        if state.search == query {
            return;
        }
        log::debug!("search changed to '{}'", query);
        state.search = query.to_string();
        state.pagination.current_page = 1;
    }

    /// Set one column filter. A change returns to the first page.
    pub fn set_filter(&self, state: &mut TableState, key: &str, value: &str) {
        if state.filters.get(key).map(String::as_str) == Some(value) {
            return;
        }
        log::debug!("filter '{}' changed to '{}'", key, value);
        state.filters.insert(key.to_string(), value.to_string());
        state.pagination.current_page = 1;
    }

    /// Drop every column filter. A change returns to the first page.
    pub fn clear_filters(&self, state: &mut TableState) {
        if state.filters.is_empty() {
            return;
        }
        state.filters.clear();
        state.pagination.current_page = 1;
    }

    /// Header click: advance the sort cycle for sortable columns.
    ///
    /// Clicks on unknown or non-sortable columns are ignored. The page is not
    /// reset; the next view clamps it.
    pub fn click_header(&self, state: &mut TableState, key: &str) {
        match self.column(key) {
            Some(column) if column.is_sortable() => {
                state.sort = toggle_sort(&state.sort, key);
                log::debug!("sort is now {:?}", state.sort);
            }
            _ => log::debug!("ignoring header click on non-sortable column '{}'", key),
        }
    }

    /// Go to `page`, clamped to the pages of the current query.
    pub fn set_page(&self, records: &[R], state: &mut TableState, page: usize) {
        let count = self.ordered_rows(records, state).len();
        let last = total_pages(count, state.pagination.page_size);
        state.pagination.current_page = page.clamp(1, last);
    }

    /// Change the page size. The current page is kept and clamped on view.
    pub fn set_page_size(&self, state: &mut TableState, page_size: usize) {
        if page_size == 0 {
            log::warn!("page size 0 requested, using 1");
        }
        state.pagination.page_size = page_size.max(1);
    }

    /// Flip the selection of one record and return the selected records.
    pub fn toggle_row<'a>(&self, records: &'a [R], state: &mut TableState, record: &R) -> Vec<&'a R> {
        if !self.config.selectable {
            log::debug!("ignoring row toggle on a non-selectable table");
            return Vec::new();
        }
        let id = self.row_id(record);
        state.selection = toggle_select_single(&state.selection, &id);
        self.selected_records(records, state)
    }

    /// Header checkbox: select-all over the visible page, or clear.
    pub fn toggle_all_visible<'a>(&self, records: &'a [R], state: &mut TableState) -> Vec<&'a R> {
        if !self.config.selectable {
            log::debug!("ignoring select-all on a non-selectable table");
            return Vec::new();
        }
        let visible = self.visible_ids(records, state);
        state.selection = toggle_select_all_visible(&state.selection, &visible);
        self.selected_records(records, state)
    }

    /// Selected records of the full collection, ignoring search and filters.
    pub fn selected_records<'a>(&self, records: &'a [R], state: &TableState) -> Vec<&'a R> {
        materialize_selected(records, &state.selection, |r| self.row_id(r))
    }

    pub fn clear_selection(&self, state: &mut TableState) {
        state.selection.clear();
    }
}
