//! DataTable - Generic Tabular Browsing Engine
//!
//! Turns an in-memory collection of records and a column schema into a
//! searched, filtered, sorted, paginated and selectable view. Every stage is a
//! pure function over its inputs; the caller owns the view state and the whole
//! pipeline is recomputed from the raw records on each change.

pub mod column;
pub mod record;
pub mod identity;
pub mod query;
pub mod sort;
pub mod pagination;
pub mod selection;
pub mod table;
pub mod error;

pub use column::{Align, ColumnSchema, ColumnValue, Formatter};
pub use record::{Record, Row};
pub use identity::{resolve_identity, RowIdFn, ID_FIELD};
pub use query::{
    apply_filters, apply_search, is_active_filter, run_query, FilterChoice, FilterMap, FilterOption,
    ALL_FILTER_VALUE,
};
pub use sort::{apply_sort, compare_values, toggle_sort, SortDirection, SortState};
pub use pagination::{paginate, total_pages, Page, PaginationState, DEFAULT_PAGE_SIZE};
pub use selection::{
    materialize_selected, selection_state, toggle_select_all_visible, toggle_select_single,
    SelectionSet, SelectionState,
};
pub use table::{DataTable, TableConfig, TableState, TableView, ViewRow, DEFAULT_EMPTY_MESSAGE};
pub use error::TableError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn scored_rows(count: i32) -> Vec<Row> {
        (1..=count)
            .map(|i| {
                let mut row = Row::new();
                row.insert("id".to_string(), ColumnValue::Int32(i));
                row.insert("score".to_string(), ColumnValue::Int32((i * 37) % 100));
                row
            })
            .collect()
    }

    fn named(names: &[&str]) -> Vec<Row> {
        names
            .iter()
            .map(|name| {
                let mut row = Row::new();
                row.insert("name".to_string(), ColumnValue::from(*name));
                row
            })
            .collect()
    }

    #[test]
    fn test_pages_of_twenty_five_rows() {
        let rows = scored_rows(25);
        let all: Vec<&Row> = rows.iter().collect();

        let first = paginate(&all, &PaginationState::new(10));
        let ids: Vec<String> = first.rows.iter().map(|r| resolve_identity(*r)).collect();
        assert_eq!(ids, (1..=10).map(|i| i.to_string()).collect::<Vec<_>>());

        let clamped = paginate(&all, &PaginationState::new(10).with_page(4));
        assert_eq!(clamped.current_page, 3);
        let ids: Vec<String> = clamped.rows.iter().map(|r| resolve_identity(*r)).collect();
        assert_eq!(ids, vec!["21", "22", "23", "24", "25"]);
    }

    #[test]
    fn test_search_names() {
        let rows = named(&["Anna", "Bob", "Fran"]);
        let found = apply_search(&rows, Some("name"), "an");
        assert_eq!(found, vec![&rows[0], &rows[2]]);
    }

    #[test]
    fn test_sort_toggle_sequence() {
        let state = toggle_sort(&SortState::none(), "score");
        assert_eq!(state.key(), Some("score"));
        assert_eq!(state.direction(), SortDirection::Ascending);

        let state = toggle_sort(&state, "score");
        assert_eq!(state.direction(), SortDirection::Descending);

        let state = toggle_sort(&state, "score");
        assert_eq!(state.key(), None);
        assert_eq!(state.direction(), SortDirection::None);
    }

    #[test]
    fn test_select_all_never_narrows_to_page() {
        let ids = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<String>>();

        let selection = toggle_select_all_visible(&SelectionSet::new(), &ids(&["1", "2", "3"]));
        assert_eq!(selection.len(), 3);

        // After filtering only one of them is visible
        let selection = toggle_select_all_visible(&selection, &ids(&["2"]));
        assert_eq!(selection.len(), 3);
        assert!(["1", "2", "3"].iter().all(|id| selection.contains(id)));
    }

    #[test]
    fn test_null_scores_sort_last() {
        let mut rows = Vec::new();
        for score in [Some(5), None, Some(3)] {
            let mut row = Row::new();
            row.insert("score".to_string(), ColumnValue::from(score));
            rows.push(row);
        }

        let asc = apply_sort(&rows, &SortState::ascending("score"));
        let scores: Vec<ColumnValue> = asc.iter().map(|r| r.field("score")).collect();
        assert_eq!(scores, vec![ColumnValue::Int32(3), ColumnValue::Int32(5), ColumnValue::Null]);

        let desc = apply_sort(&rows, &SortState::descending("score"));
        let scores: Vec<ColumnValue> = desc.iter().map(|r| r.field("score")).collect();
        assert_eq!(scores, vec![ColumnValue::Int32(5), ColumnValue::Int32(3), ColumnValue::Null]);
    }

    #[test]
    fn test_full_pipeline_coverage() {
        let rows = scored_rows(47);
        let mut filters = FilterMap::new();
        filters.insert("score".to_string(), ALL_FILTER_VALUE.to_string());

        let queried = run_query(&rows, None, "", &filters);
        let sorted = apply_sort(queried, &SortState::descending("score"));
        assert!(sorted.windows(2).all(|w| w[0].field("score").natural_cmp(&w[1].field("score")).is_ge()));

        let pages = total_pages(sorted.len(), 6);
        let joined: Vec<&Row> = (1..=pages)
            .flat_map(|p| paginate(&sorted, &PaginationState::new(6).with_page(p)).rows)
            .collect();
        assert_eq!(joined, sorted);
    }

    #[test]
    fn test_selection_materializes_full_records() {
        let columns = vec![ColumnSchema::new("id", "ID"), ColumnSchema::new("score", "Score").sortable()];
        let config = TableConfig {
            pagination: true,
            page_size: 5,
            selectable: true,
            ..TableConfig::default()
        };
        let table = DataTable::new(columns, config).unwrap();
        let rows = scored_rows(12);
        let mut state = table.initial_state();

        table.click_header(&mut state, "score");
        let view = table.view(&rows, &state);
        let lowest = view.rows[0].record;

        let selected = table.toggle_row(&rows, &mut state, lowest);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0], lowest);
        assert_eq!(selected[0].field("score"), lowest.field("score"));
    }
}
