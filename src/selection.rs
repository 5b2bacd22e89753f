//! Selection tracking by row identity.
//!
//! The selection is a set of identifier strings, independent of the current
//! page, search and filters. Identifiers that no longer match any record are
//! kept but have no effect: materializing the selection intersects it with the
//! live collection.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of selected row identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        SelectionSet {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Header checkbox state for the visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// No visible row is selected
    None,
    /// Some but not all visible rows are selected
    Partial,
    /// Every visible row is selected (and the page is not empty)
    All,
}

/// Flip the membership of one identifier.
pub fn toggle_select_single(selection: &SelectionSet, id: &str) -> SelectionSet {
    let mut next = selection.clone();
    if !next.remove(id) {
        next.insert(id);
    }
    next
}

/// Toggle "select all" against the visible page.
///
/// When the selection consists of exactly the visible page it is cleared.
/// Otherwise every visible identifier is added and rows selected elsewhere
/// stay selected: select-all grows a selection, it never narrows it to the
/// page.
///
/// # Examples
///
/// ```
/// use datatable::{toggle_select_all_visible, SelectionSet};
///
/// let visible = vec!["a".to_string(), "b".to_string()];
/// let off_page: SelectionSet = ["z"].into_iter().collect();
///
/// let grown = toggle_select_all_visible(&off_page, &visible);
/// assert_eq!(grown.len(), 3);
///
/// let page_only: SelectionSet = ["a", "b"].into_iter().collect();
/// assert!(toggle_select_all_visible(&page_only, &visible).is_empty());
/// ```
pub fn toggle_select_all_visible<S: AsRef<str>>(selection: &SelectionSet, visible_ids: &[S]) -> SelectionSet {
    let page_selected = visible_ids.iter().all(|id| selection.contains(id.as_ref()));
    let visible_count = visible_ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<BTreeSet<&str>>()
        .len();

    if page_selected && selection.len() == visible_count {
        log::debug!("select-all cleared {} selected rows", selection.len());
        return SelectionSet::new();
    }

    let mut next = selection.clone();
    for id in visible_ids {
        next.insert(id.as_ref());
    }
    next
}

/// Checkbox state of the visible page for the header.
pub fn selection_state<S: AsRef<str>>(selection: &SelectionSet, visible_ids: &[S]) -> SelectionState {
    let selected = visible_ids.iter().filter(|id| selection.contains(id.as_ref())).count();

    if selected == 0 {
        SelectionState::None
    } else if selected == visible_ids.len() {
        SelectionState::All
    } else {
        SelectionState::Partial
    }
}

/// Records of the full collection whose identity is selected, in collection
/// order.
pub fn materialize_selected<'a, R, I, F>(records: I, selection: &SelectionSet, resolve: F) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> String,
{
    if selection.is_empty() {
        return Vec::new();
    }

    records
        .into_iter()
        .filter(|record| selection.contains(&resolve(*record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::resolve_identity;
    use serde_json::{json, Value};

    fn set(ids: &[&str]) -> SelectionSet {
        ids.iter().copied().collect()
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_single() {
        let selection = toggle_select_single(&SelectionSet::new(), "7");
        assert!(selection.contains("7"));

        let selection = toggle_select_single(&selection, "7");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_grow_full_clear_cycle() {
        let visible = strings(&["a", "b", "c"]);
        let start = set(&["b"]);

        let grown = toggle_select_all_visible(&start, &visible);
        assert_eq!(grown, set(&["a", "b", "c"]));

        let cleared = toggle_select_all_visible(&grown, &visible);
        assert!(cleared.is_empty());

        let regrown = toggle_select_all_visible(&cleared, &visible);
        assert_eq!(regrown, grown);
    }

    #[test]
    fn test_select_all_keeps_off_page_selection() {
        let visible = strings(&["d", "e"]);
        let selection = set(&["a"]);

        let grown = toggle_select_all_visible(&selection, &visible);
        assert_eq!(grown, set(&["a", "d", "e"]));

        // The page is fully selected but other rows are too: the selection
        // never shrinks to just the page.
        let again = toggle_select_all_visible(&grown, &visible);
        assert_eq!(again, grown);
    }

    #[test]
    fn test_select_all_after_filter_narrows_page() {
        // Three rows selected, then the page shrinks to one of them
        let selection = toggle_select_all_visible(&SelectionSet::new(), &strings(&["1", "2", "3"]));
        assert_eq!(selection.len(), 3);

        let after = toggle_select_all_visible(&selection, &strings(&["2"]));
        assert_eq!(after, set(&["1", "2", "3"]));

        let after = toggle_select_all_visible(&selection, &strings(&["4"]));
        assert_eq!(after, set(&["1", "2", "3", "4"]));
    }

    #[test]
    fn test_select_all_on_page_of_one_with_other_selection() {
        let after = toggle_select_all_visible(&set(&["x"]), &strings(&["y"]));
        assert_eq!(after, set(&["x", "y"]));
    }

    #[test]
    fn test_selection_state() {
        let visible = strings(&["a", "b"]);
        assert_eq!(selection_state(&set(&[]), &visible), SelectionState::None);
        assert_eq!(selection_state(&set(&["a", "z"]), &visible), SelectionState::Partial);
        assert_eq!(selection_state(&set(&["a", "b"]), &visible), SelectionState::All);
        assert_eq!(selection_state(&set(&["a"]), &Vec::<String>::new()), SelectionState::None);
    }

    #[test]
    fn test_materialize_in_collection_order() {
        let data: Vec<Value> = vec![
            json!({"id": 1, "name": "Anna"}),
            json!({"id": 2, "name": "Bob"}),
            json!({"id": 3, "name": "Fran"}),
        ];
        let selection = set(&["3", "1", "99"]);

        let selected = materialize_selected(&data, &selection, |r| resolve_identity(r));
        assert_eq!(selected, vec![&data[0], &data[2]]);
    }

    #[test]
    fn test_stale_ids_are_inert() {
        let data = vec![json!({"id": 1})];
        let selection = toggle_select_single(&SelectionSet::new(), "gone");

        assert!(selection.contains("gone"));
        assert!(materialize_selected(&data, &selection, |r| resolve_identity(r)).is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let json = serde_json::to_value(set(&["b", "a"])).unwrap();
        assert_eq!(json, json!(["a", "b"]));
    }
}
