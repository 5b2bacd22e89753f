//! Sort stage: at most one active sort column with a three-state header toggle.

use crate::column::ColumnValue;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first)
    #[serde(rename = "asc")]
    Ascending,
    /// Descending order (largest first)
    #[serde(rename = "desc")]
    Descending,
    /// Collection order
    #[default]
    None,
}

/// The active sort column and its direction.
///
/// A key is present exactly when the direction is not `None`; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawSortState")]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

#[derive(Deserialize)]
struct RawSortState {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    direction: SortDirection,
}

impl From<RawSortState> for SortState {
    fn from(raw: RawSortState) -> Self {
        match (raw.key, raw.direction) {
            (Some(key), SortDirection::Ascending) => SortState::ascending(key),
            (Some(key), SortDirection::Descending) => SortState::descending(key),
            _ => SortState::none(),
        }
    }
}

impl SortState {
    /// No sorting; collection order is kept.
    pub fn none() -> Self {
        SortState::default()
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        SortState {
            key: Some(key.into()),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        SortState {
            key: Some(key.into()),
            direction: SortDirection::Descending,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.direction != SortDirection::None
    }

    /// Direction shown on the header of `key`.
    pub fn direction_for(&self, key: &str) -> SortDirection {
        if self.key() == Some(key) {
            self.direction
        } else {
            SortDirection::None
        }
    }
}

/// Advance the header toggle after a click on `clicked_key`.
///
/// Same column: none → ascending → descending → none. Another column starts
/// over at ascending; the previous column's state is dropped.
///
/// # Examples
///
/// ```
/// use datatable::{toggle_sort, SortState};
///
/// let state = toggle_sort(&SortState::none(), "score");
/// assert_eq!(state, SortState::ascending("score"));
/// let state = toggle_sort(&state, "score");
/// assert_eq!(state, SortState::descending("score"));
/// let state = toggle_sort(&state, "score");
/// assert_eq!(state, SortState::none());
/// ```
pub fn toggle_sort(current: &SortState, clicked_key: &str) -> SortState {
    if current.key() != Some(clicked_key) {
        return SortState::ascending(clicked_key);
    }

    match current.direction {
        SortDirection::Ascending => SortState::descending(clicked_key),
        SortDirection::Descending | SortDirection::None => SortState::none(),
    }
}

/// Compare two cell values for the given direction.
///
/// Equal values, including two nulls, compare equal. A null always sorts after
/// a non-null value, whatever the direction.
pub fn compare_values(a: &ColumnValue, b: &ColumnValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let base_cmp = a.natural_cmp(b);

    match direction {
        SortDirection::Ascending => base_cmp,
        SortDirection::Descending => base_cmp.reverse(),
        SortDirection::None => Ordering::Equal,
    }
}

/// Order records by the active sort column.
///
/// The sort is stable: records with equal keys keep their relative order in
/// both directions. An inactive state returns the input order.
pub fn apply_sort<'a, R, I>(records: I, state: &SortState) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let key = match (state.key(), state.direction) {
        (Some(key), direction) if direction != SortDirection::None => key,
        _ => return records.into_iter().collect(),
    };

    // Read each key once rather than on every comparison
    let mut keyed: Vec<(ColumnValue, &R)> = records.into_iter().map(|r| (r.field(key), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_values(a, b, state.direction));

    log::trace!("sorted {} records by '{}' {:?}", keyed.len(), key, state.direction);
    keyed.into_iter().map(|(_, r)| r).collect()
}
