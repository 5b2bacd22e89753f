//! Query pipeline: free-text search followed by per-column equality filters.
//!
//! Both stages are pure predicates over the collection and keep the input
//! order. A record stays in the result only if it passes the search test and
//! every active column filter.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Filter value meaning "no constraint on this column".
pub const ALL_FILTER_VALUE: &str = "all";

/// Active column filters: field key to required display value.
pub type FilterMap = BTreeMap<String, String>;

/// One selectable entry in a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChoice {
    pub value: String,
    pub label: String,
}

impl FilterChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        FilterChoice {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A filter dropdown offered for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub choices: Vec<FilterChoice>,
}

impl FilterOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>, choices: Vec<FilterChoice>) -> Self {
        FilterOption {
            key: key.into(),
            label: label.into(),
            choices,
        }
    }

    /// Build a filter option from the distinct non-empty display values of a
    /// column, in order of first appearance.
    pub fn from_collection<'a, R, I>(key: impl Into<String>, label: impl Into<String>, records: I) -> Self
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let key = key.into();
        let mut seen = HashSet::new();
        let choices = records
            .into_iter()
            .map(|record| record.field(&key).display_string())
            .filter(|value| !value.is_empty())
            .filter(|value| seen.insert(value.clone()))
            .map(|value| FilterChoice::new(value.clone(), value))
            .collect();

        FilterOption {
            key,
            label: label.into(),
            choices,
        }
    }

    /// Returns true if `value` is one of the offered choices.
    pub fn offers(&self, value: &str) -> bool {
        self.choices.iter().any(|choice| choice.value == value)
    }
}

/// Returns true if a filter value constrains its column.
pub fn is_active_filter(value: &str) -> bool {
    !value.is_empty() && value != ALL_FILTER_VALUE
}

/// Keep records whose value at `search_key` contains `query`, ignoring case.
///
/// Without a key or with an empty query the input passes through unchanged.
/// Null values never match.
///
/// # Examples
///
/// ```
/// use datatable::apply_search;
/// use serde_json::json;
///
/// let people = vec![json!({"name": "Anna"}), json!({"name": "Bob"}), json!({"name": "Fran"})];
/// let found = apply_search(&people, Some("name"), "an");
/// assert_eq!(found, vec![&people[0], &people[2]]);
/// ```
pub fn apply_search<'a, R, I>(records: I, search_key: Option<&str>, query: &str) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let key = match search_key {
        Some(key) if !query.is_empty() => key,
        _ => return records.into_iter().collect(),
    };

    let needle = query.to_lowercase();
    let result: Vec<&R> = records
        .into_iter()
        .filter(|record| {
            let value = record.field(key);
            !value.is_null() && value.display_string().to_lowercase().contains(&needle)
        })
        .collect();

    log::trace!("search '{}' on '{}' kept {} records", query, key, result.len());
    result
}

/// Keep records whose display value equals every active filter exactly.
///
/// Entries set to `"all"` or to the empty string are ignored. A null value
/// never satisfies an active filter.
pub fn apply_filters<'a, R, I>(records: I, filters: &FilterMap) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let active: Vec<(&str, &str)> = filters
        .iter()
        .filter(|(_, value)| is_active_filter(value))
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    if active.is_empty() {
        return records.into_iter().collect();
    }

    let result: Vec<&R> = records
        .into_iter()
        .filter(|record| {
            active.iter().all(|(key, expected)| {
                let value = record.field(key);
                !value.is_null() && value.display_string() == *expected
            })
        })
        .collect();

    log::trace!("{} active filters kept {} records", active.len(), result.len());
    result
}

/// Search, then column filters.
pub fn run_query<'a, R, I>(
    records: I,
    search_key: Option<&str>,
    query: &str,
    filters: &FilterMap,
) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    apply_filters(apply_search(records, search_key, query), filters)
}
