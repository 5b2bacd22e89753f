//! Row identity resolution.
//!
//! Every record gets a string key. Page rows are keyed by it and the selection
//! set stores it, so a selection survives re-filtering and re-sorting of the
//! same records.

use crate::record::Record;

/// Field consulted by the default resolver.
pub const ID_FIELD: &str = "id";

/// Caller-supplied identity function.
pub type RowIdFn<R> = Box<dyn Fn(&R) -> String>;

/// Default identity: the `id` field when present and non-empty, otherwise the
/// record's canonical serialization.
///
/// Records without an `id` whose contents are identical resolve to the same
/// identifier and are therefore indistinguishable to the selection tracker.
///
/// # Examples
///
/// ```
/// use datatable::resolve_identity;
/// use serde_json::json;
///
/// assert_eq!(resolve_identity(&json!({"id": 42, "name": "Anna"})), "42");
/// assert_eq!(resolve_identity(&json!({"name": "Anna"})), r#"{"name":"Anna"}"#);
/// ```
pub fn resolve_identity<R: Record + ?Sized>(record: &R) -> String {
    let id = record.field(ID_FIELD).display_string();
    if id.is_empty() {
        record.canonical_string()
    } else {
        id
    }
}
