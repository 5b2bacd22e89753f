//! Record access for the table engine.
//!
//! The engine is generic over the shape of a record. Anything that can look up
//! a field by key and produce a deterministic serialization of itself can be
//! browsed: the dynamic `Row` map, JSON objects, or caller-defined structs.

use crate::column::ColumnValue;
use serde_json::{Map, Value as JsonValue};
use std::collections::{BTreeMap, HashMap};

/// Dynamic row representation: field name to cell value.
pub type Row = HashMap<String, ColumnValue>;

/// A structured value the table can read fields from.
///
/// # Examples
///
/// ```
/// use datatable::{ColumnValue, Record};
///
/// struct Ticket {
///     id: u32,
///     subject: String,
/// }
///
/// impl Record for Ticket {
///     fn field(&self, key: &str) -> ColumnValue {
///         match key {
///             "id" => ColumnValue::Int64(self.id as i64),
///             "subject" => ColumnValue::String(self.subject.clone()),
///             _ => ColumnValue::Null,
///         }
///     }
///
///     fn canonical_string(&self) -> String {
///         format!("{{\"id\":{},\"subject\":{:?}}}", self.id, self.subject)
///     }
/// }
///
/// let ticket = Ticket { id: 7, subject: "Login fails".into() };
/// assert_eq!(ticket.field("id"), ColumnValue::Int64(7));
/// assert!(ticket.field("missing").is_null());
/// ```
pub trait Record {
    /// Returns the value stored under `key`, or `Null` when the field is absent.
    fn field(&self, key: &str) -> ColumnValue;

    /// Deterministic serialization of the whole record.
    ///
    /// Two records with equal content must produce equal strings.
    fn canonical_string(&self) -> String;
}

/// Serialize `(key, value)` pairs as a JSON object with keys in sorted order.
fn canonical_object<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a String, JsonValue)>,
{
    let sorted: BTreeMap<&String, JsonValue> = entries.into_iter().collect();
    serde_json::to_string(&sorted).unwrap_or_default()
}

impl Record for HashMap<String, ColumnValue> {
    fn field(&self, key: &str) -> ColumnValue {
        self.get(key).cloned().unwrap_or(ColumnValue::Null)
    }

    fn canonical_string(&self) -> String {
        canonical_object(self.iter().map(|(k, v)| (k, v.to_json())))
    }
}

impl Record for BTreeMap<String, ColumnValue> {
    fn field(&self, key: &str) -> ColumnValue {
        self.get(key).cloned().unwrap_or(ColumnValue::Null)
    }

    fn canonical_string(&self) -> String {
        canonical_object(self.iter().map(|(k, v)| (k, v.to_json())))
    }
}

impl Record for Map<String, JsonValue> {
    fn field(&self, key: &str) -> ColumnValue {
        self.get(key).map(ColumnValue::from_json).unwrap_or(ColumnValue::Null)
    }

    fn canonical_string(&self) -> String {
        canonical_object(self.iter().map(|(k, v)| (k, canonical_json(v))))
    }
}

/// JSON records. Non-object values have no fields.
impl Record for JsonValue {
    fn field(&self, key: &str) -> ColumnValue {
        match self {
            JsonValue::Object(map) => map.field(key),
            _ => ColumnValue::Null,
        }
    }

    fn canonical_string(&self) -> String {
        canonical_json(self).to_string()
    }
}

/// Rebuild nested objects with sorted keys, independent of serde_json's
/// `preserve_order` feature.
fn canonical_json(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let sorted: BTreeMap<&String, JsonValue> =
                map.iter().map(|(k, v)| (k, canonical_json(v))).collect();
            JsonValue::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(canonical_json).collect()),
        other => other.clone(),
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> ColumnValue {
        (**self).field(key)
    }

    fn canonical_string(&self) -> String {
        (**self).canonical_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_field_lookup() {
        let mut row = Row::new();
        row.insert("name".to_string(), ColumnValue::from("Anna"));

        assert_eq!(row.field("name"), ColumnValue::from("Anna"));
        assert_eq!(row.field("age"), ColumnValue::Null);
    }

    #[test]
    fn test_row_canonical_string_is_key_ordered() {
        let mut a = Row::new();
        a.insert("b".to_string(), ColumnValue::Int32(2));
        a.insert("a".to_string(), ColumnValue::Int32(1));

        let mut b = Row::new();
        b.insert("a".to_string(), ColumnValue::Int32(1));
        b.insert("b".to_string(), ColumnValue::Int32(2));

        assert_eq!(a.canonical_string(), r#"{"a":1,"b":2}"#);
        assert_eq!(a.canonical_string(), b.canonical_string());
    }

    #[test]
    fn test_json_record() {
        let record = json!({"status": "open", "priority": 3, "owner": null});

        assert_eq!(record.field("status"), ColumnValue::from("open"));
        assert_eq!(record.field("priority"), ColumnValue::Int32(3));
        assert!(record.field("owner").is_null());
        assert!(record.field("missing").is_null());
        assert!(json!(5).field("anything").is_null());
    }

    #[test]
    fn test_json_canonical_string_sorts_nested_keys() {
        let a = json!({"z": 1, "a": {"y": 2, "x": 1}});
        let b = json!({"a": {"x": 1, "y": 2}, "z": 1});

        assert_eq!(a.canonical_string(), r#"{"a":{"x":1,"y":2},"z":1}"#);
        assert_eq!(a.canonical_string(), b.canonical_string());
    }
}
