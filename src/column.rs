//! DataTable Column Implementation
//!
//! A column describes one displayable field of a record: the key used to read
//! the value, a header label, whether the header toggles sorting, and an
//! optional formatter that turns the raw value into display text.
//!
//! Cell values are dynamically typed through `ColumnValue` so that the query,
//! sort and pagination stages stay generic over the record shape.

use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;

/// Cell value enum to support multiple types
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnValue {
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bool(bool),
    #[default]
    Null,
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ColumnValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int32(v) => Some(*v as i64),
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Int32(v) => Some(*v as f64),
            ColumnValue::Int64(v) => Some(*v as f64),
            ColumnValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The text a cell shows when no formatter is configured.
    ///
    /// `Null` renders as the empty string.
    pub fn display_string(&self) -> String {
        match self {
            ColumnValue::Null => String::new(),
            ColumnValue::String(s) => s.clone(),
            ColumnValue::Bool(b) => b.to_string(),
            ColumnValue::Int32(n) => n.to_string(),
            ColumnValue::Int64(n) => n.to_string(),
            ColumnValue::Float64(f) => f.to_string(),
        }
    }

    /// Natural ordering between two non-null values.
    ///
    /// Integers and floats compare exactly with each other, without rounding
    /// large integers through `f64`. NaN sorts after every other number and
    /// equal to another NaN. Values of unrelated kinds fall back to a fixed
    /// kind rank so that the result is a total order.
    pub fn natural_cmp(&self, other: &ColumnValue) -> Ordering {
        match (self, other) {
            (ColumnValue::Int32(a), ColumnValue::Int32(b)) => a.cmp(b),
            (ColumnValue::Int64(a), ColumnValue::Int64(b)) => a.cmp(b),
            (ColumnValue::Int32(a), ColumnValue::Int64(b)) => (*a as i64).cmp(b),
            (ColumnValue::Int64(a), ColumnValue::Int32(b)) => a.cmp(&(*b as i64)),
            (ColumnValue::Float64(a), ColumnValue::Float64(b)) => cmp_f64(*a, *b),
            (ColumnValue::Int32(a), ColumnValue::Float64(b)) => cmp_i64_f64(*a as i64, *b),
            (ColumnValue::Int64(a), ColumnValue::Float64(b)) => cmp_i64_f64(*a, *b),
            (ColumnValue::Float64(a), ColumnValue::Int32(b)) => cmp_i64_f64(*b as i64, *a).reverse(),
            (ColumnValue::Float64(a), ColumnValue::Int64(b)) => cmp_i64_f64(*b, *a).reverse(),
            (ColumnValue::String(a), ColumnValue::String(b)) => a.cmp(b),
            (ColumnValue::Bool(a), ColumnValue::Bool(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            ColumnValue::Bool(_) => 0,
            ColumnValue::Int32(_) | ColumnValue::Int64(_) | ColumnValue::Float64(_) => 1,
            ColumnValue::String(_) => 2,
            ColumnValue::Null => 3,
        }
    }

    /// Convert a JSON value into a cell value.
    ///
    /// Arrays and objects have no cell representation of their own and are
    /// kept as their compact JSON text.
    pub fn from_json(value: &JsonValue) -> ColumnValue {
        match value {
            JsonValue::Null => ColumnValue::Null,
            JsonValue::Bool(b) => ColumnValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => ColumnValue::Int32(small),
                        Err(_) => ColumnValue::Int64(i),
                    }
                } else {
                    n.as_f64().map(ColumnValue::Float64).unwrap_or(ColumnValue::Null)
                }
            }
            JsonValue::String(s) => ColumnValue::String(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => ColumnValue::String(value.to_string()),
        }
    }

    /// Convert this value into JSON. Non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ColumnValue::Int32(n) => JsonValue::Number((*n).into()),
            ColumnValue::Int64(n) => JsonValue::Number((*n).into()),
            ColumnValue::Float64(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ColumnValue::String(s) => JsonValue::String(s.clone()),
            ColumnValue::Bool(b) => JsonValue::Bool(*b),
            ColumnValue::Null => JsonValue::Null,
        }
    }
}

/// Float ordering with NaN after every number. `-0.0` equals `0.0`.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer against a float.
fn cmp_i64_f64(a: i64, b: f64) -> Ordering {
    // 2^63 is exactly representable; i64 covers [-2^63, 2^63)
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        return Ordering::Less;
    }
    if b >= LIMIT {
        return Ordering::Less;
    }
    if b < -LIMIT {
        return Ordering::Greater;
    }

    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal if b > whole => Ordering::Less,
        Ordering::Equal if b < whole => Ordering::Greater,
        other => other,
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        ColumnValue::Int32(v)
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Int64(v)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Float64(v)
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        ColumnValue::Bool(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::String(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        ColumnValue::String(v)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ColumnValue::Null)
    }
}

/// Horizontal alignment hint for a column. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Formatter turning a raw cell value (plus its record) into display text.
pub type Formatter<R> = Box<dyn Fn(&ColumnValue, &R) -> String>;

/// Describes one displayable field of a record.
///
/// # Examples
///
/// ```
/// use datatable::{ColumnSchema, ColumnValue, Row};
///
/// let price: ColumnSchema<Row> = ColumnSchema::new("price", "Price")
///     .sortable()
///     .with_formatter(|value, _row| format!("${:.2}", value.as_f64().unwrap_or(0.0)));
///
/// let mut row = Row::new();
/// row.insert("price".to_string(), ColumnValue::Float64(9.5));
/// assert_eq!(price.display(&row), "$9.50");
/// ```
pub struct ColumnSchema<R> {
    key: String,
    label: String,
    sortable: bool,
    formatter: Option<Formatter<R>>,
    width: Option<u32>,
    align: Align,
}

impl<R> ColumnSchema<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnSchema {
            key: key.into(),
            label: label.into(),
            sortable: false,
            formatter: None,
            width: None,
            align: Align::Left,
        }
    }

    /// Mark the column header as a sort toggle.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&ColumnValue, &R) -> String + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }
}

impl<R: crate::record::Record> ColumnSchema<R> {
    /// Returns the raw value of this column for a record.
    pub fn value(&self, record: &R) -> ColumnValue {
        record.field(&self.key)
    }

    /// Returns the display text of this column for a record.
    pub fn display(&self, record: &R) -> String {
        let value = record.field(&self.key);
        match &self.formatter {
            Some(format) => format(&value, record),
            None => value.display_string(),
        }
    }
}

impl<R> fmt::Debug for ColumnSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("formatter", &self.formatter.is_some())
            .field("width", &self.width)
            .field("align", &self.align)
            .finish()
    }
}
