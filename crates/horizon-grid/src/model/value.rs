//! Cell values.
//!
//! A [`CellValue`] is what an item stores under a column field and what an
//! editor produces from `serialize_value()`. The set of variants mirrors
//! what a loosely typed data source can hold, so the same type carries
//! strings from text editors, integers from numeric editors and boolean
//! flags from checkboxes. Composite editors serialize to a
//! [`CellValue::List`] aligned by column index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dynamically typed cell value.
///
/// # Example
///
/// ```
/// use horizon_grid::model::CellValue;
///
/// let value = CellValue::from("42");
/// assert_eq!(value.as_str(), Some("42"));
/// assert_eq!(value.to_display_string(), "42");
///
/// assert!(CellValue::from("YES").as_flag());
/// assert!(!CellValue::Null.is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value (missing or explicitly null field).
    #[default]
    Null,
    /// Boolean data.
    Bool(bool),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// String data.
    String(String),
    /// Ordered list of values (composite editor state).
    List(Vec<CellValue>),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            CellValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get the value as a list.
    pub fn as_list(&self) -> Option<&[CellValue]> {
        match self {
            CellValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Consumes the value, returning the list if it is one.
    pub fn into_list(self) -> Option<Vec<CellValue>> {
        match self {
            CellValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Renders the value the way an input control displays it.
    ///
    /// `Null` renders as the empty string; lists join their elements with
    /// commas.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::List(values) => values
                .iter()
                .map(CellValue::to_display_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Loose truthiness: null, `false`, zero, NaN and the empty string are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(n) => *n != 0,
            CellValue::Float(n) => *n != 0.0 && !n.is_nan(),
            CellValue::String(s) => !s.is_empty(),
            CellValue::List(_) => true,
        }
    }

    /// Coerces the value to a boolean flag.
    ///
    /// Strings are true only when they equal `"true"` or `"yes"`, ignoring
    /// ASCII case. Other values use [`is_truthy`](Self::is_truthy).
    pub fn as_flag(&self) -> bool {
        match self {
            CellValue::String(s) => s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes"),
            other => other.is_truthy(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<Vec<CellValue>> for CellValue {
    fn from(values: Vec<CellValue>) -> Self {
        CellValue::List(values)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}
