//! Items: the mutable records a grid row is bound to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::value::CellValue;

static NULL: CellValue = CellValue::Null;

/// A mutable mapping from column field name to value.
///
/// Editors only read and write the fields named by their bound column.
/// Reading a field that is not present yields [`CellValue::Null`].
///
/// # Example
///
/// ```
/// use horizon_grid::model::{CellValue, Item};
///
/// let mut item = Item::new().with("title", "Task 1").with("duration", 5);
/// assert_eq!(item.get("duration"), &CellValue::Int(5));
/// assert!(item.get("missing").is_null());
///
/// item.set("duration", 6);
/// assert_eq!(item.get("duration").as_int(), Some(6));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: BTreeMap<String, CellValue>,
}

impl Item {
    /// Creates an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field using builder pattern.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of `field`, or `Null` if it is not present.
    pub fn get(&self, field: &str) -> &CellValue {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Sets `field` to `value`, returning the previous value if any.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Writes `value` to `field` unless that would only turn an absent or
    /// null field into an explicit `Null`.
    ///
    /// Editors write back through this so that an untouched blank cell
    /// leaves the item as it was. Returns `true` if the item changed.
    pub fn assign(&mut self, field: impl Into<String>, value: impl Into<CellValue>) -> bool {
        let field = field.into();
        let value = value.into();
        if value.is_null() && self.get(&field).is_null() {
            return false;
        }
        self.set(field, value);
        true
    }

    /// Removes `field`, returning its value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<CellValue> {
        self.fields.remove(field)
    }

    /// Returns `true` if `field` is present (even when its value is `Null`).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the item has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parses an item from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the item to a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Item {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_null() {
        let item = Item::new();
        assert!(item.get("anything").is_null());
        assert!(!item.contains("anything"));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut item = Item::new().with("a", 1);
        assert_eq!(item.set("a", 2), Some(CellValue::Int(1)));
        assert_eq!(item.set("b", "x"), None);
        assert_eq!(item.len(), 2);
    }

    #[test]
    fn test_explicit_null_is_present() {
        let item = Item::new().with("a", CellValue::Null);
        assert!(item.contains("a"));
        assert!(item.get("a").is_null());
    }

    #[test]
    fn test_assign_keeps_blank_fields_blank() {
        let mut item = Item::new().with("notes", CellValue::Null);
        assert!(!item.assign("title", CellValue::Null));
        assert!(!item.contains("title"));
        assert!(!item.assign("notes", CellValue::Null));
        assert!(item.contains("notes"));

        assert!(item.assign("title", "Task"));
        assert!(item.assign("title", CellValue::Null));
        assert_eq!(item.get("title"), &CellValue::Null);
        assert!(item.contains("title"));
    }

    #[test]
    fn test_json_round_trip() {
        let item = Item::from_json(r#"{"title":"Task 1","done":false,"pct":40,"start":null}"#).unwrap();
        assert_eq!(item.get("title").as_str(), Some("Task 1"));
        assert_eq!(item.get("done"), &CellValue::Bool(false));
        assert_eq!(item.get("pct"), &CellValue::Int(40));
        assert!(item.contains("start"));

        let again = Item::from_json(&item.to_json().unwrap()).unwrap();
        assert_eq!(again, item);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Item::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_from_iterator() {
        let item: Item = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(item.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
