//! Records and collections as read from a remote source or a snapshot.

use crate::errors::{json_type_name, SnapDiffError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One dataset item: field name to JSON value, in source order.
pub type Record = Map<String, Value>;

/// An ordered sequence of records, one full capture of a dataset.
///
/// Order carries no meaning for diffing but is kept so a snapshot decodes
/// back to the same sequence it was saved from. Equality compares records
/// in sequence order and fields irrespective of their order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(Vec<Record>);

impl Collection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn into_records(self) -> Vec<Record> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Check that `value` is an array of objects and take it as a collection.
    ///
    /// `side` names the value in error messages ("old", "new", "payload").
    ///
    /// # Errors
    ///
    /// - `NotACollection` when `value` is not an array
    /// - `NotARecord` for the first element that is not an object
    pub fn from_value(value: Value, side: &str) -> Result<Self, SnapDiffError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(SnapDiffError::NotACollection {
                    side: side.to_string(),
                    found: json_type_name(&other).to_string(),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(record) => records.push(record),
                other => {
                    return Err(SnapDiffError::NotARecord {
                        side: side.to_string(),
                        index,
                        found: json_type_name(&other).to_string(),
                    })
                }
            }
        }
        Ok(Self(records))
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::Object).collect())
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_array_of_objects() {
        let c = Collection::from_value(json!([{"id": 1}, {"id": 2}]), "old").unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.records()[1]["id"], json!(2));
    }

    #[test]
    fn test_from_value_rejects_object_root() {
        let err = Collection::from_value(json!({"articles": []}), "new").unwrap_err();
        assert_eq!(
            err,
            SnapDiffError::NotACollection {
                side: "new".into(),
                found: "object".into()
            }
        );
    }

    #[test]
    fn test_from_value_rejects_scalar_element() {
        let err = Collection::from_value(json!([{"id": 1}, 7]), "old").unwrap_err();
        assert!(matches!(err, SnapDiffError::NotARecord { index: 1, .. }));
    }

    #[test]
    fn test_equality_ignores_field_order() {
        let a: Collection = serde_json::from_str(r#"[{"id":1,"ref":"A"}]"#).unwrap();
        let b: Collection = serde_json::from_str(r#"[{"ref":"A","id":1}]"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_record_order() {
        let a: Collection = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        let b: Collection = serde_json::from_str(r#"[{"id":2},{"id":1}]"#).unwrap();
        assert_ne!(a, b);
    }
}
