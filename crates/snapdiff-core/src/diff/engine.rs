//! Keyed changelog computation.
//!
//! The entry point is [`compare`], which correlates two collections by a key
//! field and classifies each key as added, updated or deleted.

use crate::diff::model::{ChangeEntry, Changelog, FieldDifference};
use crate::errors::SnapDiffError;
use crate::model::{Collection, Record};
use indexmap::IndexMap;
use serde_json::Value;

/// Key field used when the caller does not name one
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Canonical form of a key value used to correlate records.
///
/// Integers and strings holding an integer in canonical decimal form share a
/// key, so `1` and `"1"` correlate while `"01"`, `"-0"` and `"1.0"` stay
/// distinct. Every other scalar keys by its JSON encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexKey(String);

impl IndexKey {
    /// Key for a scalar value; `null`, arrays and objects cannot key a record.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::String(s) => Some(match canonical_integer(s) {
                Some(n) => Self(n.to_string()),
                None => Self(value.to_string()),
            }),
            scalar => Some(Self(scalar.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The integer `s` spells, when it is written without sign noise or leading
/// zeros and fits in an `i64`.
fn canonical_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let canonical = match digits.as_bytes() {
        [b'0'] => digits.len() == s.len(),
        [first, rest @ ..] => (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit),
        [] => false,
    };
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

/// Records of one collection indexed by key, in first-occurrence order.
pub type KeyIndex<'a> = IndexMap<IndexKey, &'a Record>;

/// Index `records` by the value of `key_field`.
///
/// Records without a usable key are skipped. When a key repeats, the later
/// record replaces the earlier one but keeps its position.
pub fn index_by_key<'a>(records: &'a [Record], key_field: &str) -> KeyIndex<'a> {
    let mut index = KeyIndex::with_capacity(records.len());
    for record in records {
        if let Some(key) = record.get(key_field).and_then(IndexKey::from_value) {
            index.insert(key, record);
        }
    }
    index
}

/// Fields of `old` that changed or disappeared in `new`.
///
/// Nested records are compared field by field and reported at their leaf
/// path; any other value (including arrays) is compared by strict equality.
/// Fields that exist only in `new` are not inspected.
pub fn find_differences(old: &Record, new: &Record) -> Vec<FieldDifference> {
    let mut differences = Vec::new();
    collect_differences(old, new, &mut Vec::new(), &mut differences);
    differences
}

fn collect_differences(
    old: &Record,
    new: &Record,
    path: &mut Vec<String>,
    out: &mut Vec<FieldDifference>,
) {
    for (name, old_value) in old {
        path.push(name.clone());
        match new.get(name) {
            None => out.push(FieldDifference {
                path: path.clone(),
                old: old_value.clone(),
                new: Value::Null,
            }),
            Some(new_value) => match (old_value, new_value) {
                (Value::Object(a), Value::Object(b)) => collect_differences(a, b, path, out),
                (a, b) if a != b => out.push(FieldDifference {
                    path: path.clone(),
                    old: a.clone(),
                    new: b.clone(),
                }),
                _ => {}
            },
        }
        path.pop();
    }
}

/// Compute the changelog turning `old` into `new`, correlated on `key_field`.
///
/// Deletes and updates come first in the old collection's key order, then
/// adds in the new collection's key order. Unchanged records produce nothing.
pub fn compare(old: &Collection, new: &Collection, key_field: &str) -> Changelog {
    let before = index_by_key(old.records(), key_field);
    let after = index_by_key(new.records(), key_field);

    tracing::debug!(
        key_field,
        old_records = old.len(),
        old_indexed = before.len(),
        new_records = new.len(),
        new_indexed = after.len(),
        "Indexed collections for comparison"
    );

    let mut entries = Vec::new();

    for (key, old_record) in &before {
        match after.get(key) {
            None => entries.push(ChangeEntry::deleted((*old_record).clone())),
            Some(new_record) => {
                let differences = find_differences(old_record, new_record);
                if !differences.is_empty() {
                    entries.push(ChangeEntry::updated((*new_record).clone(), differences));
                }
            }
        }
    }

    for (key, new_record) in &after {
        if !before.contains_key(key) {
            entries.push(ChangeEntry::added((*new_record).clone()));
        }
    }

    Changelog::new(entries)
}

/// [`compare`] for untyped JSON inputs.
///
/// # Errors
///
/// - `NotACollection`: either side is not a JSON array
/// - `NotARecord`: an element of either side is not a JSON object
pub fn compare_values(old: &Value, new: &Value, key_field: &str) -> Result<Changelog, SnapDiffError> {
    let old = Collection::from_value(old.clone(), "old")?;
    let new = Collection::from_value(new.clone(), "new")?;
    Ok(compare(&old, &new, key_field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    fn key(v: Value) -> IndexKey {
        IndexKey::from_value(&v).unwrap()
    }

    #[test]
    fn test_integer_and_canonical_string_share_key() {
        assert_eq!(key(json!("1")), key(json!(1)));
        assert_eq!(key(json!("-42")), key(json!(-42)));
        assert_eq!(key(json!("0")), key(json!(0)));
    }

    #[test]
    fn test_non_canonical_numeric_strings_keep_own_key() {
        for s in ["01", "-0", "+1", "1.0", " 1", "", "-", "99999999999999999999"] {
            let k = key(json!(s));
            assert_eq!(k.as_str(), json!(s).to_string(), "key for {:?}", s);
        }
        assert_ne!(key(json!("01")), key(json!(1)));
        assert_ne!(key(json!(1.0)), key(json!(1)));
    }

    #[test]
    fn test_index_key_rejects_null_and_containers() {
        assert!(IndexKey::from_value(&Value::Null).is_none());
        assert!(IndexKey::from_value(&json!([1])).is_none());
        assert!(IndexKey::from_value(&json!({"a": 1})).is_none());
    }

    #[test]
    fn test_index_keeps_first_position_last_value() {
        let records = vec![
            record(json!({"id": "a", "v": 1})),
            record(json!({"id": "b", "v": 2})),
            record(json!({"id": "a", "v": 3})),
        ];
        let index = index_by_key(&records, "id");
        let keys: Vec<_> = index.keys().map(|k| k.as_str().to_string()).collect();
        assert_eq!(keys, vec!["\"a\"", "\"b\""]);
        assert_eq!(index[0]["v"], json!(3));
    }

    #[test]
    fn test_nested_difference_reports_leaf_path() {
        let old = record(json!({"id": 1, "price": {"amount": 10, "currency": "EUR"}}));
        let new = record(json!({"id": 1, "price": {"amount": 12, "currency": "EUR"}}));
        let diffs = find_differences(&old, &new);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path_string(), "price.amount");
        assert_eq!(diffs[0].old, json!(10));
        assert_eq!(diffs[0].new, json!(12));
    }

    #[test]
    fn test_removed_field_reports_null() {
        let old = record(json!({"id": 1, "ean": "123"}));
        let new = record(json!({"id": 1}));
        let diffs = find_differences(&old, &new);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].new, Value::Null);
    }

    #[test]
    fn test_new_only_field_is_not_a_difference() {
        let old = record(json!({"id": 1}));
        let new = record(json!({"id": 1, "ean": "123"}));
        assert!(find_differences(&old, &new).is_empty());
    }

    #[test]
    fn test_arrays_compare_strictly() {
        let old = record(json!({"id": 1, "tags": [1, 2]}));
        let new = record(json!({"id": 1, "tags": [1, 2, 3]}));
        let diffs = find_differences(&old, &new);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path_string(), "tags");
    }

    #[test]
    fn test_integer_and_float_differ() {
        let old = record(json!({"id": 1, "price": 10}));
        let new = record(json!({"id": 1, "price": 10.0}));
        assert_eq!(find_differences(&old, &new).len(), 1);
    }

    #[test]
    fn test_object_replaced_by_scalar_is_a_difference() {
        let old = record(json!({"id": 1, "dims": {"w": 1}}));
        let new = record(json!({"id": 1, "dims": "n/a"}));
        let diffs = find_differences(&old, &new);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path_string(), "dims");
    }

    #[test]
    fn test_compare_values_rejects_non_array() {
        let err = compare_values(&json!({"id": 1}), &json!([]), "id").unwrap_err();
        assert!(matches!(err, SnapDiffError::NotACollection { .. }));
    }
}
