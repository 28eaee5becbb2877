//! Decoding of raw source payloads into collections.
//!
//! Sources deliver either a bare JSON array of records or an envelope object
//! holding the array under a named field (`{"articles": [...]}`).

use crate::errors::SnapDiffError;
use crate::model::Collection;
use serde_json::Value;

/// Parse bytes that must hold a JSON array of objects.
///
/// # Errors
///
/// - `InvalidJson`: bytes are not JSON
/// - `NotACollection` / `NotARecord`: JSON is not an array of objects
pub fn decode_collection(bytes: &[u8]) -> Result<Collection, SnapDiffError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Collection::from_value(value, "payload")
}

/// Parse bytes into a JSON document of any shape.
///
/// # Errors
///
/// - `InvalidJson`: bytes are not JSON
pub fn decode_document(bytes: &[u8]) -> Result<Value, SnapDiffError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Take the record collection out of a decoded document.
///
/// With `collection_field`, the document must be an object carrying the
/// array under that field; without it, the document must be the array.
///
/// # Errors
///
/// - `MissingCollectionField`: envelope lacks the field (or is not an object)
/// - `NotACollection` / `NotARecord`: the selected value has the wrong shape
pub fn extract_collection(
    document: Value,
    collection_field: Option<&str>,
) -> Result<Collection, SnapDiffError> {
    match collection_field {
        None => Collection::from_value(document, "payload"),
        Some(field) => {
            let inner = match document {
                Value::Object(mut envelope) => envelope.remove(field),
                _ => None,
            };
            match inner {
                Some(value) => Collection::from_value(value, field),
                None => Err(SnapDiffError::MissingCollectionField {
                    field: field.to_string(),
                }),
            }
        }
    }
}
