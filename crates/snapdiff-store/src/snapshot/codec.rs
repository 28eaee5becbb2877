//! Canonical snapshot encoding
//!
//! Pretty-printed JSON with four-space indentation. Non-ASCII text and `/`
//! are written as-is, never escaped.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use snapdiff_core::errors::SnapDiffError;
use snapdiff_core::model::Collection;

/// Encode a collection in the canonical snapshot form
///
/// # Errors
///
/// - `InvalidJson`: the collection could not be serialized
pub fn encode_collection(collection: &Collection) -> Result<Vec<u8>, SnapDiffError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    collection.serialize(&mut ser)?;
    Ok(buf)
}

/// Decode bytes written by [`encode_collection`] (or any JSON array of objects)
///
/// # Errors
///
/// - `InvalidJson`: bytes are not JSON
/// - `NotACollection` / `NotARecord`: JSON is not an array of objects
pub fn decode_collection(bytes: &[u8]) -> Result<Collection, SnapDiffError> {
    snapdiff_core::payload::decode_collection(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_space_indent_and_unescaped_text() {
        let c = Collection::from_value(
            json!([{"name": "Carabine à plombs", "url": "https://x/y"}]),
            "test",
        )
        .unwrap();
        let text = String::from_utf8(encode_collection(&c).unwrap()).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"name\": \"Carabine à plombs\",\n        \"url\": \"https://x/y\"\n    }\n]"
        );
    }

    #[test]
    fn test_empty_collection_encodes_as_empty_array() {
        let text = encode_collection(&Collection::new()).unwrap();
        assert_eq!(text, b"[]");
    }
}
