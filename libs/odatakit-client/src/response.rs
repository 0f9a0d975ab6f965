//! Decoded feed responses.

use serde_json::Value;

use crate::error::ClientError;

/// A decoded JSON response document.
///
/// Thin wrapper over the raw JSON tree with the two extraction helpers the
/// feed format calls for: named top-level properties and the typed entity
/// collection under the `value` key.
#[derive(Clone, Debug, PartialEq)]
pub struct Document(Value);

impl Document {
    /// Decode raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ResponseParse`] when the bytes are not valid
    /// JSON.
    pub fn parse(bytes: &[u8]) -> Result<Self, ClientError> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(ClientError::ResponseParse)
    }

    /// A named top-level property, or `None` when absent (or when the
    /// document is not an object).
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Entries of the top-level `value` array whose `@odata.type` tag equals
    /// `#<entity_type>`.
    ///
    /// Returns an empty vec when `value` is absent, not an array, or holds no
    /// matching entries.
    #[must_use]
    pub fn entities(&self, entity_type: &str) -> Vec<&Value> {
        let tag = format!("#{entity_type}");
        self.0
            .get("value")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| {
                        e.get("@odata.type").and_then(Value::as_str) == Some(tag.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The underlying JSON value.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_doc() -> Document {
        Document::from(json!({
            "@odata.count": 2,
            "value": [
                { "@odata.type": "#Property", "ListingKey": "a1" },
                { "@odata.type": "#Media", "MediaKey": "m1" },
                { "@odata.type": "#Property", "ListingKey": "a2" },
                { "ListingKey": "untyped" }
            ]
        }))
    }

    #[test]
    fn parse_valid_json() {
        let doc = Document::parse(br#"{"value":[]}"#).unwrap();
        assert!(doc.entities("Property").is_empty());
    }

    #[test]
    fn parse_invalid_json_is_an_error() {
        let err = Document::parse(b"<html>").unwrap_err();
        assert!(matches!(err, ClientError::ResponseParse(_)));
    }

    #[test]
    fn property_returns_named_value() {
        let doc = listing_doc();
        assert_eq!(
            doc.property("@odata.count").and_then(Value::as_u64),
            Some(2)
        );
    }

    #[test]
    fn property_missing_is_none() {
        assert!(listing_doc().property("nope").is_none());
    }

    #[test]
    fn property_on_non_object_document_is_none() {
        let doc = Document::from(json!([1, 2, 3]));
        assert!(doc.property("value").is_none());
    }

    #[test]
    fn entities_filters_by_type_tag() {
        let doc = listing_doc();
        let properties = doc.entities("Property");
        assert_eq!(properties.len(), 2);
        assert_eq!(
            properties[0].get("ListingKey").and_then(Value::as_str),
            Some("a1")
        );
        assert_eq!(
            properties[1].get("ListingKey").and_then(Value::as_str),
            Some("a2")
        );
    }

    #[test]
    fn entities_ignores_untyped_and_foreign_entries() {
        let doc = listing_doc();
        assert_eq!(doc.entities("Media").len(), 1);
        assert!(doc.entities("Unknown").is_empty());
    }

    #[test]
    fn entities_requires_hash_prefixed_tag() {
        // The tag comparison is exact: "#Property", not "Property".
        let doc = Document::from(json!({
            "value": [{ "@odata.type": "Property" }]
        }));
        assert!(doc.entities("Property").is_empty());
    }

    #[test]
    fn entities_without_value_key_is_empty() {
        let doc = Document::from(json!({ "odata.metadata": "..." }));
        assert!(doc.entities("Property").is_empty());
    }

    #[test]
    fn entities_with_non_array_value_is_empty() {
        let doc = Document::from(json!({ "value": "scalar" }));
        assert!(doc.entities("Property").is_empty());
    }

    #[test]
    fn into_inner_returns_raw_tree() {
        let doc = Document::parse(br#"{"a":1}"#).unwrap();
        assert_eq!(doc.into_inner(), json!({"a":1}));
    }
}
