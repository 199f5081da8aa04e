//! # Form Records
//!
//! The field-name → value table a form instance owns. Lookups of absent
//! fields yield `FieldValue::Missing` rather than `None`, matching how a
//! validation schema treats a field the record has never seen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuoteError;
use crate::value::FieldValue;

static MISSING: FieldValue = FieldValue::Missing;

/// All field values of one form instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRecord(BTreeMap<String, FieldValue>);

impl FormRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `field`, or `Missing` when the record has no entry.
    pub fn get(&self, field: &str) -> &FieldValue {
        self.0.get(field).unwrap_or(&MISSING)
    }

    /// Set `field` to `value`, returning the previous value if any.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.0.insert(field.into(), value.into())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove `field` from the record.
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    /// Whether the record has an entry for `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Build a record from a JSON object.
    ///
    /// Nested objects are rejected; arrays must contain only strings.
    pub fn from_json(value: Value) -> Result<Self, QuoteError> {
        match value {
            Value::Object(map) => {
                let mut record = Self::new();
                for (field, raw) in map {
                    let parsed: FieldValue = serde_json::from_value(raw).map_err(|e| {
                        QuoteError::InvalidRecord(format!("field '{field}': {e}"))
                    })?;
                    record.set(field, parsed);
                }
                Ok(record)
            }
            other => Err(QuoteError::InvalidRecord(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Render the record as a JSON object.
    pub fn to_json(&self) -> Value {
        let map = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::to_value(v).unwrap_or(Value::Null)))
            .collect();
        Value::Object(map)
    }
}

impl FromIterator<(String, FieldValue)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_field_is_missing() {
        let record = FormRecord::new();
        assert_eq!(record.get("name"), &FieldValue::Missing);
    }

    #[test]
    fn set_replaces_value() {
        let mut record = FormRecord::new().with("name", "Alice");
        let prev = record.set("name", "Bob");
        assert_eq!(prev, Some(FieldValue::text("Alice")));
        assert_eq!(record.get("name").as_text(), Some("Bob"));
    }

    #[test]
    fn from_json_object() {
        let record = FormRecord::from_json(json!({
            "name": "Alice",
            "features": ["Admin dashboard"],
            "company": null
        }))
        .unwrap();
        assert_eq!(record.len(), 3);
        assert!(record.get("company").is_missing());
        assert_eq!(
            record.get("features").as_list(),
            Some(&["Admin dashboard".to_string()][..])
        );
    }

    #[test]
    fn from_json_rejects_non_object() {
        let err = FormRecord::from_json(json!(["a"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn from_json_rejects_nested_object() {
        let err = FormRecord::from_json(json!({"contact": {"name": "A"}})).unwrap_err();
        assert!(err.to_string().contains("contact"));
    }

    #[test]
    fn to_json_preserves_shapes() {
        let record = FormRecord::new()
            .with("name", "Alice")
            .with("features", vec!["Search functionality".to_string()]);
        assert_eq!(
            record.to_json(),
            json!({"features": ["Search functionality"], "name": "Alice"})
        );
    }
}
