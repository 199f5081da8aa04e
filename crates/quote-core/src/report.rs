//! # Error Maps and Field Messages
//!
//! `ValidationErrors` is the live field → message table a form renders
//! beside its inputs. Absence of a key means the field is currently valid.
//! Fields keep the order in which they first failed, so a validator that
//! checks `name` before `email` reports them in that order.
//!
//! `FieldMessage` is the `{field, message}` entry a server returns in the
//! `validationErrors` array of a rejected submission.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name → human-readable error message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Record `message` for `field`, replacing any previous message.
    ///
    /// A replaced message keeps the field's original position.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Record `message` for `field` only if the field has no message yet.
    ///
    /// Returns `true` when the message was recorded.
    pub fn insert_if_absent(&mut self, field: &str, message: impl Into<String>) -> bool {
        if self.0.contains_key(field) {
            return false;
        }
        self.0.insert(field.to_string(), message.into());
        true
    }

    /// Remove the message for `field`.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.shift_remove(field)
    }

    /// Whether `field` currently has a message.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Whether no field has a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate over `(field, message)` pairs in the order the fields first failed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names that currently have a message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Build a map from server-reported entries. The first message for a
    /// field wins.
    pub fn from_messages<'a>(messages: impl IntoIterator<Item = &'a FieldMessage>) -> Self {
        let mut errors = Self::new();
        for m in messages {
            errors.insert_if_absent(&m.field, m.message.clone());
        }
        errors
    }

    /// Flatten the map into `{field, message}` entries.
    pub fn to_messages(&self) -> Vec<FieldMessage> {
        self.0
            .iter()
            .map(|(field, message)| FieldMessage::new(field.clone(), message.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One field-level failure reported by a server after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    /// The failing field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldMessage {
    /// Create a new field message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
