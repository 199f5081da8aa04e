//! # Field Values
//!
//! The value held by one form field. Text inputs, selects and textareas are
//! `Text`; checklists are `List`; toggles are `Bool`; numeric inputs are
//! `Number`. A field the record does not contain is `Missing`.

use serde::{Deserialize, Serialize};

/// The current value of a single form field.
///
/// Serialises untagged, so the JSON shape is the natural one: `"text"`,
/// `["a", "b"]`, `true`, `42`, or `null` for `Missing`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value (absent key or JSON `null`).
    #[default]
    Missing,
    /// Free text or a single selected option.
    Text(String),
    /// A multi-select checklist.
    List(Vec<String>),
    /// A checkbox or toggle.
    Bool(bool),
    /// A numeric input.
    Number(f64),
}

impl FieldValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether this value satisfies a `required` rule.
    ///
    /// - `Missing` is never present.
    /// - `Text` is present unless it is empty after trimming whitespace.
    /// - `List` is present unless it is empty.
    /// - `Bool` is present only when `true` (a required toggle must be on).
    /// - `Number` is always present, including zero.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Missing => false,
            Self::Text(s) => !s.trim().is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Bool(b) => *b,
            Self::Number(_) => true,
        }
    }

    /// The text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The list items, if this is a `List` value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Whether this is `Missing`.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
