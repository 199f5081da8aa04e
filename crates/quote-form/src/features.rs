//! # Feature Checklists
//!
//! A set of selected checklist items with explicit set operations. The
//! "Other" option carries free text and is stored as a single
//! `"Other: <text>"` entry.

use std::collections::BTreeSet;

use quote_core::FieldValue;
use serde::{Deserialize, Serialize};

/// Prefix of the free-text "Other" entry.
pub const OTHER_PREFIX: &str = "Other:";

/// The selected items of a checklist field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<String>);

impl FeatureSet {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the selection held by a field value. Non-list values yield an
    /// empty set.
    pub fn from_value(value: &FieldValue) -> Self {
        value
            .as_list()
            .map(|items| items.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Flip `item` in or out of the selection. Returns `true` when the item
    /// is selected afterwards.
    pub fn toggle(&mut self, item: &str) -> bool {
        if self.0.remove(item) {
            false
        } else {
            self.0.insert(item.to_string());
            true
        }
    }

    /// Select `item`.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        self.0.insert(item.into())
    }

    /// Deselect `item`.
    pub fn remove(&mut self, item: &str) -> bool {
        self.0.remove(item)
    }

    /// Whether `item` is selected.
    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    /// Items selected in either set.
    pub fn union(&self, other: &FeatureSet) -> FeatureSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Items selected here but not in `other`.
    pub fn difference(&self, other: &FeatureSet) -> FeatureSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Replace the "Other" entry with `text`. Blank text removes it.
    pub fn set_other(&mut self, text: &str) {
        self.0.retain(|item| !item.starts_with(OTHER_PREFIX));
        let text = text.trim();
        if !text.is_empty() {
            self.0.insert(format!("{OTHER_PREFIX} {text}"));
        }
    }

    /// The free text of the "Other" entry, if selected.
    pub fn other(&self) -> Option<&str> {
        self.0
            .iter()
            .find_map(|item| item.strip_prefix(OTHER_PREFIX))
            .map(str::trim)
    }

    /// Whether the "Other" entry is selected.
    pub fn has_other(&self) -> bool {
        self.0.iter().any(|item| item.starts_with(OTHER_PREFIX))
    }

    /// Iterate over selected items in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a `FieldValue::List`.
    pub fn into_value(self) -> FieldValue {
        FieldValue::List(self.0.into_iter().collect())
    }
}

impl FromIterator<String> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> FeatureSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut features = FeatureSet::new();
        assert!(features.toggle("Admin dashboard"));
        assert!(features.contains("Admin dashboard"));
        assert!(!features.toggle("Admin dashboard"));
        assert!(features.is_empty());
    }

    #[test]
    fn union_and_difference() {
        let a = set(&["Payment processing", "File uploads"]);
        let b = set(&["File uploads", "Search functionality"]);
        assert_eq!(a.union(&b).len(), 3);
        assert_eq!(
            a.difference(&b).iter().collect::<Vec<_>>(),
            vec!["Payment processing"]
        );
    }

    #[test]
    fn other_entry_is_replaced() {
        let mut features = set(&["Admin dashboard"]);
        features.set_other("Barcode scanning");
        assert_eq!(features.other(), Some("Barcode scanning"));
        features.set_other("Label printing");
        assert_eq!(features.len(), 2);
        assert_eq!(features.other(), Some("Label printing"));
        features.set_other("  ");
        assert!(!features.has_other());
    }

    #[test]
    fn from_non_list_value_is_empty() {
        assert!(FeatureSet::from_value(&FieldValue::text("x")).is_empty());
    }

    #[test]
    fn into_value_is_sorted_list() {
        let value = set(&["b", "a"]).into_value();
        assert_eq!(value, FieldValue::List(vec!["a".into(), "b".into()]));
    }
}
