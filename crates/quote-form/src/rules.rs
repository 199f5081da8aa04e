//! # Validation Rules
//!
//! A rule is an ordered list of [`Check`] variants. Whatever order the
//! builder methods are called in, checks are stored and evaluated as:
//!
//! ```text
//! Required ──▶ MinLength ──▶ MaxLength ──▶ Pattern ──▶ Custom
//! ```
//!
//! Evaluation stops at the first failing check, so a field never reports
//! more than one message at a time. `MinLength`, `MaxLength` and `Pattern`
//! only apply to text values; `Required` and `Custom` apply to every value.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use quote_core::FieldValue;
use regex::Regex;
use thiserror::Error;

/// Errors raised while building a rule.
#[derive(Error, Debug)]
pub enum RuleError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },
}

// ─── Custom predicates ───────────────────────────────────────────────

/// Result of a custom predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutcome {
    /// The value passes.
    Valid,
    /// The value fails; the engine supplies a generic "is invalid" message.
    Invalid,
    /// The value fails with this message.
    Message(String),
}

impl From<bool> for CustomOutcome {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

impl From<String> for CustomOutcome {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for CustomOutcome {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<Option<String>> for CustomOutcome {
    fn from(message: Option<String>) -> Self {
        message.map_or(Self::Valid, Self::Message)
    }
}

impl From<Result<(), String>> for CustomOutcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(message) => Self::Message(message),
        }
    }
}

/// A shareable custom predicate over a field value.
#[derive(Clone)]
pub struct CustomCheck(Arc<dyn Fn(&FieldValue) -> CustomOutcome + Send + Sync>);

impl CustomCheck {
    /// Wrap a predicate. Its return type may be anything convertible into
    /// [`CustomOutcome`] (`bool`, `Option<String>`, `Result<(), String>`, ...).
    pub fn new<F, O>(predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> O + Send + Sync + 'static,
        O: Into<CustomOutcome>,
    {
        Self(Arc::new(move |value: &FieldValue| -> CustomOutcome {
            predicate(value).into()
        }))
    }

    /// Run the predicate.
    pub fn evaluate(&self, value: &FieldValue) -> CustomOutcome {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCheck(..)")
    }
}

// ─── Checks ──────────────────────────────────────────────────────────

/// One constraint on a field.
#[derive(Debug, Clone)]
pub enum Check {
    /// The value must be present (see [`FieldValue::is_present`]).
    Required,
    /// Text must have at least this many characters.
    MinLength(usize),
    /// Text must have at most this many characters.
    MaxLength(usize),
    /// Text must match this (anchored) expression in full.
    Pattern(Regex),
    /// Caller-supplied predicate, evaluated last.
    Custom(CustomCheck),
}

impl Check {
    /// Position in the fixed evaluation order.
    fn rank(&self) -> u8 {
        match self {
            Self::Required => 0,
            Self::MinLength(_) => 1,
            Self::MaxLength(_) => 2,
            Self::Pattern(_) => 3,
            Self::Custom(_) => 4,
        }
    }

    /// Short name of the check kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Pattern(_) => "pattern",
            Self::Custom(_) => "custom",
        }
    }

    /// Evaluate this check. `label` names the field in generated messages.
    pub fn evaluate(&self, label: &str, value: &FieldValue) -> Option<String> {
        match self {
            Self::Required => (!value.is_present()).then(|| format!("{label} is required")),
            Self::MinLength(min) => value
                .as_text()
                .filter(|text| text.chars().count() < *min)
                .map(|_| format!("{label} must be at least {min} characters")),
            Self::MaxLength(max) => value
                .as_text()
                .filter(|text| text.chars().count() > *max)
                .map(|_| format!("{label} must be no more than {max} characters")),
            Self::Pattern(regex) => value
                .as_text()
                .filter(|text| !regex.is_match(text))
                .map(|_| format!("{label} is invalid")),
            Self::Custom(check) => match check.evaluate(value) {
                CustomOutcome::Valid => None,
                CustomOutcome::Invalid => Some(format!("{label} is invalid")),
                CustomOutcome::Message(message) => Some(message),
            },
        }
    }
}

// ─── Rule ────────────────────────────────────────────────────────────

/// The constraints for one field.
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    checks: Vec<Check>,
    label: Option<String>,
}

impl ValidationRule {
    /// A rule with no checks (every value passes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a present value.
    pub fn required(self) -> Self {
        self.with_check(Check::Required)
    }

    /// Require at least `min` characters of text.
    pub fn min_length(self, min: usize) -> Self {
        self.with_check(Check::MinLength(min))
    }

    /// Allow at most `max` characters of text.
    pub fn max_length(self, max: usize) -> Self {
        self.with_check(Check::MaxLength(max))
    }

    /// Require text to match `pattern` in full.
    pub fn pattern(self, pattern: &str) -> Result<Self, RuleError> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.with_check(Check::Pattern(regex)))
    }

    /// Add a custom predicate.
    pub fn custom<F, O>(self, predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> O + Send + Sync + 'static,
        O: Into<CustomOutcome>,
    {
        self.with_check(Check::Custom(CustomCheck::new(predicate)))
    }

    /// Name the field as `label` in generated messages instead of its key.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Insert `check` at its place in the evaluation order, replacing a
    /// check of the same kind.
    pub fn with_check(mut self, check: Check) -> Self {
        let rank = check.rank();
        match self.checks.binary_search_by_key(&rank, Check::rank) {
            Ok(i) => self.checks[i] = check,
            Err(i) => self.checks.insert(i, check),
        }
        self
    }

    /// The checks in evaluation order.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Whether this rule contains a `Required` check.
    pub fn is_required(&self) -> bool {
        matches!(self.checks.first(), Some(Check::Required))
    }

    /// The display label, if one was set.
    pub fn display_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Evaluate every check in order and return the first failure.
    pub fn evaluate(&self, field: &str, value: &FieldValue) -> Option<String> {
        let label = self.label.as_deref().unwrap_or(field);
        self.checks
            .iter()
            .find_map(|check| check.evaluate(label, value))
    }
}

// ─── Schema ──────────────────────────────────────────────────────────

/// Field name → rule, fixed for the lifetime of a form instance.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    rules: BTreeMap<String, ValidationRule>,
}

impl ValidationSchema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `field` with `rule`. Declaring a field twice keeps the last rule.
    pub fn field(mut self, field: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// The rule for `field`, if declared.
    pub fn rule(&self, field: &str) -> Option<&ValidationRule> {
        self.rules.get(field)
    }

    /// Whether `field` is declared.
    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    /// Declared field names in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no field is declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
