//! # Field Validation Engine
//!
//! Evaluates a [`ValidationSchema`] against field values and maintains the
//! running [`ValidationErrors`] map.
//!
//! ## Operations
//!
//! | Operation           | Effect on the error map                               |
//! |---------------------|-------------------------------------------------------|
//! | `validate_field`    | none (pure evaluation)                                |
//! | `validate`          | replaced by exactly the fields that failed            |
//! | `validate_single`   | only the given field's entry is set or removed        |
//! | `clear_errors`      | named entries (or all) removed, nothing re-evaluated  |
//! | `set_field_error`   | one entry forced, bypassing rules                     |
//! | `apply_server_errors` | one forced entry per `{field, message}`             |
//!
//! A field the schema does not declare is always valid. A field the record
//! does not contain is evaluated as `FieldValue::Missing`.

use std::sync::Arc;

use quote_core::{FieldMessage, FieldValue, FormRecord, ValidationErrors};

use crate::diagnostics::{DiagnosticEvent, Diagnostics, NoopDiagnostics};
use crate::rules::ValidationSchema;

/// Rule evaluator plus the live error map of one form instance.
#[derive(Clone)]
pub struct ValidationEngine {
    schema: ValidationSchema,
    errors: ValidationErrors,
    diagnostics: Arc<dyn Diagnostics>,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("schema", &self.schema)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl ValidationEngine {
    /// Create an engine with no diagnostics output.
    pub fn new(schema: ValidationSchema) -> Self {
        Self::with_diagnostics(schema, Arc::new(NoopDiagnostics))
    }

    /// Create an engine reporting to `diagnostics`.
    pub fn with_diagnostics(schema: ValidationSchema, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            schema,
            errors: ValidationErrors::new(),
            diagnostics,
        }
    }

    /// Evaluate one field without touching the error map.
    ///
    /// Returns the message of the first failing check, or `None` when the
    /// field is valid or undeclared.
    pub fn validate_field(&self, field: &str, value: &FieldValue) -> Option<String> {
        let error = self
            .schema
            .rule(field)
            .and_then(|rule| rule.evaluate(field, value));
        self.diagnostics.record(&DiagnosticEvent::FieldValidated {
            field,
            error: error.as_deref(),
        });
        error
    }

    /// Validate `fields` (or every declared field when `None`) against
    /// `record`, replacing the whole error map with the failures.
    ///
    /// Returns `true` when nothing failed.
    pub fn validate(&mut self, record: &FormRecord, fields: Option<&[&str]>) -> bool {
        let targets: Vec<&str> = match fields {
            Some(list) => list.to_vec(),
            None => self.schema.fields().collect(),
        };

        let mut errors = ValidationErrors::new();
        for field in &targets {
            if let Some(message) = self.validate_field(field, record.get(field)) {
                errors.insert(*field, message);
            }
        }

        self.diagnostics.record(&DiagnosticEvent::ErrorsReplaced {
            checked: targets.len(),
            failed: errors.len(),
        });
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate one field and merge the outcome into the error map, leaving
    /// every other entry untouched.
    ///
    /// Returns `true` when the field is valid.
    pub fn validate_single(&mut self, field: &str, value: &FieldValue) -> bool {
        match self.validate_field(field, value) {
            Some(message) => {
                self.errors.insert(field, message);
                false
            }
            None => {
                self.errors.remove(field);
                true
            }
        }
    }

    /// Remove the entries for `fields`, or every entry when `None`.
    pub fn clear_errors(&mut self, fields: Option<&[&str]>) {
        match fields {
            Some(list) => {
                for field in list {
                    self.errors.remove(field);
                }
            }
            None => self.errors.clear(),
        }
        self.diagnostics
            .record(&DiagnosticEvent::ErrorsCleared { fields });
    }

    /// Force `message` as the error for `field`.
    pub fn set_field_error(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        self.diagnostics.record(&DiagnosticEvent::FieldErrorForced {
            field,
            message: &message,
        });
        self.errors.insert(field, message);
    }

    /// Splice server-reported failures into the error map, one
    /// [`set_field_error`](Self::set_field_error) per entry.
    pub fn apply_server_errors(&mut self, messages: &[FieldMessage]) {
        for entry in messages {
            self.set_field_error(&entry.field, entry.message.clone());
        }
    }

    /// The current error map.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The current message for `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Whether the error map is empty.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The schema this engine evaluates.
    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }
}
