//! # Form Controller
//!
//! Composes a [`StepSequencer`] and a [`ValidationEngine`] around the
//! [`FormRecord`] of one form instance.
//!
//! ## Step gating
//!
//! `next()` validates only the current step's fields and advances when they
//! all pass. Validation is authoritative for that call, so errors left over
//! from other steps are dropped from the map.
//!
//! ## Submission contract
//!
//! ```text
//!   begin_submission()                       finish_submission(outcome)
//!   ──────────────────                       ──────────────────────────
//!   validate(record, None)                   Accepted { id }   → reset()
//!   invalid / in flight → SubmissionBlocked  Rejected(entries) → set_field_error per entry
//!   valid → is_submitting = true, record     Failed(reason)    → state kept
//! ```
//!
//! The network call between the two is the caller's business.

use std::sync::Arc;

use quote_core::{FieldMessage, FieldValue, FormRecord, ValidationErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::engine::ValidationEngine;
use crate::features::FeatureSet;
use crate::rules::ValidationSchema;
use crate::step::{StepError, StepProgress, StepSequencer};

/// One page of a multi-step form and the fields it collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStep {
    /// Stable step identifier (e.g. `"contact"`).
    pub id: String,
    /// Fields validated before leaving this step.
    pub fields: Vec<String>,
}

impl FormStep {
    /// Create a step.
    pub fn new(id: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            id: id.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Result of [`FormController::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The step's fields passed and the cursor moved forward.
    Moved,
    /// At least one of the step's fields failed.
    Blocked,
    /// The step's fields passed but this is the last step.
    AtLastStep,
}

/// Result of [`FormController::back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Back {
    /// Already on the first step; the caller should leave the form.
    LeaveForm,
    /// The cursor moved back one step.
    Moved,
}

/// Why a submission could not start.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionBlocked {
    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    InProgress,

    /// The record failed validation.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(ValidationErrors),
}

/// What the remote endpoint made of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Accepted; `id` identifies the delivered request.
    Accepted {
        /// Delivery identifier.
        id: String,
    },
    /// Rejected with field-level failures.
    Rejected(Vec<FieldMessage>),
    /// Failed without field detail (transport error, rate limit, delivery).
    Failed(String),
}

/// Owns the record, step cursor and error map of one form instance.
#[derive(Debug, Clone)]
pub struct FormController {
    record: FormRecord,
    steps: Vec<FormStep>,
    sequencer: StepSequencer,
    engine: ValidationEngine,
    submitting: bool,
}

impl FormController {
    /// Create a controller over `steps`, validated by `schema`.
    pub fn new(steps: Vec<FormStep>, schema: ValidationSchema) -> Result<Self, StepError> {
        Self::with_diagnostics(steps, schema, Arc::new(NoopDiagnostics))
    }

    /// Create a controller whose sequencer and engine report to `diagnostics`.
    pub fn with_diagnostics(
        steps: Vec<FormStep>,
        schema: ValidationSchema,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self, StepError> {
        let sequencer = StepSequencer::with_diagnostics(steps.len(), diagnostics.clone())?;
        Ok(Self {
            record: FormRecord::new(),
            steps,
            sequencer,
            engine: ValidationEngine::with_diagnostics(schema, diagnostics),
            submitting: false,
        })
    }

    // ─── Field editing ───────────────────────────────────────────────

    /// Store `value` for `field`. A field currently showing an error is
    /// re-validated so the message clears as soon as the input is fixed.
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.record.set(field, value.into());
        if self.engine.error(field).is_some() {
            self.engine.validate_single(field, self.record.get(field));
        }
    }

    /// Toggle `item` in the checklist held by `field`. Returns `true` when
    /// the item is selected afterwards.
    pub fn toggle_list_item(&mut self, field: &str, item: &str) -> bool {
        let mut features = FeatureSet::from_value(self.record.get(field));
        let selected = features.toggle(item);
        self.set_field(field, features.into_value());
        selected
    }

    /// Replace the free-text "Other" entry of the checklist held by `field`.
    pub fn set_list_other(&mut self, field: &str, text: &str) {
        let mut features = FeatureSet::from_value(self.record.get(field));
        features.set_other(text);
        self.set_field(field, features.into_value());
    }

    // ─── Navigation ──────────────────────────────────────────────────

    /// Validate the current step and move forward when it passes.
    pub fn next(&mut self) -> Advance {
        let step = &self.steps[self.sequencer.current_step()];
        let fields: Vec<&str> = step.fields.iter().map(String::as_str).collect();
        if !self.engine.validate(&self.record, Some(fields.as_slice())) {
            return Advance::Blocked;
        }
        if self.sequencer.is_last_step() {
            return Advance::AtLastStep;
        }
        self.sequencer.advance();
        Advance::Moved
    }

    /// Move back one step without validating.
    pub fn back(&mut self) -> Back {
        if self.sequencer.is_first_step() {
            return Back::LeaveForm;
        }
        self.sequencer.retreat();
        Back::Moved
    }

    /// Jump to `step` without validating (review-page "edit" links).
    pub fn go_to(&mut self, step: usize) -> Result<(), StepError> {
        self.sequencer.jump_to(step)
    }

    /// Clear the record and errors and return to the first step.
    pub fn reset(&mut self) {
        self.record.clear();
        self.engine.clear_errors(None);
        self.sequencer.reset();
        self.submitting = false;
    }

    // ─── Submission ──────────────────────────────────────────────────

    /// Validate the whole record and, when valid, mark a submission in
    /// flight and hand back the record to send.
    pub fn begin_submission(&mut self) -> Result<FormRecord, SubmissionBlocked> {
        if self.submitting {
            return Err(SubmissionBlocked::InProgress);
        }
        if !self.engine.validate(&self.record, None) {
            return Err(SubmissionBlocked::Invalid(self.engine.errors().clone()));
        }
        self.submitting = true;
        Ok(self.record.clone())
    }

    /// Apply the endpoint's verdict and clear the in-flight flag.
    ///
    /// On rejection the cursor moves to the first step holding a rejected
    /// field, if any step declares one.
    pub fn finish_submission(&mut self, outcome: SubmissionOutcome) {
        self.submitting = false;
        match outcome {
            SubmissionOutcome::Accepted { .. } => self.reset(),
            SubmissionOutcome::Rejected(messages) => {
                self.engine.apply_server_errors(&messages);
                if let Some(step) = self.first_step_with_error() {
                    let _ = self.sequencer.jump_to(step);
                }
            }
            SubmissionOutcome::Failed(_) => {}
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────

    /// The form data.
    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    /// The current value of `field`.
    pub fn value(&self, field: &str) -> &FieldValue {
        self.record.get(field)
    }

    /// The current error map.
    pub fn errors(&self) -> &ValidationErrors {
        self.engine.errors()
    }

    /// The current message for `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.engine.error(field)
    }

    /// The step layout.
    pub fn steps(&self) -> &[FormStep] {
        &self.steps
    }

    /// The step under the cursor.
    pub fn current(&self) -> &FormStep {
        // The sequencer cursor is always < steps.len().
        &self.steps[self.sequencer.current_step()]
    }

    /// The step cursor.
    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    /// The validation engine.
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    /// Position summary for a progress indicator.
    pub fn progress(&self) -> StepProgress {
        self.sequencer.progress()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn first_step_with_error(&self) -> Option<usize> {
        let errors = self.engine.errors();
        self.steps
            .iter()
            .position(|step| step.fields.iter().any(|f| errors.contains(f)))
    }
}
