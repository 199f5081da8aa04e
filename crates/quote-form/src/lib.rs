//! # quote-form: Multi-Step Form Engine
//!
//! The client-side core of the quote wizard. Two independent components and
//! the controller that composes them:
//!
//! - **Step Sequencer** (`step.rs`): a bounded cursor over a fixed number of
//!   steps with clamped forward/backward moves, range-checked jumps, and
//!   first/last queries.
//!
//! - **Field Validation Engine** (`engine.rs`, `rules.rs`): evaluates a
//!   declarative schema of ordered check variants against field values and
//!   maintains the field → message error map. Whole-record validation is
//!   authoritative; single-field validation is incremental; server-reported
//!   failures can be spliced in directly.
//!
//! - **Form Controller** (`controller.rs`): owns the record, gates step
//!   advancement on the current step's fields, and implements the submission
//!   contract (validate before sending, merge `{field, message}` failures
//!   after a rejection).
//!
//! ## Diagnostics
//!
//! Neither component logs through an ambient global. Each holds an
//! injected [`Diagnostics`] sink; [`NoopDiagnostics`] is the default and
//! [`TracingDiagnostics`] forwards events to `tracing`.
//!
//! ## Concurrency
//!
//! Every operation is synchronous. Each form instance owns its sequencer and
//! engine exclusively, so nothing here needs locking.

pub mod controller;
pub mod diagnostics;
pub mod engine;
pub mod features;
pub mod rules;
pub mod step;

pub use controller::{
    Advance, Back, FormController, FormStep, SubmissionBlocked, SubmissionOutcome,
};
pub use diagnostics::{DiagnosticEvent, Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use engine::ValidationEngine;
pub use features::{FeatureSet, OTHER_PREFIX};
pub use rules::{Check, CustomCheck, CustomOutcome, RuleError, ValidationRule, ValidationSchema};
pub use step::{StepError, StepProgress, StepSequencer};
