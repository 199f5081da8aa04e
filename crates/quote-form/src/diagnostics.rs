//! # Injected Diagnostics
//!
//! The sequencer and the validation engine report what they do through a
//! [`Diagnostics`] sink supplied at construction. Callers that want no
//! output pass [`NoopDiagnostics`]; callers that want structured logs pass
//! [`TracingDiagnostics`].

use std::fmt;

/// A notable event inside the form engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticEvent<'a> {
    /// The step cursor moved (or was asked to move and clamped in place).
    StepChanged {
        /// The operation that caused the change (`advance`, `retreat`, `jump_to`, `reset`).
        operation: &'static str,
        /// Step before the operation.
        from: usize,
        /// Step after the operation.
        to: usize,
    },
    /// A jump target outside `[0, total_steps)` was rejected.
    InvalidStep {
        /// The requested step.
        requested: usize,
        /// Number of steps in the sequence.
        total_steps: usize,
    },
    /// One field was evaluated against its rule.
    FieldValidated {
        /// Field name.
        field: &'a str,
        /// The produced message, `None` when valid.
        error: Option<&'a str>,
    },
    /// The whole error map was replaced by an authoritative validation.
    ErrorsReplaced {
        /// Number of fields checked.
        checked: usize,
        /// Number of fields that failed.
        failed: usize,
    },
    /// Error entries were removed without re-validating.
    ErrorsCleared {
        /// `None` when every entry was removed.
        fields: Option<&'a [&'a str]>,
    },
    /// A field error was set directly, bypassing rule evaluation.
    FieldErrorForced {
        /// Field name.
        field: &'a str,
        /// The forced message.
        message: &'a str,
    },
}

impl fmt::Display for DiagnosticEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepChanged { operation, from, to } => {
                write!(f, "{operation}: step {from} -> {to}")
            }
            Self::InvalidStep {
                requested,
                total_steps,
            } => write!(f, "invalid step {requested} requested (total {total_steps})"),
            Self::FieldValidated { field, error: None } => write!(f, "{field}: valid"),
            Self::FieldValidated {
                field,
                error: Some(message),
            } => write!(f, "{field}: {message}"),
            Self::ErrorsReplaced { checked, failed } => {
                write!(f, "validated {checked} fields, {failed} failed")
            }
            Self::ErrorsCleared { fields: None } => f.write_str("cleared all errors"),
            Self::ErrorsCleared { fields: Some(list) } => {
                write!(f, "cleared errors for {}", list.join(", "))
            }
            Self::FieldErrorForced { field, message } => {
                write!(f, "{field}: forced error '{message}'")
            }
        }
    }
}

/// A sink for [`DiagnosticEvent`]s.
pub trait Diagnostics: Send + Sync {
    /// Record one event.
    fn record(&self, event: &DiagnosticEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _event: &DiagnosticEvent<'_>) {}
}

/// Forwards events to `tracing`, tagged with the owning component name.
///
/// Invalid step requests are emitted at `warn`; everything else at `debug`.
#[derive(Debug, Clone, Copy)]
pub struct TracingDiagnostics {
    component: &'static str,
}

impl TracingDiagnostics {
    /// Create a sink tagged with `component` (e.g. `"guided-form"`).
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    /// The component tag.
    pub fn component(&self) -> &'static str {
        self.component
    }
}

impl Diagnostics for TracingDiagnostics {
    fn record(&self, event: &DiagnosticEvent<'_>) {
        match event {
            DiagnosticEvent::InvalidStep {
                requested,
                total_steps,
            } => {
                tracing::warn!(
                    target: "quote_form",
                    component = self.component,
                    requested,
                    total_steps,
                    "invalid step requested"
                );
            }
            other => {
                tracing::debug!(target: "quote_form", component = self.component, "{other}");
            }
        }
    }
}
