//! # Step Sequencer
//!
//! A bounded cursor over the pages of a multi-step form.
//!
//! ## States
//!
//! ```text
//!   reset ┌──────────────────────────────────────┐
//!         ▼                                      │
//!         0 ──advance──▶ 1 ──advance──▶ … ──▶ N-1 ─┘  (advance at N-1 clamps)
//!         ▲◀──retreat──  ◀──retreat──   …          (retreat at 0 clamps)
//!         └────────────── jump_to(k), 0 ≤ k < N ──────────┘
//! ```
//!
//! There is no terminal state: the last step is a query, and the sequencer
//! can still be reset or jumped from it. The only failure is a jump outside
//! `[0, N)`, which leaves the cursor unchanged and is reported both as a
//! [`StepError`] and as a diagnostic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::{DiagnosticEvent, Diagnostics, NoopDiagnostics};

/// Errors from sequencer construction and navigation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// A sequence needs at least one step.
    #[error("a step sequence needs at least one step")]
    NoSteps,

    /// A jump target outside `[0, total_steps)`.
    #[error("step {requested} is out of range (total steps: {total_steps})")]
    OutOfRange {
        /// The requested step.
        requested: usize,
        /// Number of steps in the sequence.
        total_steps: usize,
    },
}

/// Position summary for a progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepProgress {
    /// 1-based step number ("Step 3 of 7").
    pub step_number: usize,
    /// Number of steps.
    pub total_steps: usize,
    /// Completion percentage, `step_number / total_steps * 100`.
    pub percent: f64,
}

/// A cursor in `[0, total_steps - 1]`.
#[derive(Clone)]
pub struct StepSequencer {
    current_step: usize,
    total_steps: usize,
    diagnostics: Arc<dyn Diagnostics>,
}

impl std::fmt::Debug for StepSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSequencer")
            .field("current_step", &self.current_step)
            .field("total_steps", &self.total_steps)
            .finish_non_exhaustive()
    }
}

impl StepSequencer {
    /// Create a sequencer at step 0.
    pub fn new(total_steps: usize) -> Result<Self, StepError> {
        Self::with_diagnostics(total_steps, Arc::new(NoopDiagnostics))
    }

    /// Create a sequencer at step 0 reporting to `diagnostics`.
    pub fn with_diagnostics(
        total_steps: usize,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self, StepError> {
        if total_steps == 0 {
            return Err(StepError::NoSteps);
        }
        Ok(Self {
            current_step: 0,
            total_steps,
            diagnostics,
        })
    }

    /// Move forward one step, clamping at the last step.
    pub fn advance(&mut self) {
        let next = (self.current_step + 1).min(self.last_index());
        self.move_to("advance", next);
    }

    /// Move back one step, clamping at step 0.
    pub fn retreat(&mut self) {
        let prev = self.current_step.saturating_sub(1);
        self.move_to("retreat", prev);
    }

    /// Jump directly to `step`.
    ///
    /// Out-of-range targets leave the cursor where it is.
    pub fn jump_to(&mut self, step: usize) -> Result<(), StepError> {
        if step >= self.total_steps {
            self.diagnostics.record(&DiagnosticEvent::InvalidStep {
                requested: step,
                total_steps: self.total_steps,
            });
            return Err(StepError::OutOfRange {
                requested: step,
                total_steps: self.total_steps,
            });
        }
        self.move_to("jump_to", step);
        Ok(())
    }

    /// Return to step 0.
    pub fn reset(&mut self) {
        self.move_to("reset", 0);
    }

    /// The current step index.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The fixed number of steps.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Whether the cursor is at step 0.
    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    /// Whether the cursor is at the last step.
    pub fn is_last_step(&self) -> bool {
        self.current_step == self.last_index()
    }

    /// Position summary for a progress indicator.
    pub fn progress(&self) -> StepProgress {
        let step_number = self.current_step + 1;
        StepProgress {
            step_number,
            total_steps: self.total_steps,
            percent: step_number as f64 / self.total_steps as f64 * 100.0,
        }
    }

    fn last_index(&self) -> usize {
        self.total_steps - 1
    }

    /// Clamped moves that leave the cursor in place record nothing.
    fn move_to(&mut self, operation: &'static str, to: usize) {
        if to == self.current_step {
            return;
        }
        self.diagnostics.record(&DiagnosticEvent::StepChanged {
            operation,
            from: self.current_step,
            to,
        });
        self.current_step = to;
    }
}
