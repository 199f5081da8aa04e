//! # Quote Wizard
//!
//! The top-level flow around the two forms:
//!
//! ```text
//!   Selection ──select_mode(Guided)────▶ Guided (seven steps)
//!       │                                   │ back() on first step
//!       │◀──────────────────────────────────┘
//!       │
//!       └──select_mode(Technical)──▶ Technical
//!                                      Choice ◀──▶ Form
//!                                         ▲
//!                                         └──────▶ Download
//! ```
//!
//! Returning to selection discards both forms' state. An accepted
//! submission does the same.

use std::sync::Arc;

use quote_form::{
    Advance, Back, Diagnostics, FormController, StepError, SubmissionBlocked, SubmissionOutcome,
    TracingDiagnostics,
};
use thiserror::Error;

use crate::request::QuoteRequest;
use crate::schema::{guided_controller, technical_controller};
use crate::templates::requirements_document;
use crate::types::{FormMode, TechnicalView};

/// Why the wizard could not produce a request to send.
#[derive(Error, Debug)]
pub enum WizardError {
    /// No form is open.
    #[error("no form is open")]
    NoActiveForm,

    /// The technical flow is showing the choice or download view.
    #[error("the technical form is not open (view: {0})")]
    FormNotOpen(TechnicalView),

    /// The controller refused to start.
    #[error(transparent)]
    Blocked(#[from] SubmissionBlocked),

    /// The record did not decode as a request.
    #[error("form record is not a valid request: {0}")]
    Record(#[from] quote_core::QuoteError),
}

/// Mode selection plus one controller per form.
#[derive(Debug, Clone)]
pub struct QuoteWizard {
    mode: FormMode,
    technical_view: TechnicalView,
    guided: FormController,
    technical: FormController,
}

impl QuoteWizard {
    /// A wizard logging through `tracing`.
    pub fn new() -> Result<Self, StepError> {
        Self::with_diagnostics(Arc::new(TracingDiagnostics::new("quote-wizard")))
    }

    /// A wizard reporting to `diagnostics`.
    pub fn with_diagnostics(diagnostics: Arc<dyn Diagnostics>) -> Result<Self, StepError> {
        Ok(Self {
            mode: FormMode::Selection,
            technical_view: TechnicalView::Choice,
            guided: guided_controller(Arc::clone(&diagnostics))?,
            technical: technical_controller(diagnostics)?,
        })
    }

    // ─── Mode ────────────────────────────────────────────────────────

    /// Enter a form. Choosing `Selection` is the same as
    /// [`back_to_selection`](Self::back_to_selection).
    pub fn select_mode(&mut self, mode: FormMode) {
        match mode {
            FormMode::Selection => self.back_to_selection(),
            FormMode::Guided => self.mode = FormMode::Guided,
            FormMode::Technical => {
                self.mode = FormMode::Technical;
                self.technical_view = TechnicalView::Choice;
            }
        }
    }

    /// Leave any form, discarding both records.
    pub fn back_to_selection(&mut self) {
        self.mode = FormMode::Selection;
        self.technical_view = TechnicalView::Choice;
        self.guided.reset();
        self.technical.reset();
    }

    /// Open the online technical form from the choice view.
    pub fn open_technical_form(&mut self) {
        if self.mode == FormMode::Technical {
            self.technical_view = TechnicalView::Form;
        }
    }

    /// Switch to the download view and return the template to save.
    pub fn open_download(&mut self) -> Option<&'static str> {
        if self.mode != FormMode::Technical {
            return None;
        }
        self.technical_view = TechnicalView::Download;
        Some(requirements_document())
    }

    /// Return from the form or download view to the technical choice.
    pub fn back_to_choice(&mut self) {
        if self.mode == FormMode::Technical {
            self.technical_view = TechnicalView::Choice;
        }
    }

    // ─── Navigation ──────────────────────────────────────────────────

    /// Move forward in the open form.
    pub fn next(&mut self) -> Option<Advance> {
        self.controller_mut().map(FormController::next)
    }

    /// Move back one level: a step, a technical view, or out to selection.
    pub fn back(&mut self) {
        match self.mode {
            FormMode::Selection => {}
            FormMode::Guided => {
                if self.guided.back() == Back::LeaveForm {
                    self.back_to_selection();
                }
            }
            FormMode::Technical => match self.technical_view {
                TechnicalView::Choice => self.back_to_selection(),
                TechnicalView::Form | TechnicalView::Download => self.back_to_choice(),
            },
        }
    }

    // ─── Submission ──────────────────────────────────────────────────

    /// Validate the open form and build the request to send.
    pub fn begin_submission(&mut self) -> Result<QuoteRequest, WizardError> {
        let mode = self.mode;
        let controller = match mode {
            FormMode::Selection => return Err(WizardError::NoActiveForm),
            FormMode::Guided => &mut self.guided,
            FormMode::Technical if self.technical_view != TechnicalView::Form => {
                return Err(WizardError::FormNotOpen(self.technical_view));
            }
            FormMode::Technical => &mut self.technical,
        };
        let record = controller.begin_submission()?;
        match QuoteRequest::from_record(mode, &record) {
            Ok(request) => Ok(request),
            Err(e) => {
                controller.finish_submission(SubmissionOutcome::Failed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Apply the endpoint's verdict. Acceptance returns to selection.
    ///
    /// The verdict reaches the mode's controller even when the technical
    /// flow has moved off the form view while the request was in flight.
    pub fn finish_submission(&mut self, outcome: SubmissionOutcome) {
        let accepted = matches!(outcome, SubmissionOutcome::Accepted { .. });
        let controller = match self.mode {
            FormMode::Selection => None,
            FormMode::Guided => Some(&mut self.guided),
            FormMode::Technical => Some(&mut self.technical),
        };
        if let Some(controller) = controller {
            controller.finish_submission(outcome);
        }
        if accepted {
            self.back_to_selection();
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn technical_view(&self) -> TechnicalView {
        self.technical_view
    }

    /// The controller of the open form, if one is open.
    pub fn controller(&self) -> Option<&FormController> {
        match (self.mode, self.technical_view) {
            (FormMode::Guided, _) => Some(&self.guided),
            (FormMode::Technical, TechnicalView::Form) => Some(&self.technical),
            _ => None,
        }
    }

    /// Mutable access to the open form's controller.
    pub fn controller_mut(&mut self) -> Option<&mut FormController> {
        match (self.mode, self.technical_view) {
            (FormMode::Guided, _) => Some(&mut self.guided),
            (FormMode::Technical, TechnicalView::Form) => Some(&mut self.technical),
            _ => None,
        }
    }
}
