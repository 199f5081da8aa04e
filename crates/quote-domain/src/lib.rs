//! # quote-domain: Quote Request Domain
//!
//! Everything specific to the project-quote forms, layered on the generic
//! engine in `quote-form`:
//!
//! - **Types** (`types.rs`): project type, timeline, and budget options,
//!   the feature checklist, form modes, and guided step identifiers.
//!
//! - **Wire records** (`request.rs`): the guided and technical submissions
//!   as posted to the endpoint, tagged by `formType`.
//!
//! - **Validation** (`sanitize.rs`, `validate.rs`, `schema.rs`): tag
//!   stripping and format checks, the authoritative server-side validators,
//!   and the same rules as `quote-form` schemas for live feedback.
//!
//! - **Wizard** (`wizard.rs`): mode selection and the technical flow's
//!   choice/form/download views around the two form controllers.
//!
//! - **Templates** (`templates.rs`): the downloadable requirements document
//!   and the notification email.

pub mod request;
pub mod sanitize;
pub mod schema;
pub mod templates;
pub mod types;
pub mod validate;
pub mod wizard;

pub use request::{GuidedQuote, QuoteRequest, TechnicalQuote};
pub use schema::{
    guided_controller, guided_schema, guided_steps, technical_controller, technical_schema,
};
pub use templates::{render_email, requirements_document, EmailMessage, REQUIREMENTS_FILE_NAME};
pub use types::{Budget, FormMode, GuidedStep, ProjectType, TechnicalView, Timeline, FEATURE_OPTIONS};
pub use validate::{validate_guided_form, validate_guided_step, validate_request, validate_technical_form};
pub use wizard::{QuoteWizard, WizardError};
