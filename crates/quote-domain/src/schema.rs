//! # Form Schemas and Step Layouts
//!
//! The quote forms expressed as `quote-form` schemas, so a
//! [`FormController`] gives live feedback with the same messages the
//! validators in [`crate::validate`] produce.

use std::sync::Arc;

use quote_core::FieldValue;
use quote_form::{Diagnostics, FormController, FormStep, StepError, ValidationRule, ValidationSchema};

use crate::sanitize::{is_valid_email, is_valid_phone, sanitize_html};
use crate::types::GuidedStep;
use crate::validate::{DESCRIPTION_MIN, INVALID_EMAIL, INVALID_PHONE, NAME_MAX, TEXT_MAX};

// ─── Predicates ──────────────────────────────────────────────────────
//
// Text is checked after `sanitize_html`, as the validators do, so a value
// made only of tags is blank here too.

type Predicate = Box<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => sanitize_html(text).is_empty(),
        other => !other.is_present(),
    }
}

fn filled(message: impl Into<String>) -> Predicate {
    let message = message.into();
    Box::new(move |value: &FieldValue| is_blank(value).then(|| message.clone()))
}

fn at_most(max: usize, message: impl Into<String>) -> Predicate {
    let message = message.into();
    Box::new(move |value: &FieldValue| {
        value
            .as_text()
            .filter(|text| sanitize_html(text).chars().count() > max)
            .map(|_| message.clone())
    })
}

fn email_format() -> Predicate {
    Box::new(|value: &FieldValue| {
        value
            .as_text()
            .map(sanitize_html)
            .filter(|text| !text.is_empty() && !is_valid_email(text))
            .map(|_| INVALID_EMAIL.to_string())
    })
}

fn phone_format(value: &FieldValue) -> Option<String> {
    value
        .as_text()
        .map(sanitize_html)
        .filter(|text| !text.is_empty() && !is_valid_phone(text))
        .map(|_| INVALID_PHONE.to_string())
}

fn first_failure(checks: Vec<Predicate>) -> Predicate {
    Box::new(move |value: &FieldValue| checks.iter().find_map(|check| check(value)))
}

fn guided_description(value: &FieldValue) -> Option<String> {
    let len = value
        .as_text()
        .map(|text| sanitize_html(text).chars().count())
        .unwrap_or(0);
    if len == 0 {
        Some("Project description is required".into())
    } else if len < DESCRIPTION_MIN {
        Some("Please provide at least 10 characters".into())
    } else if len > TEXT_MAX {
        Some("Description must be 1000 characters or less".into())
    } else {
        None
    }
}

fn limited(label: &str, max: usize) -> ValidationRule {
    ValidationRule::new()
        .label(label)
        .custom(at_most(max, format!("{label} must be {max} characters or less")))
}

fn required_limited(label: &str, max: usize) -> ValidationRule {
    ValidationRule::new().label(label).custom(first_failure(vec![
        filled(format!("{label} is required")),
        at_most(max, format!("{label} must be {max} characters or less")),
    ]))
}

fn required_choice(label: &str) -> ValidationRule {
    ValidationRule::new()
        .label(label)
        .custom(filled(format!("{label} is required")))
}

// ─── Guided ──────────────────────────────────────────────────────────

/// Rules for the guided form.
pub fn guided_schema() -> ValidationSchema {
    ValidationSchema::new()
        .field(
            "name",
            ValidationRule::new().label("Name").custom(first_failure(vec![
                filled("Name is required"),
                at_most(NAME_MAX, "Name must be 50 characters or less"),
            ])),
        )
        .field(
            "email",
            ValidationRule::new()
                .label("Email")
                .custom(first_failure(vec![filled("Email is required"), email_format()])),
        )
        .field(
            "company",
            ValidationRule::new().custom(at_most(
                NAME_MAX,
                "Company name must be 50 characters or less",
            )),
        )
        .field(
            "projectType",
            ValidationRule::new().custom(filled("Please select a project type")),
        )
        .field(
            "projectDescription",
            ValidationRule::new().custom(guided_description),
        )
        .field(
            "features",
            ValidationRule::new().custom(filled("Please select at least one feature")),
        )
        .field(
            "timeline",
            ValidationRule::new().custom(filled("Please select a timeline")),
        )
        .field(
            "budget",
            ValidationRule::new().custom(filled("Please select a budget range")),
        )
}

/// The seven guided pages and the fields each one gates.
pub fn guided_steps() -> Vec<FormStep> {
    GuidedStep::all()
        .iter()
        .map(|step| FormStep::new(step.as_str(), guided_step_fields(*step)))
        .collect()
}

/// Fields collected on `step`.
pub fn guided_step_fields(step: GuidedStep) -> &'static [&'static str] {
    match step {
        GuidedStep::Contact => &["name", "email", "company"],
        GuidedStep::ProjectType => &["projectType"],
        GuidedStep::Description => &["projectDescription"],
        GuidedStep::Features => &["features"],
        GuidedStep::Timeline => &["timeline"],
        GuidedStep::Budget => &["budget"],
        GuidedStep::Review => &[],
    }
}

/// A controller for the guided form.
pub fn guided_controller(diagnostics: Arc<dyn Diagnostics>) -> Result<FormController, StepError> {
    FormController::with_diagnostics(guided_steps(), guided_schema(), diagnostics)
}

// ─── Technical ───────────────────────────────────────────────────────

/// Rules for the technical form.
pub fn technical_schema() -> ValidationSchema {
    ValidationSchema::new()
        .field("contactName", required_limited("Contact Name", NAME_MAX))
        .field(
            "contactEmail",
            ValidationRule::new().label("Contact Email").custom(first_failure(vec![
                filled("Contact Email is required"),
                email_format(),
            ])),
        )
        .field("companyName", limited("Company Name", NAME_MAX))
        .field("phone", ValidationRule::new().custom(phone_format))
        .field("projectName", required_limited("Project Name", NAME_MAX))
        .field("projectType", required_choice("Project Type"))
        .field(
            "projectDescription",
            required_limited("Project Description", TEXT_MAX),
        )
        .field("targetAudience", limited("Target Audience", TEXT_MAX))
        .field(
            "features",
            required_limited("Features & Functionality", TEXT_MAX),
        )
        .field("integrations", limited("Integrations", TEXT_MAX))
        .field("timeline", required_choice("Timeline"))
        .field("budget", required_choice("Budget Range"))
        .field("additionalNotes", limited("Additional Notes", TEXT_MAX))
}

/// Fields of the single-page technical form, in display order.
pub const TECHNICAL_FIELDS: &[&str] = &[
    "contactName",
    "contactEmail",
    "companyName",
    "phone",
    "projectName",
    "projectType",
    "projectDescription",
    "targetAudience",
    "primaryGoals",
    "techStack",
    "features",
    "integrations",
    "hostingPreference",
    "timeline",
    "budget",
    "designStatus",
    "additionalNotes",
];

/// The technical form is one page.
pub fn technical_steps() -> Vec<FormStep> {
    vec![FormStep::new("requirements", TECHNICAL_FIELDS)]
}

/// A controller for the technical form.
pub fn technical_controller(
    diagnostics: Arc<dyn Diagnostics>,
) -> Result<FormController, StepError> {
    FormController::with_diagnostics(technical_steps(), technical_schema(), diagnostics)
}
