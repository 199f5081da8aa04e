//! # Quote Validators
//!
//! Whole-form and per-step validation of the wire records. Every validator
//! works on a sanitised copy, so `"<b></b>"` counts as blank and tags do not
//! count towards length limits.
//!
//! Each field reports at most one message. Checks run in the order listed
//! below and the first failure for a field is kept.
//!
//! ## Guided form
//!
//! | Field                | Checks                                          |
//! |----------------------|-------------------------------------------------|
//! | `name`               | required, ≤ 50                                  |
//! | `email`              | required, email format                          |
//! | `projectType`        | required                                        |
//! | `timeline`, `budget` | required                                        |
//! | `company`            | ≤ 50 when given                                 |
//! | `projectDescription` | ≤ 1000                                          |
//!
//! ## Technical form
//!
//! Eight required fields, an email format check on `contactEmail`, a
//! phone format check on `phone` when given, and length limits of 50
//! (names) or 1000 (free text).

use quote_core::ValidationErrors;

use crate::request::{GuidedQuote, QuoteRequest, TechnicalQuote};
use crate::sanitize::{is_valid_email, is_valid_phone, validate_length, validate_required};
use crate::types::GuidedStep;

/// Message for a malformed email address.
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Message for a phone number without 10 to 15 digits.
pub const INVALID_PHONE: &str = "Please enter a valid phone number";

/// Maximum length of names.
pub const NAME_MAX: usize = 50;

/// Maximum length of free-text fields.
pub const TEXT_MAX: usize = 1000;

/// Minimum length of the guided project description.
pub const DESCRIPTION_MIN: usize = 10;

// ─── Guided ──────────────────────────────────────────────────────────

/// Validate the fields collected on one page of the guided form.
pub fn validate_guided_step(step: GuidedStep, quote: &GuidedQuote) -> ValidationErrors {
    let q = quote.sanitized();
    let mut errors = ValidationErrors::new();

    match step {
        GuidedStep::Contact => {
            if q.name.is_empty() {
                errors.insert("name", "Name is required");
            } else if q.name.chars().count() > NAME_MAX {
                errors.insert("name", "Name must be 50 characters or less");
            }

            if q.email.is_empty() {
                errors.insert("email", "Email is required");
            } else if !is_valid_email(&q.email) {
                errors.insert("email", INVALID_EMAIL);
            }

            if q.company.chars().count() > NAME_MAX {
                errors.insert("company", "Company name must be 50 characters or less");
            }
        }
        GuidedStep::ProjectType => {
            if q.project_type.is_empty() {
                errors.insert("projectType", "Please select a project type");
            }
        }
        GuidedStep::Description => {
            let len = q.project_description.chars().count();
            if len == 0 {
                errors.insert("projectDescription", "Project description is required");
            } else if len < DESCRIPTION_MIN {
                errors.insert("projectDescription", "Please provide at least 10 characters");
            } else if len > TEXT_MAX {
                errors.insert(
                    "projectDescription",
                    "Description must be 1000 characters or less",
                );
            }
        }
        GuidedStep::Features => {
            if q.features.is_empty() {
                errors.insert("features", "Please select at least one feature");
            }
        }
        GuidedStep::Timeline => {
            if q.timeline.is_empty() {
                errors.insert("timeline", "Please select a timeline");
            }
        }
        GuidedStep::Budget => {
            if q.budget.is_empty() {
                errors.insert("budget", "Please select a budget range");
            }
        }
        GuidedStep::Review => {}
    }

    errors
}

/// Validate a complete guided submission.
pub fn validate_guided_form(quote: &GuidedQuote) -> ValidationErrors {
    let q = quote.sanitized();
    let mut errors = ValidationErrors::new();
    let mut check = |field: &str, message: Option<String>| {
        if let Some(message) = message {
            errors.insert_if_absent(field, message);
        }
    };

    check("name", validate_required(&q.name, "Name"));
    check("email", validate_required(&q.email, "Email"));
    check("projectType", validate_required(&q.project_type, "Project Type"));
    check("timeline", validate_required(&q.timeline, "Timeline"));
    check("budget", validate_required(&q.budget, "Budget"));

    if !q.email.is_empty() && !is_valid_email(&q.email) {
        check("email", Some(INVALID_EMAIL.to_string()));
    }

    check("name", validate_length(&q.name, NAME_MAX, "Name"));
    if !q.company.is_empty() {
        check("company", validate_length(&q.company, NAME_MAX, "Company"));
    }
    check(
        "projectDescription",
        validate_length(&q.project_description, TEXT_MAX, "Project Description"),
    );

    errors
}

// ─── Technical ───────────────────────────────────────────────────────

/// Validate a complete technical submission.
pub fn validate_technical_form(quote: &TechnicalQuote) -> ValidationErrors {
    let q = quote.sanitized();
    let mut errors = ValidationErrors::new();

    let required: [(&str, &str, &str); 8] = [
        ("contactName", &q.contact_name, "Contact Name"),
        ("contactEmail", &q.contact_email, "Contact Email"),
        ("projectName", &q.project_name, "Project Name"),
        ("projectType", &q.project_type, "Project Type"),
        ("projectDescription", &q.project_description, "Project Description"),
        ("features", &q.features, "Features & Functionality"),
        ("timeline", &q.timeline, "Timeline"),
        ("budget", &q.budget, "Budget Range"),
    ];
    for (field, value, label) in required {
        if let Some(message) = validate_required(value, label) {
            errors.insert_if_absent(field, message);
        }
    }

    if !q.contact_email.is_empty() && !is_valid_email(&q.contact_email) {
        errors.insert_if_absent("contactEmail", INVALID_EMAIL);
    }

    if !q.phone.is_empty() && !is_valid_phone(&q.phone) {
        errors.insert_if_absent("phone", INVALID_PHONE);
    }

    let limits: [(&str, &str, usize, &str); 8] = [
        ("contactName", &q.contact_name, NAME_MAX, "Contact Name"),
        ("companyName", &q.company_name, NAME_MAX, "Company Name"),
        ("projectName", &q.project_name, NAME_MAX, "Project Name"),
        ("projectDescription", &q.project_description, TEXT_MAX, "Project Description"),
        ("features", &q.features, TEXT_MAX, "Features & Functionality"),
        ("targetAudience", &q.target_audience, TEXT_MAX, "Target Audience"),
        ("integrations", &q.integrations, TEXT_MAX, "Integrations"),
        ("additionalNotes", &q.additional_notes, TEXT_MAX, "Additional Notes"),
    ];
    for (field, value, max, label) in limits {
        if let Some(message) = validate_length(value, max, label) {
            errors.insert_if_absent(field, message);
        }
    }

    errors
}

/// Validate either request shape.
pub fn validate_request(request: &QuoteRequest) -> ValidationErrors {
    let errors = match request {
        QuoteRequest::Guided(q) => validate_guided_form(q),
        QuoteRequest::Technical(q) => validate_technical_form(q),
    };
    if !errors.is_empty() {
        tracing::debug!(
            form_type = %request.mode(),
            failed = errors.len(),
            "quote request failed validation"
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guided() -> GuidedQuote {
        GuidedQuote {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            company: String::new(),
            project_type: "webapp".into(),
            project_description: "A booking system for a small clinic".into(),
            features: vec!["User accounts/login".into()],
            timeline: "1month".into(),
            budget: "5k-10k".into(),
        }
    }

    fn technical() -> TechnicalQuote {
        TechnicalQuote {
            contact_name: "Bob".into(),
            contact_email: "bob@example.com".into(),
            project_name: "Inventory".into(),
            project_type: "webapp".into(),
            project_description: "Warehouse inventory tracking".into(),
            features: "Barcode scanning, reports".into(),
            timeline: "3months".into(),
            budget: "10k-25k".into(),
            ..Default::default()
        }
    }

    // ── guided steps ─────────────────────────────────────────────────

    #[test]
    fn contact_step_messages() {
        let mut q = guided();
        q.name = "   ".into();
        q.email = "alice@".into();
        q.company = "x".repeat(51);
        let errors = validate_guided_step(GuidedStep::Contact, &q);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
        assert_eq!(
            errors.get("company"),
            Some("Company name must be 50 characters or less")
        );
    }

    #[test]
    fn contact_step_tag_only_name_is_blank() {
        let mut q = guided();
        q.name = "<b></b>".into();
        let errors = validate_guided_step(GuidedStep::Contact, &q);
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn description_step_bounds() {
        let mut q = guided();
        q.project_description = "short".into();
        assert_eq!(
            validate_guided_step(GuidedStep::Description, &q).get("projectDescription"),
            Some("Please provide at least 10 characters")
        );
        q.project_description = "x".repeat(1001);
        assert_eq!(
            validate_guided_step(GuidedStep::Description, &q).get("projectDescription"),
            Some("Description must be 1000 characters or less")
        );
        q.project_description = String::new();
        assert_eq!(
            validate_guided_step(GuidedStep::Description, &q).get("projectDescription"),
            Some("Project description is required")
        );
    }

    #[test]
    fn selection_steps() {
        let q = GuidedQuote::default();
        assert_eq!(
            validate_guided_step(GuidedStep::ProjectType, &q).get("projectType"),
            Some("Please select a project type")
        );
        assert_eq!(
            validate_guided_step(GuidedStep::Features, &q).get("features"),
            Some("Please select at least one feature")
        );
        assert_eq!(
            validate_guided_step(GuidedStep::Timeline, &q).get("timeline"),
            Some("Please select a timeline")
        );
        assert_eq!(
            validate_guided_step(GuidedStep::Budget, &q).get("budget"),
            Some("Please select a budget range")
        );
        assert!(validate_guided_step(GuidedStep::Review, &q).is_empty());
    }

    #[test]
    fn step_only_reports_its_own_fields() {
        let errors = validate_guided_step(GuidedStep::Timeline, &GuidedQuote::default());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["timeline"]);
    }

    // ── guided form ──────────────────────────────────────────────────

    #[test]
    fn valid_guided_form() {
        assert!(validate_guided_form(&guided()).is_empty());
    }

    #[test]
    fn empty_guided_form() {
        let errors = validate_guided_form(&GuidedQuote::default());
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["name", "email", "projectType", "timeline", "budget"]
        );
        assert_eq!(errors.get("projectType"), Some("Project Type is required"));
    }

    #[test]
    fn guided_length_limits() {
        let mut q = guided();
        q.name = "n".repeat(51);
        q.company = "c".repeat(51);
        q.project_description = "d".repeat(1001);
        let errors = validate_guided_form(&q);
        assert_eq!(errors.get("name"), Some("Name must be 50 characters or less"));
        assert_eq!(errors.get("company"), Some("Company must be 50 characters or less"));
        assert_eq!(
            errors.get("projectDescription"),
            Some("Project Description must be 1000 characters or less")
        );
    }

    #[test]
    fn guided_invalid_email() {
        let mut q = guided();
        q.email = "not an email".into();
        assert_eq!(validate_guided_form(&q).get("email"), Some(INVALID_EMAIL));
    }

    // ── technical form ───────────────────────────────────────────────

    #[test]
    fn valid_technical_form() {
        assert!(validate_technical_form(&technical()).is_empty());
    }

    #[test]
    fn empty_technical_form_uses_labels() {
        let errors = validate_technical_form(&TechnicalQuote::default());
        assert_eq!(errors.len(), 8);
        assert_eq!(errors.get("contactName"), Some("Contact Name is required"));
        assert_eq!(
            errors.get("features"),
            Some("Features & Functionality is required")
        );
        assert_eq!(errors.get("budget"), Some("Budget Range is required"));
    }

    #[test]
    fn technical_optional_limits() {
        let mut q = technical();
        q.company_name = "c".repeat(51);
        q.additional_notes = "n".repeat(1001);
        let errors = validate_technical_form(&q);
        assert_eq!(
            errors.get("companyName"),
            Some("Company Name must be 50 characters or less")
        );
        assert_eq!(
            errors.get("additionalNotes"),
            Some("Additional Notes must be 1000 characters or less")
        );
    }

    #[test]
    fn technical_phone_is_optional_but_checked() {
        let mut q = technical();
        q.phone = "+44 20 7123 4567".into();
        assert!(validate_technical_form(&q).is_empty());

        q.phone = "123".into();
        assert_eq!(
            validate_technical_form(&q).get("phone"),
            Some(INVALID_PHONE)
        );

        q.phone = "<b></b>".into();
        assert!(validate_technical_form(&q).is_empty());
    }

    #[test]
    fn request_dispatches_on_form_type() {
        let request = QuoteRequest::Technical(TechnicalQuote::default());
        assert_eq!(validate_request(&request).len(), 8);
        assert!(validate_request(&QuoteRequest::Guided(guided())).is_empty());
    }
}
