//! # Quote Request Wire Records
//!
//! The JSON bodies posted to `/api/send-quote`. Field names are camelCase
//! to match the browser form, and the two shapes are distinguished by a
//! `formType` tag:
//!
//! ```json
//! { "formType": "guided", "name": "...", "email": "...", "features": ["..."] }
//! { "formType": "technical", "contactName": "...", "features": "..." }
//! ```
//!
//! Every field defaults to empty so partially filled documents still parse;
//! completeness is the validators' concern, not the decoder's.

use quote_core::{FormRecord, QuoteError, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sanitize::{sanitize_html, sanitize_optional};
use crate::types::FormMode;
use crate::validate;

/// A guided-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidedQuote {
    pub name: String,
    pub email: String,
    pub company: String,
    pub project_type: String,
    pub project_description: String,
    pub features: Vec<String>,
    pub timeline: String,
    pub budget: String,
}

impl GuidedQuote {
    /// A copy with tags stripped and whitespace trimmed from every field.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_html(&self.name),
            email: sanitize_html(&self.email),
            company: sanitize_optional(&self.company),
            project_type: sanitize_html(&self.project_type),
            project_description: sanitize_html(&self.project_description),
            features: self.features.iter().map(|f| sanitize_html(f)).collect(),
            timeline: sanitize_html(&self.timeline),
            budget: sanitize_html(&self.budget),
        }
    }
}

/// A technical-requirements submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalQuote {
    pub contact_name: String,
    pub contact_email: String,
    pub company_name: String,
    pub phone: String,
    pub project_name: String,
    pub project_type: String,
    pub project_description: String,
    pub target_audience: String,
    pub primary_goals: String,
    pub tech_stack: String,
    pub hosting_preference: String,
    pub budget: String,
    pub timeline: String,
    pub features: String,
    pub integrations: String,
    pub design_status: String,
    pub additional_notes: String,
}

impl TechnicalQuote {
    /// A copy with tags stripped and whitespace trimmed from every field.
    pub fn sanitized(&self) -> Self {
        Self {
            contact_name: sanitize_html(&self.contact_name),
            contact_email: sanitize_html(&self.contact_email),
            company_name: sanitize_optional(&self.company_name),
            phone: sanitize_optional(&self.phone),
            project_name: sanitize_html(&self.project_name),
            project_type: sanitize_html(&self.project_type),
            project_description: sanitize_html(&self.project_description),
            target_audience: sanitize_optional(&self.target_audience),
            primary_goals: sanitize_optional(&self.primary_goals),
            tech_stack: sanitize_optional(&self.tech_stack),
            hosting_preference: sanitize_optional(&self.hosting_preference),
            budget: sanitize_html(&self.budget),
            timeline: sanitize_html(&self.timeline),
            features: sanitize_html(&self.features),
            integrations: sanitize_optional(&self.integrations),
            design_status: sanitize_optional(&self.design_status),
            additional_notes: sanitize_optional(&self.additional_notes),
        }
    }
}

/// Either submission shape, tagged by `formType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "formType", rename_all = "lowercase")]
pub enum QuoteRequest {
    Guided(GuidedQuote),
    Technical(TechnicalQuote),
}

impl QuoteRequest {
    /// Decode a request body, distinguishing an unknown `formType` from a
    /// malformed document.
    pub fn from_json(value: Value) -> Result<Self, QuoteError> {
        let form_type = value
            .get("formType")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match form_type.as_str() {
            "guided" | "technical" => Ok(serde_json::from_value(value)?),
            _ => Err(QuoteError::UnknownFormType(form_type.clone())),
        }
    }

    /// Build a request from a form controller's record.
    ///
    /// `Missing` values are treated as absent fields.
    pub fn from_record(mode: FormMode, record: &FormRecord) -> Result<Self, QuoteError> {
        let mut object = serde_json::Map::new();
        for (field, value) in record.iter().filter(|(_, v)| !v.is_missing()) {
            object.insert(field.to_string(), serde_json::to_value(value)?);
        }
        object.insert("formType".into(), Value::String(mode.as_str().into()));
        Self::from_json(Value::Object(object))
    }

    /// The record a form controller would hold for this request.
    pub fn to_record(&self) -> Result<FormRecord, QuoteError> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("formType");
        }
        FormRecord::from_json(value)
    }

    /// Which form produced this request.
    pub fn mode(&self) -> FormMode {
        match self {
            Self::Guided(_) => FormMode::Guided,
            Self::Technical(_) => FormMode::Technical,
        }
    }

    /// A copy with every field sanitised.
    pub fn sanitized(&self) -> Self {
        match self {
            Self::Guided(q) => Self::Guided(q.sanitized()),
            Self::Technical(q) => Self::Technical(q.sanitized()),
        }
    }

    /// The submitter's email address.
    pub fn reply_to(&self) -> &str {
        match self {
            Self::Guided(q) => &q.email,
            Self::Technical(q) => &q.contact_email,
        }
    }

    /// The submitter's name.
    pub fn contact_name(&self) -> &str {
        match self {
            Self::Guided(q) => &q.name,
            Self::Technical(q) => &q.contact_name,
        }
    }

    /// Server-side validation of the whole request.
    pub fn validate(&self) -> ValidationErrors {
        validate::validate_request(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::FieldValue;
    use serde_json::json;

    #[test]
    fn decodes_guided_body() {
        let body = json!({
            "formType": "guided",
            "name": "Alice",
            "email": "alice@example.com",
            "projectType": "webapp",
            "features": ["Admin dashboard"],
            "timeline": "asap",
            "budget": "5k-10k"
        });
        let request = QuoteRequest::from_json(body).unwrap();
        assert_eq!(request.mode(), FormMode::Guided);
        assert_eq!(request.contact_name(), "Alice");
        assert_eq!(request.reply_to(), "alice@example.com");
        match request {
            QuoteRequest::Guided(q) => {
                assert_eq!(q.features, vec!["Admin dashboard"]);
                assert_eq!(q.company, "");
            }
            other => panic!("expected guided, got {other:?}"),
        }
    }

    #[test]
    fn unknown_form_type() {
        let err = QuoteRequest::from_json(json!({"formType": "express"})).unwrap_err();
        assert!(matches!(err, QuoteError::UnknownFormType(t) if t == "express"));
        let err = QuoteRequest::from_json(json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, QuoteError::UnknownFormType(t) if t.is_empty()));
    }

    #[test]
    fn wrong_field_shape_is_serialization_error() {
        let err = QuoteRequest::from_json(json!({"formType": "guided", "features": "all"}))
            .unwrap_err();
        assert!(matches!(err, QuoteError::Serialization(_)));
    }

    #[test]
    fn serialises_with_tag_and_camel_case() {
        let request = QuoteRequest::Technical(TechnicalQuote {
            contact_name: "Bob".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["formType"], "technical");
        assert_eq!(value["contactName"], "Bob");
    }

    #[test]
    fn sanitized_strips_tags() {
        let request = QuoteRequest::Guided(GuidedQuote {
            name: "<b>Alice</b>".into(),
            features: vec![" <i>Search functionality</i> ".into()],
            ..Default::default()
        });
        let QuoteRequest::Guided(q) = request.sanitized() else {
            panic!("mode changed");
        };
        assert_eq!(q.name, "Alice");
        assert_eq!(q.features, vec!["Search functionality"]);
    }

    #[test]
    fn record_round_trip() {
        let record = FormRecord::new()
            .with("name", "Alice")
            .with("email", "alice@example.com")
            .with("features", vec!["File uploads".to_string()])
            .with("company", FieldValue::Missing);
        let request = QuoteRequest::from_record(FormMode::Guided, &record).unwrap();
        assert_eq!(request.contact_name(), "Alice");

        let back = request.to_record().unwrap();
        assert_eq!(back.get("name"), &FieldValue::text("Alice"));
        assert_eq!(
            back.get("features"),
            &FieldValue::List(vec!["File uploads".into()])
        );
    }

    #[test]
    fn selection_mode_has_no_request() {
        let err = QuoteRequest::from_record(FormMode::Selection, &FormRecord::new()).unwrap_err();
        assert!(matches!(err, QuoteError::UnknownFormType(_)));
    }
}
