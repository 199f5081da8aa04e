//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure of the send-quote endpoint maps to one variant, and the
//! JSON bodies are the ones the browser form already understands:
//!
//! ```json
//! { "error": "Validation failed",
//!   "details": "Please check the following fields and try again:",
//!   "validationErrors": [{ "field": "email", "message": "..." }] }
//! ```
//!
//! Delivery failures never expose the provider's message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quote_core::{FieldMessage, QuoteError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
    /// Additional context, when there is any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Field-level failures, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldMessage>>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Per-IP rate limit exceeded (429). Carries the address to email instead.
    #[error("rate limit exceeded")]
    RateLimited { contact: String },

    /// `formType` missing or not one of the two forms (400).
    #[error("invalid form type: {0:?}")]
    InvalidFormType(String),

    /// Body was not JSON or did not match the request shape (400).
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Server-side validation failed (400).
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldMessage>),

    /// The mailer could not deliver (500). Message is logged, not returned.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl AppError {
    /// Return the HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidFormType(_) | Self::InvalidBody(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        match self {
            Self::RateLimited { contact } => ErrorBody {
                error: format!("Too many requests. Please email directly at {contact}"),
                details: None,
                validation_errors: None,
            },
            Self::InvalidFormType(_) => ErrorBody {
                error: "Invalid form type".into(),
                details: Some(r#"Form type must be either "guided" or "technical""#.into()),
                validation_errors: None,
            },
            Self::InvalidBody(_) => ErrorBody {
                error: "Invalid request body".into(),
                details: None,
                validation_errors: None,
            },
            Self::Validation(messages) => ErrorBody {
                error: "Validation failed".into(),
                details: Some("Please check the following fields and try again:".into()),
                validation_errors: Some(messages),
            },
            Self::Delivery(_) => ErrorBody {
                error: "Failed to send email".into(),
                details: None,
                validation_errors: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Delivery(_) => tracing::error!(error = %self, "email delivery failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }

        (status, Json(self.body())).into_response()
    }
}

/// Convert request decoding errors to API errors.
impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::UnknownFormType(form_type) => Self::InvalidFormType(form_type),
            other => Self::InvalidBody(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_status_and_message() {
        let err = AppError::RateLimited {
            contact: "ops@example.com".into(),
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            err.body().error,
            "Too many requests. Please email directly at ops@example.com"
        );
    }

    #[test]
    fn client_errors_are_bad_request() {
        assert_eq!(
            AppError::InvalidFormType("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidBody("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn delivery_hides_provider_message() {
        let err = AppError::Delivery("api key revoked".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.body();
        assert_eq!(body.error, "Failed to send email");
        assert!(body.details.is_none());
    }

    #[test]
    fn validation_body_serialises_camel_case() {
        let body = AppError::Validation(vec![FieldMessage::new("name", "Name is required")]).body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["validationErrors"][0]["field"], "name");
        assert_eq!(json["details"], "Please check the following fields and try again:");
    }

    #[test]
    fn unknown_form_type_converts() {
        let err: AppError = QuoteError::UnknownFormType("express".into()).into();
        assert!(matches!(err, AppError::InvalidFormType(t) if t == "express"));
    }
}
