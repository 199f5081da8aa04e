//! # Send-Quote Endpoint
//!
//! `POST /api/send-quote` accepts either quote form, tagged by `formType`:
//!
//! ```text
//! rate limit (middleware) → decode → validate → sanitise → render → deliver
//! ```
//!
//! Every admitted request counts against the caller's rate limit, including
//! ones that later fail decoding or validation.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use quote_domain::{render_email, QuoteRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::mailer::Envelope;
use crate::state::AppState;

/// Success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendQuoteResponse {
    pub success: bool,
    pub id: String,
}

/// Build the quote router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/send-quote", post(send_quote))
}

/// POST /api/send-quote: Deliver a quote request.
async fn send_quote(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SendQuoteResponse>, AppError> {
    let Json(body) = body.map_err(|e| AppError::InvalidBody(e.body_text()))?;
    let request = QuoteRequest::from_json(body)?;

    let errors = request.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_messages()));
    }

    let request = request.sanitized();
    let envelope = Envelope {
        from: state.config.mail_from.clone(),
        to: state.config.mail_to.clone(),
        message: render_email(&request),
    };

    let id = state
        .mailer
        .send(&envelope)
        .await
        .map_err(|e| AppError::Delivery(e.to_string()))?;

    tracing::info!(%id, form_type = %request.mode(), "quote request delivered");
    Ok(Json(SendQuoteResponse { success: true, id }))
}
