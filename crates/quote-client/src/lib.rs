//! # quote-client -- Typed client for the send-quote endpoint
//!
//! Posts a [`QuoteRequest`] to `{base_url}/api/send-quote` and turns the
//! response into the [`SubmissionOutcome`] a [`FormController`] consumes:
//!
//! | Response                                  | Outcome                  |
//! |-------------------------------------------|--------------------------|
//! | 2xx `{"success": true, "id": ...}`        | `Accepted { id }`        |
//! | 429                                       | `Failed("rate limited")` |
//! | 4xx with `validationErrors`               | `Rejected(entries)`      |
//! | anything else                             | `Failed(error text)`     |
//!
//! Transport failures are a [`ClientError`], not an outcome.

pub mod config;
pub mod error;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;

use std::time::Duration;

use quote_core::FieldMessage;
use quote_domain::{FormMode, QuoteRequest};
use quote_form::{FormController, SubmissionOutcome};
use reqwest::StatusCode;
use serde_json::Value;

const SEND_QUOTE: &str = "POST /api/send-quote";

/// Client for the quote API.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl QuoteClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Submit a request.
    ///
    /// Calls `POST {base_url}/api/send-quote`.
    pub async fn submit(&self, request: &QuoteRequest) -> Result<SubmissionOutcome, ClientError> {
        let url = format!("{}/api/send-quote", self.base_url.as_str().trim_end_matches('/'));

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: SEND_QUOTE.into(),
                source: e,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| ClientError::Deserialization {
            endpoint: SEND_QUOTE.into(),
            source: e,
        })?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        let outcome = outcome_for(status, &body);
        tracing::debug!(status = status.as_u16(), ?outcome, "send-quote responded");
        Ok(outcome)
    }
}

fn outcome_for(status: StatusCode, body: &Value) -> SubmissionOutcome {
    let error_text = || {
        body.get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    };

    if status.is_success() {
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return SubmissionOutcome::Accepted { id };
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return SubmissionOutcome::Failed(format!("rate limited: {}", error_text()));
    }
    if status.is_client_error() {
        let entries = body
            .get("validationErrors")
            .cloned()
            .and_then(|v| serde_json::from_value::<Vec<FieldMessage>>(v).ok());
        if let Some(entries) = entries.filter(|e| !e.is_empty()) {
            return SubmissionOutcome::Rejected(entries);
        }
    }
    SubmissionOutcome::Failed(error_text())
}

/// Run a full submission for `controller`: validate and build the request,
/// send it, and apply the verdict.
///
/// The in-flight flag is cleared even when the transport fails.
pub async fn submit_form(
    controller: &mut FormController,
    mode: FormMode,
    client: &QuoteClient,
) -> Result<SubmissionOutcome, ClientError> {
    let record = controller.begin_submission()?;
    let sent = match QuoteRequest::from_record(mode, &record) {
        Ok(request) => client.submit(&request).await,
        Err(e) => {
            controller.finish_submission(SubmissionOutcome::Failed(e.to_string()));
            return Err(e.into());
        }
    };
    match sent {
        Ok(outcome) => {
            controller.finish_submission(outcome.clone());
            Ok(outcome)
        }
        Err(e) => {
            controller.finish_submission(SubmissionOutcome::Failed(e.to_string()));
            Err(e)
        }
    }
}
