//! # Mail Delivery
//!
//! The [`Mailer`] seam between the endpoint and the email provider.
//!
//! - [`ResendMailer`] posts to the Resend HTTP API
//!   (`POST {base}/emails`, bearer key) and returns the provider's id.
//! - [`LogMailer`] only records the message through `tracing` and returns
//!   a fresh UUID. Used when no API key is configured.

use std::time::Duration;

use async_trait::async_trait;
use quote_domain::EmailMessage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub message: EmailMessage,
}

/// Delivery failures.
#[derive(Error, Debug)]
pub enum MailError {
    /// HTTP transport error.
    #[error("HTTP error sending email: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers quote emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `envelope`, returning the delivery id.
    async fn send(&self, envelope: &Envelope) -> Result<String, MailError>;
}

// -- LogMailer ----------------------------------------------------------------

/// Records messages to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, envelope: &Envelope) -> Result<String, MailError> {
        let id = Uuid::new_v4().to_string();
        tracing::info!(
            %id,
            to = %envelope.to,
            reply_to = %envelope.message.reply_to,
            subject = %envelope.message.subject,
            "quote email logged (no provider configured)"
        );
        Ok(id)
    }
}

// -- ResendMailer -------------------------------------------------------------

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: String,
}

/// Sends through the Resend HTTP API.
///
/// Custom `Debug` implementation redacts the API key.
#[derive(Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ResendMailer {
    /// Create a mailer for the API at `base_url`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, envelope: &Envelope) -> Result<String, MailError> {
        let body = ResendEmail {
            from: &envelope.from,
            to: [&envelope.to],
            subject: &envelope.message.subject,
            html: &envelope.message.html,
            reply_to: &envelope.message.reply_to,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status, body });
        }

        let sent: ResendResponse = resp.json().await?;
        Ok(sent.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> Envelope {
        Envelope {
            from: "Forms <forms@example.com>".into(),
            to: "owner@example.com".into(),
            message: EmailMessage {
                subject: "New Project Request from Alice".into(),
                html: "<h2>hi</h2>".into(),
                reply_to: "alice@example.com".into(),
            },
        }
    }

    #[tokio::test]
    async fn log_mailer_returns_uuid() {
        let id = LogMailer.send(&envelope()).await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn resend_endpoint_and_debug() {
        let mailer = ResendMailer::new("https://api.resend.com/", "re_secret").unwrap();
        assert_eq!(mailer.endpoint, "https://api.resend.com/emails");
        assert!(!format!("{mailer:?}").contains("re_secret"));
    }

    #[test]
    fn envelope_serialises_flat() {
        let json = serde_json::to_value(envelope()).unwrap();
        assert_eq!(json["to"], "owner@example.com");
        assert_eq!(json["subject"], "New Project Request from Alice");
    }
}
