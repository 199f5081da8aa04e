//! # Application State
//!
//! Shared state for the Axum application, passed to the handler and the
//! rate-limit middleware via the `State` extractor.
//!
//! AppState holds the service configuration, the per-IP rate limiter, and
//! the [`Mailer`] that delivers accepted requests. All three are cheap to
//! clone; the limiter's table sits behind an `Arc`.

use std::sync::Arc;

use url::Url;

use crate::mailer::{LogMailer, Mailer, ResendMailer};
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};

// -- Configuration ------------------------------------------------------------

/// Service configuration.
///
/// Custom `Debug` implementation redacts the `resend_api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Recipient of every quote email, also quoted in the 429 message.
    pub mail_to: String,
    /// Sender shown on quote emails.
    pub mail_from: String,
    /// Resend API key. `None` selects the log-only mailer.
    pub resend_api_key: Option<String>,
    /// Resend API base URL.
    pub resend_api_url: String,
    /// Per-IP request limits.
    pub rate_limit: RateLimitConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("mail_to", &self.mail_to)
            .field("mail_from", &self.mail_from)
            .field(
                "resend_api_key",
                &self.resend_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("resend_api_url", &self.resend_api_url)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            mail_to: DEFAULT_MAIL_TO.into(),
            mail_from: DEFAULT_MAIL_FROM.into(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_URL.into(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

const DEFAULT_MAIL_TO: &str = "luka@sunny-stack.com";
const DEFAULT_MAIL_FROM: &str = "Sunny Stack Forms <forms@sunny-stack.com>";
const DEFAULT_RESEND_URL: &str = "https://api.resend.com";

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `QUOTE_MAIL_TO` (default: `luka@sunny-stack.com`)
    /// - `QUOTE_MAIL_FROM` (default: `Sunny Stack Forms <forms@sunny-stack.com>`)
    /// - `RESEND_API_KEY` (optional; absent means emails are only logged)
    /// - `RESEND_API_URL` (default: `https://api.resend.com`)
    /// - `QUOTE_RATE_PER_MINUTE` (default: 10)
    /// - `QUOTE_RATE_PER_HOUR` (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let resend_api_url = match lookup("RESEND_API_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidUrl("RESEND_API_URL".into(), e.to_string())
                })?;
                raw
            }
            None => defaults.resend_api_url,
        };

        Ok(Self {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            mail_to: lookup("QUOTE_MAIL_TO").unwrap_or(defaults.mail_to),
            mail_from: lookup("QUOTE_MAIL_FROM").unwrap_or(defaults.mail_from),
            resend_api_key: lookup("RESEND_API_KEY").filter(|k| !k.trim().is_empty()),
            resend_api_url,
            rate_limit: RateLimitConfig {
                per_minute: parse_var(
                    &lookup,
                    "QUOTE_RATE_PER_MINUTE",
                    defaults.rate_limit.per_minute,
                )?,
                per_hour: parse_var(&lookup, "QUOTE_RATE_PER_HOUR", defaults.rate_limit.per_hour)?,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(var.to_string(), raw)),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("failed to build mail client: {0}")]
    MailClient(String),
}

// -- AppState -----------------------------------------------------------------

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub limiter: RateLimiter,
    pub mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Default configuration with the log-only mailer.
    pub fn new() -> Self {
        Self::with_mailer(AppConfig::default(), Arc::new(LogMailer))
    }

    /// State with an explicit mailer.
    pub fn with_mailer(config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let limiter = RateLimiter::new(config.rate_limit.clone());
        Self {
            config: Arc::new(config),
            limiter,
            mailer,
        }
    }

    /// State for `config`, choosing the Resend mailer when a key is set.
    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        let mailer: Arc<dyn Mailer> = match &config.resend_api_key {
            Some(key) => Arc::new(
                ResendMailer::new(&config.resend_api_url, key)
                    .map_err(|e| ConfigError::MailClient(e.to_string()))?,
            ),
            None => {
                tracing::warn!("RESEND_API_KEY not set; quote emails will only be logged");
                Arc::new(LogMailer)
            }
        };
        Ok(Self::with_mailer(config, mailer))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
