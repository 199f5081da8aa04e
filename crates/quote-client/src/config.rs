//! Client configuration.
//!
//! Points at the quote API. Defaults target a local server; override via
//! environment variables or explicit construction.

use url::Url;

/// Configuration for reaching the send-quote endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the quote API. Default: <http://127.0.0.1:8080>
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `QUOTE_API_URL` (default: `http://127.0.0.1:8080`)
    /// - `QUOTE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("QUOTE_API_URL", "http://127.0.0.1:8080")?,
            timeout_secs: std::env::var("QUOTE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// A configuration for `base_url` with the default timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            timeout_secs: 30,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("QUOTE_NONEXISTENT_VAR_12345", "http://127.0.0.1:8080").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let err = ClientConfig::with_base_url("not a url").unwrap_err();
        assert!(err.to_string().starts_with("invalid URL for base_url"));
    }
}
