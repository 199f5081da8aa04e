//! Client error types.

/// Errors from calling the quote API.
///
/// Endpoint verdicts (acceptance, rejection, rate limiting) are not errors;
/// they come back as a [`quote_form::SubmissionOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Response body was not the expected JSON.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// The form refused to start a submission.
    #[error("submission blocked: {0}")]
    Blocked(#[from] quote_form::SubmissionBlocked),
    /// The form record did not decode as a request.
    #[error("invalid request: {0}")]
    Request(#[from] quote_core::QuoteError),
}
