//! # Error Types
//!
//! Top-level error type shared across the quote stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Rule violations are never errors: they are recorded as messages in a
//! `ValidationErrors` map. The variants here cover structural failures
//! (a record that is not a JSON object, a document that cannot be parsed).

use thiserror::Error;

/// Top-level error type for the quote stack.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A form record could not be built from the given JSON document.
    #[error("invalid form record: {0}")]
    InvalidRecord(String),

    /// The request names a form type other than `guided` or `technical`.
    #[error("unknown form type: {0}")]
    UnknownFormType(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_display() {
        let err = QuoteError::InvalidRecord("expected object".to_string());
        assert_eq!(err.to_string(), "invalid form record: expected object");
    }

    #[test]
    fn serde_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: QuoteError = parse.unwrap_err().into();
        assert!(matches!(err, QuoteError::Serialization(_)));
    }
}
