//! # quote-cli: CLI Tool for the Quote Stack
//!
//! Provides the `quote` command-line interface.
//!
//! ## Subcommands
//!
//! - `quote validate`: Run the server-side validators on a request document.
//! - `quote template`: Write the technical requirements template.
//! - `quote submit`: Validate locally, then post to the send-quote endpoint.
//!
//! ```bash
//! quote validate request.json
//! quote validate request.json --step contact
//! quote template --out requirements.md
//! quote submit request.json --url https://quotes.example.com
//! ```
//!
//! Request documents are the JSON bodies the endpoint accepts, tagged by
//! `formType`.

pub mod submit;
pub mod template;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use quote_core::ValidationErrors;
use quote_domain::QuoteRequest;

/// Read and decode a request document.
pub fn load_request(path: &Path) -> Result<QuoteRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    QuoteRequest::from_json(value)
        .with_context(|| format!("{} is not a quote request", path.display()))
}

/// Print one `field: message` line per entry.
pub(crate) fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        println!("  {field}: {message}");
    }
}
