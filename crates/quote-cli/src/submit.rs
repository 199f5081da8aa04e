//! # Submit Subcommand
//!
//! Validates a request document locally, then posts it to the send-quote
//! endpoint and reports the verdict. Nothing is sent when local validation
//! fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quote_client::{ClientConfig, QuoteClient};
use quote_form::SubmissionOutcome;

/// Arguments for the `quote submit` subcommand.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Request document (JSON with a `formType` of guided or technical).
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// API base URL. Overrides `QUOTE_API_URL`.
    #[arg(long)]
    pub url: Option<String>,
}

/// Execute the submit subcommand.
///
/// Returns exit code: 0 when accepted, 1 when rejected locally or remotely.
pub async fn run_submit(args: &SubmitArgs) -> Result<u8> {
    let request = crate::load_request(&args.path)?;

    let errors = request.validate();
    if !errors.is_empty() {
        println!(
            "FAIL: {}: {} error(s), not submitted",
            args.path.display(),
            errors.len()
        );
        crate::print_errors(&errors);
        return Ok(1);
    }

    let config = match &args.url {
        Some(url) => ClientConfig::with_base_url(url)?,
        None => ClientConfig::from_env()?,
    };
    tracing::debug!(base_url = %config.base_url, "submitting quote request");
    let client = QuoteClient::new(config)?;

    let outcome = client
        .submit(&request.sanitized())
        .await
        .context("send-quote request failed")?;

    match outcome {
        SubmissionOutcome::Accepted { id } => {
            println!("Submitted: {id}");
            Ok(0)
        }
        SubmissionOutcome::Rejected(messages) => {
            println!("Rejected by server: {} error(s)", messages.len());
            for m in &messages {
                println!("  {}: {}", m.field, m.message);
            }
            Ok(1)
        }
        SubmissionOutcome::Failed(reason) => {
            println!("Failed: {reason}");
            Ok(1)
        }
    }
}
