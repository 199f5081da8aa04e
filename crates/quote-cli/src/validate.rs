//! # Validate Subcommand
//!
//! Runs the same validators as the send-quote endpoint on a request
//! document, either the whole form or a single guided step.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use quote_domain::{validate_guided_step, GuidedStep, QuoteRequest};

/// Arguments for the `quote validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Request document (JSON with a `formType` of guided or technical).
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Validate only one guided step (contact, projectType, description,
    /// features, timeline, budget, review).
    #[arg(long)]
    pub step: Option<GuidedStep>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when the document has errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let request = crate::load_request(&args.path)?;

    let errors = match (args.step, &request) {
        (None, _) => request.validate(),
        (Some(step), QuoteRequest::Guided(quote)) => validate_guided_step(step, quote),
        (Some(_), QuoteRequest::Technical(_)) => {
            bail!("--step applies to guided requests only")
        }
    };

    let scope = match args.step {
        Some(step) => format!("{} step {}", request.mode(), step),
        None => request.mode().to_string(),
    };

    if errors.is_empty() {
        println!("OK: {} ({scope})", args.path.display());
        return Ok(0);
    }

    println!(
        "FAIL: {} ({scope}): {} error(s)",
        args.path.display(),
        errors.len()
    );
    crate::print_errors(&errors);
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_doc(dir: &tempfile::TempDir, name: &str, body: &serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn valid_technical_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            "tech.json",
            &serde_json::json!({
                "formType": "technical",
                "contactName": "Bob",
                "contactEmail": "bob@example.com",
                "projectName": "Inventory",
                "projectType": "desktop",
                "projectDescription": "Offline-first stock tracking",
                "features": "Barcode scanning",
                "timeline": "flexible",
                "budget": "10k-25k"
            }),
        );
        let code = run_validate(&ValidateArgs { path, step: None }).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn invalid_guided_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            "guided.json",
            &serde_json::json!({"formType": "guided", "name": "Alice"}),
        );
        let code = run_validate(&ValidateArgs { path, step: None }).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn single_step_ignores_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            "guided.json",
            &serde_json::json!({
                "formType": "guided",
                "name": "Alice",
                "email": "alice@example.com"
            }),
        );
        let args = ValidateArgs {
            path,
            step: Some(GuidedStep::Contact),
        };
        assert_eq!(run_validate(&args).unwrap(), 0);
    }

    #[test]
    fn step_on_technical_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "t.json", &serde_json::json!({"formType": "technical"}));
        let args = ValidateArgs {
            path,
            step: Some(GuidedStep::Budget),
        };
        assert!(run_validate(&args).is_err());
    }

    #[test]
    fn unknown_form_type_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "x.json", &serde_json::json!({"formType": "express"}));
        assert!(run_validate(&ValidateArgs { path, step: None }).is_err());
    }
}
