//! # Template Subcommand
//!
//! Writes the technical requirements template, the same document the
//! technical flow's download view offers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quote_domain::{requirements_document, REQUIREMENTS_FILE_NAME};

/// Arguments for the `quote template` subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Write to this file instead of stdout. A directory receives
    /// `sunny-stack-technical-requirements.md`.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Execute the template subcommand.
pub fn run_template(args: &TemplateArgs) -> Result<u8> {
    let Some(out) = &args.out else {
        print!("{}", requirements_document());
        return Ok(0);
    };

    let path = if out.is_dir() {
        out.join(REQUIREMENTS_FILE_NAME)
    } else {
        out.clone()
    };
    std::fs::write(&path, requirements_document())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(0)
}
