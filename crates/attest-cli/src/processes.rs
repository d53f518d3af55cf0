//! # Process Relevance Subcommand
//!
//! Expands the scoping answers over the introduction's derivations and
//! lists which catalog processes apply.

use std::path::PathBuf;

use clap::Args;

use attest_engine::{expand, relevance};
use attest_schema::{IntroductionForm, ProcessCatalog};

use crate::files::{read_answers, read_json};

/// Arguments for `attest processes`.
#[derive(Args, Debug)]
pub struct ProcessesArgs {
    /// Path to the process catalog JSON.
    #[arg(long)]
    pub catalog: PathBuf,

    /// Path to the introduction form JSON (for derivation rules).
    #[arg(long)]
    pub introduction: Option<PathBuf>,

    /// Path to the scoping answers JSON.
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Include gated-out entries, flagged, instead of filtering them.
    #[arg(long)]
    pub all: bool,
}

/// List catalog processes and their relevance.
pub fn run_processes(args: &ProcessesArgs) -> anyhow::Result<()> {
    let catalog: ProcessCatalog = read_json(&args.catalog)?;
    let base = read_answers(args.answers.as_ref())?;

    let expanded = match &args.introduction {
        Some(path) => {
            let intro: IntroductionForm = read_json(path)?;
            expand(&base, &intro.derived)
        }
        None => base,
    };

    let listing: Vec<serde_json::Value> = relevance(&catalog, &expanded)
        .into_iter()
        .filter(|p| args.all || p.relevant)
        .map(|p| {
            serde_json::json!({
                "id": p.entry.id,
                "title": p.entry.title,
                "relevant": p.relevant,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
