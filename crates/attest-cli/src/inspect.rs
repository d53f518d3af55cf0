//! # Form Inspection Subcommands
//!
//! `compile` renders a form's tree with visibility and statuses
//! resolved; `score` reduces one subtree to its score triple and
//! rating; `rating` reports the process-level signal plus progress.

use std::path::PathBuf;

use clap::Args;

use attest_engine::{answer_schema, compile, form_progress, form_rating, rating_of, score_of};
use attest_schema::{ProcessForm, ReviewMetadata};

use crate::files::{read_answers, read_json};

/// Arguments for `attest compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Path to the process form JSON.
    #[arg(long)]
    pub form: PathBuf,

    /// Path to the form's answers JSON.
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Path to the expanded introduction answers JSON.
    #[arg(long)]
    pub intro_answers: Option<PathBuf>,

    /// Path to review metadata JSON to attach as notes.
    #[arg(long)]
    pub review: Option<PathBuf>,

    /// Emit the answer-schema properties object instead of the tree.
    #[arg(long)]
    pub answer_schema: bool,
}

/// Render a form as its compiled tree (or its answer schema).
pub fn run_compile(args: &CompileArgs) -> anyhow::Result<()> {
    let form: ProcessForm = read_json(&args.form)?;

    if args.answer_schema {
        println!("{}", serde_json::to_string_pretty(&answer_schema(&form))?);
        return Ok(());
    }

    let answers = read_answers(args.answers.as_ref())?;
    let intro = read_answers(args.intro_answers.as_ref())?;
    let review: Option<ReviewMetadata> = match &args.review {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    let tree = compile(&form, &answers, &intro, review.as_ref());
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

/// Arguments for `attest score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the process form JSON.
    #[arg(long)]
    pub form: PathBuf,

    /// The group or control id to score.
    #[arg(long)]
    pub node: String,

    /// Path to the form's answers JSON.
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Path to the expanded introduction answers JSON.
    #[arg(long)]
    pub intro_answers: Option<PathBuf>,
}

/// Score one subtree of a form.
pub fn run_score(args: &ScoreArgs) -> anyhow::Result<()> {
    let form: ProcessForm = read_json(&args.form)?;
    let answers = read_answers(args.answers.as_ref())?;
    let intro = read_answers(args.intro_answers.as_ref())?;

    let score = score_of(&args.node, &form.controls, &form.rules, &answers, &intro);
    let rating = rating_of(&args.node, &form.controls, &form.rules, &answers, &intro);
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "node": args.node,
            "compliant": score.compliant,
            "total": score.total,
            "score": score.score,
            "rating": rating,
        }))?
    );
    Ok(())
}

/// Arguments for `attest rating`.
#[derive(Args, Debug)]
pub struct RatingArgs {
    /// Path to the process form JSON.
    #[arg(long)]
    pub form: PathBuf,

    /// Path to the form's answers JSON.
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Path to the expanded introduction answers JSON.
    #[arg(long)]
    pub intro_answers: Option<PathBuf>,
}

/// Report a form's process-level rating and answer progress.
pub fn run_rating(args: &RatingArgs) -> anyhow::Result<()> {
    let form: ProcessForm = read_json(&args.form)?;
    let answers = read_answers(args.answers.as_ref())?;
    let intro = read_answers(args.intro_answers.as_ref())?;

    let rating = form_rating(&form, &answers, &intro);
    let progress = form_progress(&form, &answers, &intro);
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "rating": rating,
            "answered": progress.answered,
            "total": progress.total,
            "percent": progress.percent(),
        }))?
    );
    Ok(())
}
