//! # attest CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity maps to a tracing `EnvFilter` so
//! schema lints and compile traces surface with `-v`/`-vv`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use attest_cli::{
    run_compile, run_processes, run_rating, run_score, CompileArgs, ProcessesArgs, RatingArgs,
    ScoreArgs,
};

/// Attest form-engine inspection tool.
///
/// Compiles questionnaire schemas against answer files, scores subtrees,
/// and lists process relevance — the same evaluation the product runs,
/// from the command line.
#[derive(Parser, Debug)]
#[command(name = "attest", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a form into its rendered tree with statuses resolved.
    Compile(CompileArgs),

    /// Score one group or control subtree of a form.
    Score(ScoreArgs),

    /// Report a form's process-level rating and progress.
    Rating(RatingArgs),

    /// List catalog processes and their relevance under the scoping answers.
    Processes(ProcessesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Compile(args) => run_compile(&args),
        Commands::Score(args) => run_score(&args),
        Commands::Rating(args) => run_rating(&args),
        Commands::Processes(args) => run_processes(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
