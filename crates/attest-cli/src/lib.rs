//! # attest-cli — Inspection Tooling
//!
//! Subcommand handlers for the `attest` binary. Each handler loads the
//! relevant schema and answer files, runs the engine, and prints JSON to
//! stdout; the binary in `main.rs` owns argument parsing and logging.

pub mod files;
pub mod inspect;
pub mod processes;

pub use inspect::{run_compile, run_rating, run_score, CompileArgs, RatingArgs, ScoreArgs};
pub use processes::{run_processes, ProcessesArgs};
