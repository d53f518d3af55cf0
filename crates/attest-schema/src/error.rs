//! # Schema Errors
//!
//! Structured errors for loading schema definitions. All variants carry
//! the offending path so a misauthored form is diagnosable from the log
//! line alone. Evaluation itself never produces these — a schema that
//! parses is always evaluable.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the schema source.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying serde error.
        source: serde_json::Error,
    },

    /// A required schema file was not found.
    #[error("schema file not found: {path}")]
    NotFound {
        /// The missing file.
        path: PathBuf,
    },

    /// A process id that cannot name a schema file.
    #[error("invalid process id {id:?}")]
    InvalidProcessId {
        /// The offending id.
        id: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
