//! # Core Error Types
//!
//! The evaluator itself is total — it degrades rather than fails — so
//! errors here are confined to parsing externally supplied strings into
//! core enums.

use thiserror::Error;

/// Errors from parsing core primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name a known control status.
    #[error("unknown control status: {0:?}")]
    UnknownStatus(String),

    /// A string did not name a known rating.
    #[error("unknown rating: {0:?}")]
    UnknownRating(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_value() {
        let err = CoreError::UnknownRating("purple".to_string());
        assert!(format!("{err}").contains("purple"));
    }
}
