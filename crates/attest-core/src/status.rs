//! # Control Statuses and Compliance Ratings
//!
//! Two derived signals express compliance state at different
//! granularities:
//!
//! - [`ControlStatus`] — the four-state status of a single control,
//!   recomputed from the current answers on every read.
//! - [`Rating`] — the red/yellow/green aggregate over a subtree or a
//!   whole process, derived from a score and an error scan.
//!
//! Neither is ever persisted; callers store answers, not statuses.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ControlStatus
// ---------------------------------------------------------------------------

/// The status of a single control given the current answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    /// No answer recorded yet.
    Pending,
    /// Answered acceptably (and any required detail provided).
    Success,
    /// Answered acceptably but the required detail text is missing.
    Warning,
    /// The answer contradicts the expected answer.
    Error,
}

impl ControlStatus {
    /// Whether this status counts toward the compliant tally.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether this status forces a red rating on every ancestor.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl std::fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

impl FromStr for ControlStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// The aggregate red/yellow/green compliance signal for a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Below half compliant, or at least one wrong answer in the subtree.
    Red,
    /// At least half compliant and nothing wrong, but not complete.
    Yellow,
    /// Fully compliant with no wrong answers.
    Green,
}

impl Rating {
    /// Derive a rating from an aggregate score and an error scan.
    ///
    /// A single error status anywhere in the subtree forces red
    /// regardless of the score.
    pub fn from_score(score: f64, any_error: bool) -> Self {
        if any_error || score < 0.5 {
            Rating::Red
        } else if score >= 1.0 {
            Rating::Green
        } else {
            Rating::Yellow
        }
    }

    /// Whether this rating satisfies the "process complete" bar.
    pub fn is_green(&self) -> bool {
        matches!(self, Self::Green)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        };
        f.write_str(s)
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            other => Err(CoreError::UnknownRating(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
