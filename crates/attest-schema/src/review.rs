//! # Review Annotations
//!
//! Per-control reviewer comments keyed by control id. These are an
//! injected, read-only lookup the compiler attaches to rendered nodes
//! for display; they never participate in status computation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a reviewer note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSeverity {
    /// Reviewed and signed off.
    Approved,
    /// Informational remark.
    Info,
    /// Needs attention.
    Warning,
    /// Incorrect mapping or wording.
    Error,
}

/// A reviewer comment on one control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlNote {
    /// Comment text.
    pub comment: String,
    /// Severity.
    pub severity: NoteSeverity,
}

/// Review metadata for one form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewMetadata {
    /// The form this review covers.
    #[serde(default)]
    pub form_id: String,

    /// When the review was last touched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Form-level remarks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,

    /// Per-control notes keyed by control id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub control_notes: BTreeMap<String, ControlNote>,
}

impl ReviewMetadata {
    /// The note for a control, if any.
    pub fn note_for(&self, control_id: &str) -> Option<&ControlNote> {
        self.control_notes.get(control_id)
    }
}
