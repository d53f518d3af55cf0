//! # Process Catalog
//!
//! The ordered list of named processes a regulation comprises, each with
//! an optional gating control. A process is relevant iff it is ungated
//! or the expanded introduction answers say `"Yes"` at its gate.

use serde::{Deserialize, Serialize};

/// One process in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEntry {
    /// Process id (and answer-section key).
    pub id: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Control id gating this process's relevance, if any.
    #[serde(rename = "gatedBy", default, skip_serializing_if = "Option::is_none")]
    pub gated_by: Option<String>,
}

/// The catalog of processes for one regulation, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessCatalog {
    /// Ordered process entries.
    #[serde(rename = "processList", default)]
    pub process_list: Vec<ProcessEntry>,

    /// Whether the regulation has an introduction (scoping) form.
    #[serde(rename = "hasIntroductionForm", default)]
    pub has_introduction_form: bool,
}

impl ProcessCatalog {
    /// Look up an entry by process id.
    pub fn entry(&self, id: &str) -> Option<&ProcessEntry> {
        self.process_list.iter().find(|e| e.id == id)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessEntry> {
        self.process_list.iter()
    }
}
