//! # Answer Maps
//!
//! A process's answers are a flat `id → string` map. Three key families
//! share the namespace: the primary answer key (the control id itself),
//! a free-text companion (`{id}_detail`), and checklist-item keys
//! (`{id}__ci_{i}`, doubly indexed `{id}__ci_{i}_{j}` for OR-group
//! sub-items) plus a free-text other key (`{id}__other`).
//!
//! Values are opaque strings. Only [`YES`] and [`NO`] carry
//! classification meaning; [`CHECKED`] marks a ticked checklist box;
//! everything else is detail text.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The affirmative answer value.
pub const YES: &str = "Yes";

/// The negative answer value.
pub const NO: &str = "No";

/// Expected-answer sentinel meaning "any answer is acceptable".
pub const NOT_APPLICABLE: &str = "N/A";

/// The value a ticked checklist checkbox stores.
pub const CHECKED: &str = "true";

/// The free-text companion key for a control requiring detail.
pub fn detail_key(id: &str) -> String {
    format!("{id}_detail")
}

/// The key for checklist item `i` of a control.
pub fn checklist_key(id: &str, i: usize) -> String {
    format!("{id}__ci_{i}")
}

/// The key for sub-item `j` inside OR-group item `i` of a control.
pub fn checklist_or_key(id: &str, i: usize, j: usize) -> String {
    format!("{id}__ci_{i}_{j}")
}

/// The free-text "other" key of a checklist control. Never affects status.
pub fn other_key(id: &str) -> String {
    format!("{id}__other")
}

/// The answers recorded for one process.
///
/// Backed by a `BTreeMap` for deterministic iteration and serialization.
/// The engine never mutates a map it is handed; mutation happens at the
/// caller's edit boundary, with [`AnswerMap::merge`] expressing the
/// last-write-wins policy of the debounced autosave.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, String>);

impl AnswerMap {
    /// An empty answer map (the state at process start).
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw answer for an id, if present.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Whether the id has a non-empty answer.
    ///
    /// Empty strings count as unanswered: the UI clears a toggle by
    /// writing `""` rather than deleting the key.
    pub fn answered(&self, id: &str) -> bool {
        self.get(id).is_some_and(|v| !v.is_empty())
    }

    /// Whether the answer at `id` is exactly [`YES`].
    pub fn is_yes(&self, id: &str) -> bool {
        self.get(id) == Some(YES)
    }

    /// Whether the checklist box at `key` is ticked.
    pub fn is_checked(&self, key: &str) -> bool {
        self.get(key) == Some(CHECKED)
    }

    /// Record an answer.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    /// Remove an answer, returning the previous value.
    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.0.remove(id)
    }

    /// Merge `incoming` over this map, last write wins per key.
    pub fn merge(&mut self, incoming: AnswerMap) {
        self.0.extend(incoming.0);
    }

    /// Number of recorded answers (including empty-string ones).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no answers have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(id, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
