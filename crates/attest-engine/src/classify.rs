//! # Status Classification
//!
//! Computes the four-state status of a single control from its
//! expected-answer contract and the current answers.
//!
//! Plain controls walk the full ladder (pending → error/warning →
//! success). Checklist controls are binary — pending or success — since
//! a checklist has no correct answer, only completion.
//!
//! The classifier is total: malformed or missing fields degrade to the
//! most permissive interpretation rather than raising.

use attest_core::answers::{checklist_key, checklist_or_key, detail_key};
use attest_core::{AnswerMap, ControlStatus};
use attest_schema::{ChecklistItem, Control};

/// Classify a control against the current answers.
pub fn classify(control: &Control, answers: &AnswerMap) -> ControlStatus {
    if let Some(items) = &control.checklist_items {
        return classify_checklist(&control.id, items, answers);
    }

    let Some(answer) = answers.get(&control.id).filter(|v| !v.is_empty()) else {
        return ControlStatus::Pending;
    };

    // No expected answer (or "N/A"): any answer satisfies the control.
    let Some(required) = control.required_answer() else {
        return ControlStatus::Success;
    };

    if answer != required {
        return ControlStatus::Error;
    }

    if control.detail_required {
        let detail = answers.get(&detail_key(&control.id)).unwrap_or("");
        if detail.trim().is_empty() {
            return ControlStatus::Warning;
        }
    }

    ControlStatus::Success
}

/// Classify a checklist control: success once every plain item is
/// checked and every OR group has at least one checked sub-item.
///
/// Note rows and the free-text "other" field never influence status.
pub fn classify_checklist(
    control_id: &str,
    items: &[ChecklistItem],
    answers: &AnswerMap,
) -> ControlStatus {
    for (i, item) in items.iter().enumerate() {
        if let Some(subs) = item.or_items() {
            // An empty OR group is vacuously satisfied.
            if subs.is_empty() {
                continue;
            }
            let any_checked = (0..subs.len())
                .any(|j| answers.is_checked(&checklist_or_key(control_id, i, j)));
            if !any_checked {
                return ControlStatus::Pending;
            }
        } else if item.is_checkbox() && !answers.is_checked(&checklist_key(control_id, i)) {
            return ControlStatus::Pending;
        }
    }
    ControlStatus::Success
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
