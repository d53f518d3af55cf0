//! # Process Gating
//!
//! The thin policy layer deciding which processes are relevant to an
//! organisation: a catalog entry is relevant iff it is ungated or the
//! expanded introduction answers say `"Yes"` at its gating control.
//! The same primitive decides whether an assessment may be completed
//! ("all relevant processes rate green") and whether an embedded
//! cross-form link or a sub-scoped question set is shown.

use attest_core::{AnswerMap, Rating};
use attest_schema::{FormLink, ProcessCatalog, ProcessEntry, ProcessForm, SubScopingEntry};

/// The conventional id of a form's existence-gate control.
///
/// A form carrying this control asks "does this process exist for your
/// organisation?" before anything else; answering `"No"` ends the form.
pub const EXISTENCE_CONTROL: &str = "process-exists";

/// Whether a catalog entry is relevant given the expanded introduction
/// answers.
pub fn is_relevant(entry: &ProcessEntry, expanded: &AnswerMap) -> bool {
    match entry.gated_by.as_deref() {
        None => true,
        Some(gate) => expanded.is_yes(gate),
    }
}

/// A catalog entry paired with its relevance.
///
/// The full listing backs the unfiltered view, where irrelevant entries
/// still appear (dimmed, per caller policy).
#[derive(Debug, Clone)]
pub struct ProcessRelevance<'a> {
    /// The catalog entry.
    pub entry: &'a ProcessEntry,
    /// Whether the entry passes its gate.
    pub relevant: bool,
}

/// Relevance of every catalog entry, in catalog order.
pub fn relevance<'a>(
    catalog: &'a ProcessCatalog,
    expanded: &AnswerMap,
) -> Vec<ProcessRelevance<'a>> {
    catalog
        .iter()
        .map(|entry| ProcessRelevance {
            relevant: is_relevant(entry, expanded),
            entry,
        })
        .collect()
}

/// Only the relevant entries — the "relevant to me" view.
pub fn relevant_entries<'a>(
    catalog: &'a ProcessCatalog,
    expanded: &AnswerMap,
) -> Vec<&'a ProcessEntry> {
    catalog
        .iter()
        .filter(|entry| is_relevant(entry, expanded))
        .collect()
}

/// Whether a cross-form link is currently shown.
pub fn link_visible(link: &FormLink, answers: &AnswerMap) -> bool {
    match link.gated_by.as_deref() {
        None => true,
        Some(gate) => answers.is_yes(gate),
    }
}

/// Whether any sub-scoping option is selected.
///
/// A form with sub-scoping shows its scoped questions only once at
/// least one sub-type applies.
pub fn sub_scope_selected(sub_scoping: &[SubScopingEntry], answers: &AnswerMap) -> bool {
    sub_scoping.iter().any(|sub| answers.is_yes(&sub.id))
}

/// Whether the form's process exists for the organisation.
///
/// Forms without an existence control exist unconditionally; with one,
/// only an explicit `"Yes"` confirms existence.
pub fn process_exists(form: &ProcessForm, answers: &AnswerMap) -> bool {
    form.control(EXISTENCE_CONTROL).is_none() || answers.is_yes(EXISTENCE_CONTROL)
}

/// Whether every relevant process rates green.
///
/// `rating_for` resolves the current rating of a process by id — the
/// caller computes it from that process's answers via
/// [`crate::aggregate::form_rating`]. False when nothing is relevant:
/// an assessment with no applicable processes cannot be completed.
pub fn assessment_complete(
    catalog: &ProcessCatalog,
    expanded: &AnswerMap,
    mut rating_for: impl FnMut(&str) -> Rating,
) -> bool {
    let relevant = relevant_entries(catalog, expanded);
    !relevant.is_empty() && relevant.iter().all(|entry| rating_for(&entry.id).is_green())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProcessCatalog {
        serde_json::from_str(
            r#"{
                "processList": [
                    {"id": "risk-assessment", "title": "Risk Assessment"},
                    {"id": "cdd-trusts", "title": "CDD: Trusts", "gatedBy": "intro-q1"},
                    {"id": "pep-screening", "title": "PEP Screening", "gatedBy": "intro-q2"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn ungated_entries_are_always_relevant() {
        let catalog = catalog();
        let entry = catalog.entry("risk-assessment").unwrap();
        assert!(is_relevant(entry, &AnswerMap::new()));
    }

    #[test]
    fn gated_entry_needs_an_explicit_yes() {
        let catalog = catalog();
        let entry = catalog.entry("cdd-trusts").unwrap();
        assert!(!is_relevant(entry, &AnswerMap::new()));

        let no: AnswerMap = [("intro-q1", "No")].into_iter().collect();
        assert!(!is_relevant(entry, &no));

        let yes: AnswerMap = [("intro-q1", "Yes")].into_iter().collect();
        assert!(is_relevant(entry, &yes));
    }

    #[test]
    fn filtered_view_drops_gated_out_entries_but_listing_keeps_them() {
        let catalog = catalog();
        let expanded: AnswerMap = [("intro-q1", "No"), ("intro-q2", "Yes")].into_iter().collect();

        let filtered = relevant_entries(&catalog, &expanded);
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["risk-assessment", "pep-screening"]);

        // The unfiltered listing keeps catalog order and flags relevance.
        let all = relevance(&catalog, &expanded);
        assert_eq!(all.len(), 3);
        assert!(all[0].relevant);
        assert!(!all[1].relevant);
        assert!(all[2].relevant);
    }

    #[test]
    fn completion_requires_every_relevant_process_green() {
        let catalog = catalog();
        let expanded: AnswerMap = [("intro-q1", "Yes")].into_iter().collect();

        // cdd-trusts is relevant and red: not complete.
        assert!(!assessment_complete(&catalog, &expanded, |id| {
            if id == "cdd-trusts" { Rating::Red } else { Rating::Green }
        }));

        // Everything relevant green: complete. pep-screening is gated
        // out, so its rating never matters.
        assert!(assessment_complete(&catalog, &expanded, |id| {
            assert_ne!(id, "pep-screening");
            Rating::Green
        }));
    }

    #[test]
    fn completion_is_false_with_nothing_relevant() {
        let catalog: ProcessCatalog = serde_json::from_str(
            r#"{"processList": [{"id": "only", "title": "Only", "gatedBy": "never"}]}"#,
        )
        .unwrap();
        assert!(!assessment_complete(&catalog, &AnswerMap::new(), |_| Rating::Green));
    }

    #[test]
    fn link_gating() {
        let link: FormLink = serde_json::from_str(
            r#"{"target": "pep-screening", "label": "PEP", "gated_by": "has-peps"}"#,
        )
        .unwrap();
        assert!(!link_visible(&link, &AnswerMap::new()));
        let answers: AnswerMap = [("has-peps", "Yes")].into_iter().collect();
        assert!(link_visible(&link, &answers));

        let ungated: FormLink =
            serde_json::from_str(r#"{"target": "pep-screening", "label": "PEP"}"#).unwrap();
        assert!(link_visible(&ungated, &AnswerMap::new()));
    }

    #[test]
    fn sub_scope_selection() {
        let subs: Vec<SubScopingEntry> = serde_json::from_str(
            r#"[{"id": "sub-a", "label": "A"}, {"id": "sub-b", "label": "B"}]"#,
        )
        .unwrap();
        assert!(!sub_scope_selected(&subs, &AnswerMap::new()));
        let answers: AnswerMap = [("sub-b", "Yes")].into_iter().collect();
        assert!(sub_scope_selected(&subs, &answers));
        // A cleared toggle writes "" and deselects.
        let cleared: AnswerMap = [("sub-b", "")].into_iter().collect();
        assert!(!sub_scope_selected(&subs, &cleared));
    }

    #[test]
    fn existence_gate() {
        let form: ProcessForm = serde_json::from_str(
            r#"{"controls": [{"id": "process-exists", "label": "Exists?"}]}"#,
        )
        .unwrap();
        assert!(!process_exists(&form, &AnswerMap::new()));
        let yes: AnswerMap = [("process-exists", "Yes")].into_iter().collect();
        assert!(process_exists(&form, &yes));

        let without: ProcessForm = serde_json::from_str(r#"{"controls": []}"#).unwrap();
        assert!(process_exists(&without, &AnswerMap::new()));
    }
}
