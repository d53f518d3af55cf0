//! # Score Aggregation
//!
//! Walks a subtree and reduces it to a `(compliant, total, score)`
//! triple, feeding both the UI progress pills and the red/yellow/green
//! process rating used elsewhere in the product.
//!
//! Membership supports both hierarchy encodings: a control that declares
//! an explicit `group` belongs by equality; otherwise identifier-prefix
//! descent applies, which makes the walk inherently recursive without a
//! second traversal.
//!
//! A node with zero visible members scores `1.0` over `0` — an
//! irrelevant or fully hidden branch is vacuously complete so parent
//! rollups are not penalized by it.

use serde::{Deserialize, Serialize};

use attest_core::{is_descendant, parent_id, AnswerMap, ControlStatus, Rating};
use attest_schema::{Control, ProcessForm, Rule};

use crate::classify::classify;
use crate::gate::{process_exists, EXISTENCE_CONTROL};
use crate::visibility::is_visible;

// ---------------------------------------------------------------------------
// GroupScore
// ---------------------------------------------------------------------------

/// The aggregate compliance of one subtree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    /// Visible member controls whose status is success.
    pub compliant: u32,
    /// Visible member controls.
    pub total: u32,
    /// `compliant / total`, or `1.0` for an empty subtree.
    pub score: f64,
}

impl GroupScore {
    fn from_counts(compliant: u32, total: u32) -> Self {
        let score = if total == 0 {
            1.0
        } else {
            f64::from(compliant) / f64::from(total)
        };
        Self {
            compliant,
            total,
            score,
        }
    }
}

/// Whether a control belongs to the subtree rooted at `node_id`.
///
/// Explicit `group` references win; controls without one are members by
/// identifier-prefix descent.
fn belongs_to(control: &Control, node_id: &str) -> bool {
    match control.group.as_deref() {
        Some(group) => group == node_id,
        None => is_descendant(&control.id, node_id),
    }
}

/// Score the subtree rooted at `node_id`.
///
/// Invisible controls are excluded from all counts. Safe to call on a
/// node with zero descendants; callers never need to special-case.
pub fn score_of(
    node_id: &str,
    controls: &[Control],
    rules: &[Rule],
    answers: &AnswerMap,
    secondary: &AnswerMap,
) -> GroupScore {
    let (compliant, total, _) = tally(node_id, controls, rules, answers, secondary);
    GroupScore::from_counts(compliant, total)
}

/// Rate the subtree rooted at `node_id`.
///
/// Derived from the same walk as [`score_of`], with an error scan: a
/// single error status anywhere in the subtree forces red.
pub fn rating_of(
    node_id: &str,
    controls: &[Control],
    rules: &[Rule],
    answers: &AnswerMap,
    secondary: &AnswerMap,
) -> Rating {
    let (compliant, total, any_error) = tally(node_id, controls, rules, answers, secondary);
    Rating::from_score(GroupScore::from_counts(compliant, total).score, any_error)
}

fn tally(
    node_id: &str,
    controls: &[Control],
    rules: &[Rule],
    answers: &AnswerMap,
    secondary: &AnswerMap,
) -> (u32, u32, bool) {
    let mut compliant = 0;
    let mut total = 0;
    let mut any_error = false;
    for control in controls.iter().filter(|c| belongs_to(c, node_id)) {
        if !is_visible(&control.id, rules, answers, secondary) {
            continue;
        }
        total += 1;
        match classify(control, answers) {
            ControlStatus::Success => compliant += 1,
            ControlStatus::Error => any_error = true,
            ControlStatus::Pending | ControlStatus::Warning => {}
        }
    }
    (compliant, total, any_error)
}

// ---------------------------------------------------------------------------
// Process-level rating
// ---------------------------------------------------------------------------

/// The process-level red/yellow/green rating for a whole form.
///
/// Rolls up the root groups — those whose computed parent id is not
/// itself a group — then falls back to a flat sweep over every control
/// when the form has no groups at all.
pub fn form_rating(form: &ProcessForm, answers: &AnswerMap, secondary: &AnswerMap) -> Rating {
    let group_ids: std::collections::BTreeSet<&str> =
        form.groups.iter().map(|g| g.id.as_str()).collect();
    let roots: Vec<&str> = form
        .groups
        .iter()
        .filter(|g| parent_id(&g.id).map_or(true, |p| !group_ids.contains(p)))
        .map(|g| g.id.as_str())
        .collect();

    let mut compliant = 0;
    let mut total = 0;
    let mut any_error = false;

    if roots.is_empty() {
        for control in &form.controls {
            if !is_visible(&control.id, &form.rules, answers, secondary) {
                continue;
            }
            total += 1;
            match classify(control, answers) {
                ControlStatus::Success => compliant += 1,
                ControlStatus::Error => any_error = true,
                _ => {}
            }
        }
    } else {
        for root in roots {
            let (c, t, e) = tally(root, &form.controls, &form.rules, answers, secondary);
            compliant += c;
            total += t;
            any_error = any_error || e;
        }
    }

    Rating::from_score(GroupScore::from_counts(compliant, total).score, any_error)
}

// ---------------------------------------------------------------------------
// Form progress
// ---------------------------------------------------------------------------

/// Answered-versus-total progress over a form's visible controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormProgress {
    /// Visible controls with an answer recorded.
    pub answered: u32,
    /// Visible controls.
    pub total: u32,
}

impl FormProgress {
    /// Progress as a 0–100 percentage, rounded.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (f64::from(self.answered) * 100.0 / f64::from(self.total)).round() as u32
        }
    }

    /// Whether every visible control is answered (and there is at least one).
    pub fn complete(&self) -> bool {
        self.total > 0 && self.answered == self.total
    }
}

/// Count a form's answered and total visible controls.
///
/// When the form carries an existence control answered anything but
/// `"Yes"`, only the existence control counts — declining the process
/// leaves nothing else to answer.
pub fn form_progress(form: &ProcessForm, answers: &AnswerMap, secondary: &AnswerMap) -> FormProgress {
    let exists = process_exists(form, answers);
    let mut answered = 0;
    let mut total = 0;
    for control in &form.controls {
        if !exists && control.id != EXISTENCE_CONTROL {
            continue;
        }
        if !is_visible(&control.id, &form.rules, answers, secondary) {
            continue;
        }
        total += 1;
        let done = match &control.checklist_items {
            Some(items) => {
                crate::classify::classify_checklist(&control.id, items, answers).is_success()
            }
            None => answers.answered(&control.id),
        };
        if done {
            answered += 1;
        }
    }
    FormProgress { answered, total }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn form(json: &str) -> ProcessForm {
        serde_json::from_str(json).unwrap()
    }

    fn two_control_group() -> ProcessForm {
        form(r#"{
            "controls": [
                {"id": "A", "label": "A", "group": "G", "correct-option": "Yes"},
                {"id": "B", "label": "B", "group": "G", "correct-option": "Yes"}
            ],
            "groups": [{"id": "G", "title": "G"}],
            "rules": []
        }"#)
    }

    #[test]
    fn vacuous_completeness() {
        let empty = ProcessForm::default();
        let score = score_of("anything", &empty.controls, &empty.rules, &AnswerMap::new(), &AnswerMap::new());
        assert_eq!(score.total, 0);
        assert_eq!(score.compliant, 0);
        assert_eq!(score.score, 1.0);
    }

    #[test]
    fn fully_hidden_subtree_is_vacuously_complete() {
        let f = form(r#"{
            "controls": [{"id": "A", "label": "A", "group": "G"}],
            "groups": [{"id": "G", "title": "G"}],
            "rules": [{"target": "A", "scope": "gate", "effect": "SHOW", "schema": {"const": "Yes"}}]
        }"#);
        let score = score_of("G", &f.controls, &f.rules, &AnswerMap::new(), &AnswerMap::new());
        assert_eq!(score.total, 0);
        assert_eq!(score.score, 1.0);
    }

    #[test]
    fn half_answered_group_scores_half_and_rates_yellow() {
        let f = two_control_group();
        let answers: AnswerMap = [("A", "Yes")].into_iter().collect();
        let score = score_of("G", &f.controls, &f.rules, &answers, &AnswerMap::new());
        assert_eq!(score.compliant, 1);
        assert_eq!(score.total, 2);
        assert_eq!(score.score, 0.5);
        assert_eq!(form_rating(&f, &answers, &AnswerMap::new()), Rating::Yellow);
    }

    #[test]
    fn an_error_forces_red_despite_high_score() {
        let f = form(r#"{
            "controls": [
                {"id": "A", "label": "A", "group": "G", "correct-option": "Yes"},
                {"id": "B", "label": "B", "group": "G", "correct-option": "Yes"},
                {"id": "C", "label": "C", "group": "G", "correct-option": "Yes"},
                {"id": "D", "label": "D", "group": "G", "correct-option": "Yes"}
            ],
            "groups": [{"id": "G", "title": "G"}],
            "rules": []
        }"#);
        let answers: AnswerMap =
            [("A", "Yes"), ("B", "Yes"), ("C", "Yes"), ("D", "No")].into_iter().collect();
        assert_eq!(rating_of("G", &f.controls, &f.rules, &answers, &AnswerMap::new()), Rating::Red);
        assert_eq!(form_rating(&f, &answers, &AnswerMap::new()), Rating::Red);
    }

    #[test]
    fn all_compliant_rates_green() {
        let f = two_control_group();
        let answers: AnswerMap = [("A", "Yes"), ("B", "Yes")].into_iter().collect();
        assert_eq!(form_rating(&f, &answers, &AnswerMap::new()), Rating::Green);
    }

    #[test]
    fn prefix_membership_recurses_through_depth() {
        let f = form(r#"{
            "controls": [
                {"id": "4_1_1", "label": "a", "correct-option": "Yes"},
                {"id": "4_1_2_1", "label": "b", "correct-option": "Yes"},
                {"id": "4_2_1", "label": "c", "correct-option": "Yes"}
            ],
            "groups": [
                {"id": "4_1", "title": "root"},
                {"id": "4_1_2", "title": "nested"}
            ],
            "rules": []
        }"#);
        let answers: AnswerMap = [("4_1_1", "Yes")].into_iter().collect();
        // 4_1 covers both its direct control and the nested one; 4_2_1 is outside.
        let score = score_of("4_1", &f.controls, &f.rules, &answers, &AnswerMap::new());
        assert_eq!(score.total, 2);
        assert_eq!(score.compliant, 1);
    }

    #[test]
    fn invisible_controls_are_excluded_from_counts() {
        let f = form(r#"{
            "controls": [
                {"id": "A", "label": "A", "group": "G", "correct-option": "Yes"},
                {"id": "B", "label": "B", "group": "G", "correct-option": "Yes"}
            ],
            "groups": [{"id": "G", "title": "G"}],
            "rules": [{"target": "B", "scope": "A", "effect": "SHOW", "schema": {"const": "Yes"}}]
        }"#);
        // B is hidden until A says Yes, so the group is 1/1 — complete.
        let answers: AnswerMap = [("A", "Yes")].into_iter().collect();
        let hidden: AnswerMap = [("A", "No")].into_iter().collect();
        assert_eq!(score_of("G", &f.controls, &f.rules, &hidden, &AnswerMap::new()).total, 1);
        assert_eq!(score_of("G", &f.controls, &f.rules, &answers, &AnswerMap::new()).total, 2);
    }

    #[test]
    fn no_groups_falls_back_to_flat_sweep() {
        let f = form(r#"{
            "controls": [
                {"id": "a", "label": "a", "correct-option": "Yes"},
                {"id": "b", "label": "b", "correct-option": "Yes"}
            ],
            "groups": [],
            "rules": []
        }"#);
        let answers: AnswerMap = [("a", "Yes"), ("b", "Yes")].into_iter().collect();
        assert_eq!(form_rating(&f, &answers, &AnswerMap::new()), Rating::Green);
        assert_eq!(form_rating(&f, &AnswerMap::new(), &AnswerMap::new()), Rating::Red);
    }

    // ── Progress ─────────────────────────────────────────────────────

    #[test]
    fn progress_counts_visible_controls() {
        let f = two_control_group();
        let answers: AnswerMap = [("A", "No")].into_iter().collect();
        let progress = form_progress(&f, &answers, &AnswerMap::new());
        // "No" is an answer even though it is not compliant.
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.percent(), 50);
        assert!(!progress.complete());
    }

    #[test]
    fn declined_existence_narrows_progress_to_the_gate() {
        let f = form(r#"{
            "controls": [
                {"id": "process-exists", "label": "Does this process exist?", "group": "gate", "correct-option": "Yes"},
                {"id": "A", "label": "A", "group": "G", "correct-option": "Yes"}
            ],
            "groups": [{"id": "gate", "title": "Existence"}, {"id": "G", "title": "G"}],
            "rules": []
        }"#);
        let declined: AnswerMap = [("process-exists", "No")].into_iter().collect();
        let progress = form_progress(&f, &declined, &AnswerMap::new());
        assert_eq!(progress.total, 1);
        assert_eq!(progress.answered, 1);
        assert!(progress.complete());

        let confirmed: AnswerMap = [("process-exists", "Yes")].into_iter().collect();
        let progress = form_progress(&f, &confirmed, &AnswerMap::new());
        assert_eq!(progress.total, 2);
        assert_eq!(progress.answered, 1);
    }

    #[test]
    fn empty_form_progress_is_zero_percent() {
        let progress = form_progress(&ProcessForm::default(), &AnswerMap::new(), &AnswerMap::new());
        assert_eq!(progress.percent(), 0);
        assert!(!progress.complete());
    }
}
