//! # Schema Lints
//!
//! Referential checks over a parsed form. Findings are warnings, never
//! errors: the evaluator is total over any form that parses, so a
//! dangling reference degrades at evaluation time (an unknown rule
//! target governs nothing; an unknown scope is never satisfied). The
//! lint exists so authoring mistakes surface in the log instead of as a
//! silently hidden question.

use crate::form::ProcessForm;

/// A referential oddity found in a form schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintIssue {
    /// Two controls share an id.
    DuplicateControlId(String),
    /// Two groups share an id.
    DuplicateGroupId(String),
    /// A rule targets an id that is neither a control nor a group.
    RuleTargetUnknown(String),
    /// A control declares a parent group that does not exist.
    GroupRefUnknown {
        /// The declaring control.
        control: String,
        /// The missing group id.
        group: String,
    },
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateControlId(id) => write!(f, "duplicate control id {id:?}"),
            Self::DuplicateGroupId(id) => write!(f, "duplicate group id {id:?}"),
            Self::RuleTargetUnknown(id) => {
                write!(f, "rule targets unknown id {id:?}")
            }
            Self::GroupRefUnknown { control, group } => {
                write!(f, "control {control:?} references unknown group {group:?}")
            }
        }
    }
}

/// Scan a form for referential oddities.
///
/// Rule scopes are deliberately not checked: cross-form conditions
/// legitimately reference introduction answers that live outside this
/// form's id set.
pub fn lint_form(form: &ProcessForm) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    let mut control_ids = std::collections::BTreeSet::new();
    for control in &form.controls {
        if !control_ids.insert(control.id.as_str()) {
            issues.push(LintIssue::DuplicateControlId(control.id.clone()));
        }
    }

    let mut group_ids = std::collections::BTreeSet::new();
    for group in &form.groups {
        if !group_ids.insert(group.id.as_str()) {
            issues.push(LintIssue::DuplicateGroupId(group.id.clone()));
        }
    }

    for rule in &form.rules {
        if !control_ids.contains(rule.target.as_str()) && !group_ids.contains(rule.target.as_str())
        {
            issues.push(LintIssue::RuleTargetUnknown(rule.target.clone()));
        }
    }

    for control in &form.controls {
        if let Some(group) = &control.group {
            if !group_ids.contains(group.as_str()) {
                issues.push(LintIssue::GroupRefUnknown {
                    control: control.id.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    issues
}
