//! # Process Form Records
//!
//! The flat schema of one questionnaire: controls, groups, visibility
//! rules, sub-scoping entries, and cross-form links. Hierarchy is
//! carried two ways — an explicit `group` reference on a control, or
//! implicitly by identifier-prefix nesting — and the compiler in
//! `attest-engine` unifies both behind one tree.
//!
//! Every field that can be absent has a permissive default: a form that
//! parses is a form the engine can evaluate (missing `correct-option`
//! behaves as "any answer acceptable", an unknown rule effect is simply
//! never selected).

use serde::{Deserialize, Serialize};

use attest_core::NOT_APPLICABLE;

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

/// An atomic compliance question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    /// Globally unique identifier, hierarchical by convention.
    pub id: String,

    /// The question text shown to the respondent.
    #[serde(default)]
    pub label: String,

    /// Explicit parent group id, when the form uses explicit grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// The acceptable answer. `None` or `"N/A"` means any answer is fine.
    #[serde(
        rename = "correct-option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_answer: Option<String>,

    /// Whether an acceptable answer must be accompanied by detail text.
    #[serde(rename = "detail-required", default)]
    pub detail_required: bool,

    /// Prompt for the detail text field.
    #[serde(
        rename = "detail-label",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_label: Option<String>,

    /// Checklist items; a control carrying these takes the binary
    /// completion path instead of the Yes/No expected-answer path.
    #[serde(
        rename = "checklist-items",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checklist_items: Option<Vec<ChecklistItem>>,

    /// Source regulation rule codes. Provenance only; no effect on status.
    #[serde(rename = "source-rules", default, skip_serializing_if = "Vec::is_empty")]
    pub source_rules: Vec<String>,

    /// Confidence of the rule-to-control mapping. Display only.
    #[serde(
        rename = "mapping-confidence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mapping_confidence: Option<f64>,
}

impl Control {
    /// Whether this control is a checklist control.
    pub fn is_checklist(&self) -> bool {
        self.checklist_items.is_some()
    }

    /// The expected answer, with `"N/A"` and empty normalized away.
    pub fn required_answer(&self) -> Option<&str> {
        match self.expected_answer.as_deref() {
            None | Some(NOT_APPLICABLE) | Some("") => None,
            Some(other) => Some(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Checklist items
// ---------------------------------------------------------------------------

/// Marker value of [`ChecklistItem::kind`] for OR groups.
pub const OR_GROUP: &str = "or-group";

/// One row of a checklist control.
///
/// Deliberately a permissive optional-field struct rather than a tagged
/// enum: note rows, OR groups, and plain checkboxes all parse, and an
/// unrecognized shape degrades to an inert row instead of failing the
/// whole form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Checkbox text for plain items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Row kind; `"or-group"` marks a group satisfied by any sub-item.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Sub-items of an OR group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChecklistSubItem>>,

    /// Annotation text; note rows are never checkable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChecklistItem {
    /// Whether this row is a non-checkable annotation.
    pub fn is_note(&self) -> bool {
        self.note.is_some()
    }

    /// The OR-group sub-items, when this row is an OR group.
    pub fn or_items(&self) -> Option<&[ChecklistSubItem]> {
        if self.kind.as_deref() == Some(OR_GROUP) {
            self.items.as_deref()
        } else {
            None
        }
    }

    /// Whether this row is a plain, individually required checkbox.
    pub fn is_checkbox(&self) -> bool {
        !self.is_note() && self.or_items().is_none()
    }
}

/// A sub-item inside an OR group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistSubItem {
    /// Checkbox text.
    #[serde(default)]
    pub label: String,
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// Display variant of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupVariant {
    /// A top-level process section.
    #[default]
    Main,
    /// A nested sub-process section.
    Subprocess,
}

/// A named, optionally nested container of controls and subgroups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier; shares the control namespace.
    pub id: String,

    /// Section heading.
    #[serde(default)]
    pub title: String,

    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display variant. No effect on evaluation.
    #[serde(default)]
    pub variant: GroupVariant,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// The effect of a visibility rule.
///
/// Only `SHOW` has evaluation semantics; an unrecognized effect parses
/// as [`RuleEffect::Other`] and is never selected by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleEffect {
    /// Show the target when the condition holds.
    Show,
    /// Anything else; ignored.
    #[serde(other)]
    Other,
}

/// The single-equality condition of a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstCondition {
    /// The value the scoped answer must equal exactly.
    #[serde(rename = "const")]
    pub value: String,
}

/// A single-condition visibility predicate.
///
/// When several rules share a target, visibility is the logical OR
/// across them: any satisfied condition shows the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// The control or group this rule governs.
    pub target: String,

    /// The id whose answer is inspected.
    pub scope: String,

    /// Rule effect; absence of any rule for a target means always visible.
    pub effect: RuleEffect,

    /// The equality condition.
    pub schema: ConstCondition,
}

// ---------------------------------------------------------------------------
// Sub-scoping and form links
// ---------------------------------------------------------------------------

/// One option of the "which sub-types apply" multi-select gate.
///
/// Selecting an option records `"Yes"` at its id in the same answer map
/// the form's rules read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubScopingEntry {
    /// Answer key the selection writes to.
    pub id: String,
    /// Option label.
    #[serde(default)]
    pub label: String,
}

/// A link embedding another process form, optionally gated by a control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormLink {
    /// The linked process id.
    pub target: String,
    /// Link caption.
    #[serde(default)]
    pub label: String,
    /// Control whose `"Yes"` answer reveals the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gated_by: Option<String>,
}

// ---------------------------------------------------------------------------
// ProcessForm
// ---------------------------------------------------------------------------

/// The complete declarative schema of one questionnaire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessForm {
    /// All controls, in authoring order.
    #[serde(default)]
    pub controls: Vec<Control>,

    /// All groups, in declaration order. Declaration order is the render
    /// order in explicit mode and must be preserved.
    #[serde(default)]
    pub groups: Vec<Group>,

    /// Visibility rules.
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Sub-scoping gate options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_scoping: Vec<SubScopingEntry>,

    /// Links to related process forms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_links: Vec<FormLink>,
}

impl ProcessForm {
    /// Whether any control declares an explicit parent group.
    ///
    /// Selects the compiler's explicit mode; forms never mix encodings
    /// in practice, but membership checks still fall back per control.
    pub fn has_explicit_groups(&self) -> bool {
        self.controls.iter().any(|c| c.group.is_some())
    }

    /// Look up a control by id.
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Look up a group by id.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
