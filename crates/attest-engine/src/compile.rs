//! # Schema Compilation
//!
//! Turns a flat schema — controls, groups, rules — into a nested,
//! render-ready tree with visibility and status resolved at every node.
//!
//! Two input encodings produce the same tagged tree:
//!
//! - **Explicit mode** (current forms): controls declare a `group`
//!   reference. Groups render in declaration order; members in
//!   identifier order. A detail node is synthesized after its parent
//!   control whenever the control requires detail, governed by an
//!   implicit show-on-`"Yes"` rule keyed to the parent.
//! - **Implicit mode** (legacy status trees): hierarchy is inferred from
//!   identifier prefixes. Each level collects its direct-child group and
//!   control ids, dedups, numeric-sorts; an id that is simultaneously a
//!   control and a group merges into a single group node that renders
//!   the control first and then recurses.
//!
//! A rule referencing a nonexistent scope leaves its target hidden;
//! compilation itself never fails.

use serde::{Deserialize, Serialize};

use attest_core::answers::detail_key;
use attest_core::{compare_ids, parent_id, AnswerMap, ControlStatus};
use attest_schema::{Control, ControlNote, GroupVariant, ProcessForm, ReviewMetadata, Rule};

use crate::aggregate::score_of;
use crate::classify::classify;
use crate::visibility::is_visible;

/// Detail prompt used when a control does not provide its own.
pub const DEFAULT_DETAIL_PROMPT: &str = "Please provide details:";

// ---------------------------------------------------------------------------
// Output tree
// ---------------------------------------------------------------------------

/// A node of the compiled form tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// A section containing controls and subsections.
    Group(GroupNode),
    /// A single question, checklist, or detail field.
    Control(ControlNode),
}

/// A compiled group node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupNode {
    /// Group id, re-scorable via the aggregator.
    pub id: String,
    /// Section heading.
    pub title: String,
    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display variant.
    pub variant: GroupVariant,
    /// Whether the section is currently shown.
    pub visible: bool,
    /// Child nodes in render order.
    pub children: Vec<Node>,
}

/// What a compiled control node renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlRole {
    /// A Yes/No question.
    Question,
    /// A checklist of items.
    Checklist,
    /// A synthesized free-text companion of a question.
    Detail,
}

/// A compiled control node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlNode {
    /// Answer key of this node.
    pub id: String,
    /// Question or prompt text.
    pub label: String,
    /// Render role.
    pub role: ControlRole,
    /// Whether the node is currently shown.
    pub visible: bool,
    /// Resolved status under the current answers.
    pub status: ControlStatus,
    /// Source regulation rule codes, display only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_rules: Vec<String>,
    /// Reviewer note, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<ControlNote>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Compile a form against the current answers.
///
/// `secondary` carries the expanded introduction answers for cross-form
/// rule conditions; `review` is the injected read-only annotation lookup.
pub fn compile(
    form: &ProcessForm,
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) -> Vec<Node> {
    let explicit = form.has_explicit_groups();
    tracing::debug!(
        explicit,
        controls = form.controls.len(),
        groups = form.groups.len(),
        rules = form.rules.len(),
        "compiling form"
    );
    if explicit {
        compile_explicit(form, answers, secondary, review)
    } else {
        compile_implicit(form, answers, secondary, review)
    }
}

fn control_node(
    control: &Control,
    rules: &[Rule],
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) -> ControlNode {
    ControlNode {
        id: control.id.clone(),
        label: control.label.clone(),
        role: if control.is_checklist() {
            ControlRole::Checklist
        } else {
            ControlRole::Question
        },
        visible: is_visible(&control.id, rules, answers, secondary),
        status: classify(control, answers),
        source_rules: control.source_rules.clone(),
        note: review.and_then(|r| r.note_for(&control.id)).cloned(),
    }
}

/// The synthesized free-text companion of a detail-requiring control,
/// shown only while its parent is visible and answered `"Yes"`.
fn detail_node(control: &Control, parent_visible: bool, answers: &AnswerMap) -> ControlNode {
    let key = detail_key(&control.id);
    let status = if answers.answered(&key) {
        ControlStatus::Success
    } else {
        ControlStatus::Pending
    };
    ControlNode {
        id: key,
        label: control
            .detail_label
            .clone()
            .unwrap_or_else(|| DEFAULT_DETAIL_PROMPT.to_string()),
        role: ControlRole::Detail,
        visible: parent_visible && answers.is_yes(&control.id),
        status,
        source_rules: Vec::new(),
        note: None,
    }
}

/// Push a control node and, when required, its detail companion.
fn push_control(
    out: &mut Vec<Node>,
    control: &Control,
    rules: &[Rule],
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) {
    let node = control_node(control, rules, answers, secondary, review);
    let visible = node.visible;
    out.push(Node::Control(node));
    if control.detail_required && !control.is_checklist() {
        out.push(Node::Control(detail_node(control, visible, answers)));
    }
}

// ---------------------------------------------------------------------------
// Explicit mode
// ---------------------------------------------------------------------------

fn compile_explicit(
    form: &ProcessForm,
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) -> Vec<Node> {
    let mut nodes = Vec::new();

    for group in &form.groups {
        let mut members: Vec<&Control> = form
            .controls
            .iter()
            .filter(|c| c.group.as_deref() == Some(group.id.as_str()))
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by(|a, b| compare_ids(&a.id, &b.id));

        let rule_visible = is_visible(&group.id, &form.rules, answers, secondary);
        let any_member_visible = members
            .iter()
            .any(|c| is_visible(&c.id, &form.rules, answers, secondary));

        let mut children = Vec::new();
        for control in &members {
            push_control(&mut children, control, &form.rules, answers, secondary, review);
        }

        nodes.push(Node::Group(GroupNode {
            id: group.id.clone(),
            title: group.title.clone(),
            description: group.description.clone(),
            variant: group.variant,
            visible: rule_visible && any_member_visible,
            children,
        }));
    }

    // Controls with no (or an unknown) group render after the sections.
    let group_ids: std::collections::BTreeSet<&str> =
        form.groups.iter().map(|g| g.id.as_str()).collect();
    for control in &form.controls {
        let orphan = match control.group.as_deref() {
            None => true,
            Some(group) => !group_ids.contains(group),
        };
        if orphan {
            push_control(&mut nodes, control, &form.rules, answers, secondary, review);
        }
    }

    nodes
}

// ---------------------------------------------------------------------------
// Implicit mode
// ---------------------------------------------------------------------------

fn compile_implicit(
    form: &ProcessForm,
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) -> Vec<Node> {
    let group_ids: std::collections::BTreeSet<&str> =
        form.groups.iter().map(|g| g.id.as_str()).collect();

    form.groups
        .iter()
        .filter(|g| parent_id(&g.id).map_or(true, |p| !group_ids.contains(p)))
        .map(|root| implicit_group(&root.id, form, answers, secondary, review))
        .collect()
}

/// Build the group node for `id`, recursing into its level.
fn implicit_group(
    id: &str,
    form: &ProcessForm,
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) -> Node {
    let mut children = Vec::new();

    // An id that is simultaneously a control renders its question first.
    // The legacy status tree never synthesizes detail companions.
    if let Some(control) = form.control(id) {
        children.push(Node::Control(control_node(
            control, &form.rules, answers, secondary, review,
        )));
    }
    children.extend(implicit_level(id, form, answers, secondary, review));

    // Prefix scoring covers the whole subtree, including a merged
    // control at the group id itself; a subtree with no visible member
    // is dropped from the rendered status view.
    let populated = score_of(id, &form.controls, &form.rules, answers, secondary).total > 0;
    let rule_visible = is_visible(id, &form.rules, answers, secondary);

    let (title, description, variant) = match form.group(id) {
        Some(group) => (group.title.clone(), group.description.clone(), group.variant),
        None => (String::new(), None, GroupVariant::default()),
    };

    Node::Group(GroupNode {
        id: id.to_string(),
        title,
        description,
        variant,
        visible: rule_visible && populated,
        children,
    })
}

/// The direct children of `parent`: child group ids and child control
/// ids, deduplicated and numeric-sorted.
fn implicit_level(
    parent: &str,
    form: &ProcessForm,
    answers: &AnswerMap,
    secondary: &AnswerMap,
    review: Option<&ReviewMetadata>,
) -> Vec<Node> {
    let mut child_ids: Vec<&str> = Vec::new();
    for group in &form.groups {
        if parent_id(&group.id) == Some(parent) {
            child_ids.push(group.id.as_str());
        }
    }
    for control in &form.controls {
        let direct = match control.group.as_deref() {
            Some(group) => group == parent,
            None => parent_id(&control.id) == Some(parent),
        };
        if direct {
            child_ids.push(control.id.as_str());
        }
    }
    child_ids.sort_by(|a, b| compare_ids(a, b));
    child_ids.dedup();

    let mut nodes = Vec::new();
    for id in child_ids {
        let as_group = form.group(id).is_some();
        let as_control = form.control(id);
        if as_group {
            // Merged or plain group: implicit_group handles both.
            nodes.push(implicit_group(id, form, answers, secondary, review));
        } else if let Some(control) = as_control {
            nodes.push(Node::Control(control_node(
                control, &form.rules, answers, secondary, review,
            )));
        }
    }
    nodes
}

// ---------------------------------------------------------------------------
// Answer schema
// ---------------------------------------------------------------------------

/// The JSON-schema `properties` object describing a form's answer keys:
/// Yes/No enums per control, free-text detail companions, and the
/// sub-scoping ids rules may reference.
pub fn answer_schema(form: &ProcessForm) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    for sub in &form.sub_scoping {
        properties.insert(
            sub.id.clone(),
            serde_json::json!({"type": "string", "enum": ["Yes"]}),
        );
    }
    for control in &form.controls {
        properties.insert(
            control.id.clone(),
            serde_json::json!({"type": "string", "enum": ["Yes", "No"]}),
        );
        if control.detail_required {
            properties.insert(
                detail_key(&control.id),
                serde_json::json!({"type": "string"}),
            );
        }
    }
    serde_json::json!({"type": "object", "properties": properties})
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
