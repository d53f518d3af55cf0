//! # Introduction / Scoping Form
//!
//! The business-profile questionnaire answered before any process form:
//! toggle-button option groups whose selections record `"Yes"` answers,
//! plus the declared answer derivations the expander closes over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::Group;

/// One toggle option inside a button group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonOption {
    /// Stable option key.
    pub key: String,
    /// Button label.
    #[serde(default)]
    pub label: String,
    /// The answer id a selection sets to `"Yes"`.
    #[serde(rename = "controlId")]
    pub control_id: String,
}

/// A group of toggle buttons, single- or multi-select.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonGroup {
    /// Question text above the buttons.
    #[serde(default)]
    pub label: String,
    /// Whether several options may be selected at once.
    #[serde(default)]
    pub multi: bool,
    /// The options.
    #[serde(default)]
    pub options: Vec<ButtonOption>,
}

/// A declared answer derivation: set `target` to `"Yes"` when any of
/// `from` is already `"Yes"`.
///
/// Declarations are an ordered list; the expander honors declaration
/// order and runs a single pass, so chained targets must be declared
/// after their sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedRule {
    /// The answer id to derive.
    pub target: String,
    /// Source answer ids; any `"Yes"` among them triggers the derivation.
    #[serde(default)]
    pub from: Vec<String>,
}

/// The introduction form schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntroductionForm {
    /// Section groups, for headings and descriptions.
    #[serde(default)]
    pub groups: Vec<Group>,

    /// Button groups keyed by their section group id.
    #[serde(rename = "buttonGroups", default)]
    pub button_groups: BTreeMap<String, ButtonGroup>,

    /// Declared answer derivations, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derived: Vec<DerivedRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_groups_and_derivations() {
        let json = r#"{
            "groups": [{"id": "services", "title": "Your services"}],
            "buttonGroups": {
                "services": {
                    "label": "Which services do you provide?",
                    "multi": true,
                    "options": [
                        {"key": "sales", "label": "Sales", "controlId": "4_1_4_1"},
                        {"key": "pm", "label": "Property management", "controlId": "4_1_4_2"}
                    ]
                }
            },
            "derived": [
                {"target": "4_1_4", "from": ["4_1_4_1", "4_1_4_2"]}
            ]
        }"#;
        let intro: IntroductionForm = serde_json::from_str(json).unwrap();
        assert_eq!(intro.button_groups["services"].options.len(), 2);
        assert_eq!(intro.derived[0].target, "4_1_4");
        assert!(intro.button_groups["services"].multi);
    }

    #[test]
    fn empty_object_is_a_valid_introduction() {
        let intro: IntroductionForm = serde_json::from_str("{}").unwrap();
        assert!(intro.groups.is_empty());
        assert!(intro.derived.is_empty());
    }
}
