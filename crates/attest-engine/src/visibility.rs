//! # Visibility Evaluation
//!
//! A node with no `SHOW` rule is always visible. A node with rules is
//! visible iff any one rule is satisfied: the scoped answer — looked up
//! in the secondary (introduction) answers first, falling back to the
//! form's own answers — equals the rule's expected value exactly.
//!
//! Visibility must be consulted before rendering or aggregating any
//! node: invisible nodes are excluded from all downstream counts, not
//! merely hidden in the UI.

use attest_core::AnswerMap;
use attest_schema::{Rule, RuleEffect};

/// Whether the node `id` is currently shown.
///
/// Pure predicate; a rule whose scope resolves to no answer in either
/// map is simply never satisfied.
pub fn is_visible(id: &str, rules: &[Rule], answers: &AnswerMap, secondary: &AnswerMap) -> bool {
    let mut governed = false;
    for rule in rules
        .iter()
        .filter(|r| r.effect == RuleEffect::Show && r.target == id)
    {
        governed = true;
        let value = secondary
            .get(&rule.scope)
            .or_else(|| answers.get(&rule.scope));
        if value == Some(rule.schema.value.as_str()) {
            return true;
        }
    }
    !governed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn show_rule(target: &str, scope: &str, value: &str) -> Rule {
        serde_json::from_str(&format!(
            r#"{{"target":"{target}","scope":"{scope}","effect":"SHOW","schema":{{"const":"{value}"}}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn no_rule_means_visible() {
        let answers = AnswerMap::new();
        assert!(is_visible("x", &[], &answers, &AnswerMap::new()));
    }

    #[test]
    fn single_rule_requires_exact_match() {
        let rules = vec![show_rule("x", "gate", "Yes")];
        let secondary = AnswerMap::new();

        let answers: AnswerMap = [("gate", "Yes")].into_iter().collect();
        assert!(is_visible("x", &rules, &answers, &secondary));

        let answers: AnswerMap = [("gate", "No")].into_iter().collect();
        assert!(!is_visible("x", &rules, &answers, &secondary));

        assert!(!is_visible("x", &rules, &AnswerMap::new(), &secondary));
    }

    #[test]
    fn multiple_rules_are_or_combined() {
        let rules = vec![show_rule("x", "a", "Yes"), show_rule("x", "b", "Yes")];
        let secondary = AnswerMap::new();

        let only_a: AnswerMap = [("a", "Yes"), ("b", "No")].into_iter().collect();
        assert!(is_visible("x", &rules, &only_a, &secondary));

        let only_b: AnswerMap = [("a", "No"), ("b", "Yes")].into_iter().collect();
        assert!(is_visible("x", &rules, &only_b, &secondary));

        let neither: AnswerMap = [("a", "No"), ("b", "No")].into_iter().collect();
        assert!(!is_visible("x", &rules, &neither, &secondary));
    }

    #[test]
    fn secondary_answers_take_precedence() {
        let rules = vec![show_rule("x", "gate", "Yes")];
        let answers: AnswerMap = [("gate", "Yes")].into_iter().collect();
        // The introduction recorded a different value for the same scope;
        // it wins even though the local answer would satisfy the rule.
        let secondary: AnswerMap = [("gate", "No")].into_iter().collect();
        assert!(!is_visible("x", &rules, &answers, &secondary));
    }

    #[test]
    fn cross_form_condition_resolves_in_secondary() {
        let rules = vec![show_rule("x", "4_1_4_2", "Yes")];
        let secondary: AnswerMap = [("4_1_4_2", "Yes")].into_iter().collect();
        assert!(is_visible("x", &rules, &AnswerMap::new(), &secondary));
    }

    #[test]
    fn non_show_effects_are_ignored() {
        let rule: Rule = serde_json::from_str(
            r#"{"target":"x","scope":"gate","effect":"HIDE","schema":{"const":"Yes"}}"#,
        )
        .unwrap();
        // The only rule for the target has an unknown effect, so the
        // target is ungoverned and stays visible.
        assert!(is_visible("x", &[rule], &AnswerMap::new(), &AnswerMap::new()));
    }

    #[test]
    fn rules_for_other_targets_do_not_apply() {
        let rules = vec![show_rule("y", "gate", "Yes")];
        assert!(is_visible("x", &rules, &AnswerMap::new(), &AnswerMap::new()));
    }
}
