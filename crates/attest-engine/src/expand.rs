//! # Derived-Answer Expansion
//!
//! Closes the scoping answers over the declared derivations: each rule
//! sets its target to `"Yes"` when any of its sources is already
//! `"Yes"`. One pass, in declaration order — earlier derivations feed
//! later ones, so a chained target must be declared after its sources.
//! Multi-hop chains are not iterated to fixpoint; callers needing that
//! today order their rule list accordingly or call [`expand`] twice.

use attest_core::{AnswerMap, YES};
use attest_schema::DerivedRule;

/// Compute the closed set of implied `"Yes"` answers.
///
/// The input map is never mutated; idempotent for a correctly ordered
/// rule list.
pub fn expand(base: &AnswerMap, rules: &[DerivedRule]) -> AnswerMap {
    let mut expanded = base.clone();
    for rule in rules {
        if rule.from.iter().any(|source| expanded.is_yes(source)) {
            expanded.set(rule.target.clone(), YES);
        }
    }
    expanded
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(target: &str, from: &[&str]) -> DerivedRule {
        DerivedRule {
            target: target.to_string(),
            from: from.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn any_yes_source_derives_the_target() {
        let base: AnswerMap = [("4_1_4_2", "Yes")].into_iter().collect();
        let rules = vec![rule("4_1_4", &["4_1_4_1", "4_1_4_2"])];
        let expanded = expand(&base, &rules);
        assert!(expanded.is_yes("4_1_4"));
        // Source answers are preserved.
        assert!(expanded.is_yes("4_1_4_2"));
    }

    #[test]
    fn no_yes_source_leaves_the_target_unset() {
        let base: AnswerMap = [("4_1_4_1", "No")].into_iter().collect();
        let expanded = expand(&base, &[rule("4_1_4", &["4_1_4_1"])]);
        assert!(expanded.get("4_1_4").is_none());
    }

    #[test]
    fn declaration_order_carries_chains() {
        let base: AnswerMap = [("leaf", "Yes")].into_iter().collect();
        let ordered = vec![rule("mid", &["leaf"]), rule("top", &["mid"])];
        let expanded = expand(&base, &ordered);
        assert!(expanded.is_yes("top"));

        // Declared against the grain, the chain does not close in one pass...
        let reversed = vec![rule("top", &["mid"]), rule("mid", &["leaf"])];
        let once = expand(&base, &reversed);
        assert!(!once.is_yes("top"));
        assert!(once.is_yes("mid"));

        // ...and a second pass is the documented escape hatch.
        let twice = expand(&once, &reversed);
        assert!(twice.is_yes("top"));
    }

    #[test]
    fn expand_is_idempotent() {
        let base: AnswerMap = [("a", "Yes"), ("note", "free text")].into_iter().collect();
        let rules = vec![rule("b", &["a"]), rule("c", &["b"])];
        let once = expand(&base, &rules);
        let again = expand(&once, &rules);
        assert_eq!(once, again);
    }

    #[test]
    fn base_map_is_untouched() {
        let base: AnswerMap = [("a", "Yes")].into_iter().collect();
        let _ = expand(&base, &[rule("b", &["a"])]);
        assert!(base.get("b").is_none());
    }

    #[test]
    fn existing_target_answer_is_not_downgraded() {
        // A target already answered "Yes" by hand stays "Yes" even when
        // no source fires.
        let base: AnswerMap = [("b", "Yes")].into_iter().collect();
        let expanded = expand(&base, &[rule("b", &["a"])]);
        assert!(expanded.is_yes("b"));
    }
}
