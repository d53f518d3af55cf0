//! # Self-Assessment Records
//!
//! The caller-owned record of one assessment run: per-process answer
//! sections plus lifecycle timestamps. The engine reads these; it never
//! stores or mutates them — completion policy lives in
//! `attest-engine::gate`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attest_core::AnswerMap;

/// Unique identifier for a self-assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub Uuid);

impl AssessmentId {
    /// Generate a new random assessment identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "assessment:{}", self.0)
    }
}

/// Lifecycle status of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Answers are still being collected.
    InProgress,
    /// Completed and frozen; answers are read-only.
    Completed,
}

/// One assessment run over a regulation's processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfAssessment {
    /// Unique identifier.
    pub id: AssessmentId,

    /// Lifecycle status.
    pub status: AssessmentStatus,

    /// When the assessment was started.
    pub started_at: DateTime<Utc>,

    /// When the assessment was completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Who completed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,

    /// Answer sections keyed by process id.
    #[serde(default)]
    pub section_answers: BTreeMap<String, AnswerMap>,
}

impl SelfAssessment {
    /// Start a fresh assessment, seeding the given section (typically
    /// the introduction) with the expanded scoping answers.
    pub fn begin(intro_section: impl Into<String>, scoping_answers: AnswerMap) -> Self {
        let mut section_answers = BTreeMap::new();
        section_answers.insert(intro_section.into(), scoping_answers);
        Self {
            id: AssessmentId::new(),
            status: AssessmentStatus::InProgress,
            started_at: Utc::now(),
            completed_at: None,
            completed_by: None,
            section_answers,
        }
    }

    /// Mark the assessment completed.
    pub fn complete(&mut self, by: impl Into<String>) {
        self.status = AssessmentStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.completed_by = Some(by.into());
    }

    /// The answers recorded for a process, if any.
    pub fn answers_for(&self, process_id: &str) -> Option<&AnswerMap> {
        self.section_answers.get(process_id)
    }

    /// Whether any answer exists for a process.
    pub fn has_answers_for(&self, process_id: &str) -> bool {
        self.answers_for(process_id).is_some_and(|a| !a.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_seeds_the_intro_section() {
        let scoping: AnswerMap = [("4_1_4_1", "Yes")].into_iter().collect();
        let assessment = SelfAssessment::begin("risk-assessment", scoping);
        assert_eq!(assessment.status, AssessmentStatus::InProgress);
        assert!(assessment.has_answers_for("risk-assessment"));
        assert!(!assessment.has_answers_for("agent-management"));
    }

    #[test]
    fn complete_records_actor_and_time() {
        let mut assessment = SelfAssessment::begin("risk-assessment", AnswerMap::new());
        assessment.complete("Dana");
        assert_eq!(assessment.status, AssessmentStatus::Completed);
        assert_eq!(assessment.completed_by.as_deref(), Some("Dana"));
        assert!(assessment.completed_at.is_some());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&AssessmentStatus::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);
    }
}
