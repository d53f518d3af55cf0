//! # attest-engine — Compliance Form Evaluator
//!
//! A small interpreter over declarative questionnaire schemas: given
//! controls, groups, and visibility rules plus a bag of free-form
//! answers, it produces a renderable, conditionally visible form tree
//! and a hierarchical compliance status for every control, group, and
//! process.
//!
//! ## Shape
//!
//! Every entry point is a pure function of `(schema, answers)` — no
//! interior state, no I/O, nothing to cancel. Callers may invoke the
//! engine from any number of concurrent render cycles or requests
//! without coordination; a superseded result is simply discarded.
//!
//! ## Totality
//!
//! The engine never raises on syntactically valid input. Unknown rule
//! targets govern nothing, unknown rule scopes are never satisfied,
//! missing optional fields take their most permissive default, and an
//! unanswered control simply classifies as pending. The only "error"
//! produced here is the domain status [`attest_core::ControlStatus::Error`]
//! — a wrong answer, which is data, not a fault.
//!
//! ## Evaluation order
//!
//! [`expand`](expand::expand) closes the scoping answers first; the
//! expanded map feeds [`visibility`], [`classify`], and [`gate`], which
//! [`aggregate`] and [`compile`] build on.

pub mod aggregate;
pub mod classify;
pub mod compile;
pub mod expand;
pub mod gate;
pub mod store;
pub mod visibility;

pub use aggregate::{form_progress, form_rating, rating_of, score_of, FormProgress, GroupScore};
pub use classify::{classify, classify_checklist};
pub use compile::{answer_schema, compile, ControlNode, ControlRole, GroupNode, Node};
pub use expand::expand;
pub use gate::{
    assessment_complete, is_relevant, link_visible, process_exists, relevance, relevant_entries,
    sub_scope_selected, ProcessRelevance, EXISTENCE_CONTROL,
};
pub use store::{AnswerStore, MemoryAnswerStore, TenantId};
pub use visibility::is_visible;
