//! # attest-schema — Questionnaire Schema Records
//!
//! The declarative description of a compliance questionnaire: controls,
//! hierarchical groups, visibility rules, sub-scoping gates, cross-form
//! links, the introduction (scoping) form, and the process catalog.
//!
//! Schemas are authored out of band and loaded read-only per process;
//! everything here is a passive `serde` record. All field names on the
//! wire match the established authoring format (kebab-case control
//! fields, `schema.const` rule conditions), so existing form
//! definitions load unchanged.
//!
//! The [`SchemaSource`] trait is the read-only collaborator boundary the
//! engine consumes; [`DirSchemaSource`] is its JSON-directory
//! implementation.

pub mod assessment;
pub mod catalog;
pub mod error;
pub mod form;
pub mod introduction;
pub mod review;
pub mod source;
pub mod validate;

pub use assessment::{AssessmentId, AssessmentStatus, SelfAssessment};
pub use catalog::{ProcessCatalog, ProcessEntry};
pub use error::SchemaError;
pub use form::{
    ChecklistItem, ChecklistSubItem, ConstCondition, Control, FormLink, Group, GroupVariant,
    ProcessForm, Rule, RuleEffect, SubScopingEntry,
};
pub use introduction::{ButtonGroup, ButtonOption, DerivedRule, IntroductionForm};
pub use review::{ControlNote, NoteSeverity, ReviewMetadata};
pub use source::{DirSchemaSource, SchemaSource};
