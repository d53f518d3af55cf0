//! # Schema Source
//!
//! The read-only collaborator providing schema definitions for a
//! regulation. Schemas are versioned externally; the engine only ever
//! reads them.
//!
//! [`DirSchemaSource`] is the file-backed implementation: one directory
//! per regulation holding `catalog.json`, an optional
//! `introduction.json`, and `processes/<id>.json` per process form.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::catalog::ProcessCatalog;
use crate::error::SchemaError;
use crate::form::ProcessForm;
use crate::introduction::IntroductionForm;
use crate::validate::lint_form;

/// Read-only provider of schema definitions.
pub trait SchemaSource {
    /// The form schema for a process.
    fn process_form(&self, process_id: &str) -> Result<ProcessForm, SchemaError>;

    /// The introduction (scoping) form, if the regulation has one.
    fn introduction(&self) -> Result<Option<IntroductionForm>, SchemaError>;

    /// The process catalog.
    fn catalog(&self) -> Result<ProcessCatalog, SchemaError>;
}

/// A schema source reading JSON files from a directory tree.
#[derive(Debug, Clone)]
pub struct DirSchemaSource {
    root: PathBuf,
}

impl DirSchemaSource {
    /// Create a source rooted at a regulation's schema directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json<T: DeserializeOwned>(&self, path: PathBuf) -> Result<T, SchemaError> {
        if !path.is_file() {
            return Err(SchemaError::NotFound { path });
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|source| SchemaError::JsonParse { path, source })
    }
}

/// Process ids become file names; restrict them to a safe alphabet.
fn valid_process_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl SchemaSource for DirSchemaSource {
    fn process_form(&self, process_id: &str) -> Result<ProcessForm, SchemaError> {
        if !valid_process_id(process_id) {
            return Err(SchemaError::InvalidProcessId {
                id: process_id.to_string(),
            });
        }
        let path = self.root.join("processes").join(format!("{process_id}.json"));
        let form: ProcessForm = self.read_json(path)?;
        for issue in lint_form(&form) {
            tracing::warn!(process_id, %issue, "schema lint");
        }
        Ok(form)
    }

    fn introduction(&self) -> Result<Option<IntroductionForm>, SchemaError> {
        let path = self.root.join("introduction.json");
        if !path.is_file() {
            return Ok(None);
        }
        self.read_json(path).map(Some)
    }

    fn catalog(&self) -> Result<ProcessCatalog, SchemaError> {
        self.read_json(self.root.join("catalog.json"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn loads_a_regulation_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "catalog.json",
            r#"{"hasIntroductionForm": true, "processList": [{"id": "agent-management", "title": "Agent Management"}]}"#,
        );
        write(dir.path(), "introduction.json", r#"{"derived": []}"#);
        write(
            dir.path(),
            "processes/agent-management.json",
            r#"{"controls": [{"id": "a", "label": "A"}], "groups": [], "rules": []}"#,
        );

        let source = DirSchemaSource::new(dir.path());
        let catalog = source.catalog().unwrap();
        assert_eq!(catalog.process_list.len(), 1);
        assert!(source.introduction().unwrap().is_some());
        let form = source.process_form("agent-management").unwrap();
        assert_eq!(form.controls.len(), 1);
    }

    #[test]
    fn missing_introduction_is_none_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "catalog.json", r#"{"processList": []}"#);
        let source = DirSchemaSource::new(dir.path());
        assert!(source.introduction().unwrap().is_none());
    }

    #[test]
    fn missing_process_form_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSchemaSource::new(dir.path());
        let err = source.process_form("nope").unwrap_err();
        assert!(matches!(err, SchemaError::NotFound { .. }));
    }

    #[test]
    fn traversal_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSchemaSource::new(dir.path());
        let err = source.process_form("../etc/passwd").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidProcessId { .. }));
    }

    #[test]
    fn malformed_json_carries_its_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "catalog.json", "{not json");
        let source = DirSchemaSource::new(dir.path());
        let err = source.catalog().unwrap_err();
        assert!(format!("{err}").contains("catalog.json"));
    }
}
