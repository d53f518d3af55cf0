//! File-loading helpers shared by the subcommands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

use attest_core::AnswerMap;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Read an optional answers file; absent means an empty map.
pub fn read_answers(path: Option<&PathBuf>) -> anyhow::Result<AnswerMap> {
    match path {
        Some(path) => read_json(path),
        None => Ok(AnswerMap::new()),
    }
}
