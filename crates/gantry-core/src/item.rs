//! The work item: one benchmark attempt request.
//!
//! A work item is the JSON message body exchanged over the queue. All four
//! fields are required and must be non-blank after trimming; anything else
//! is malformed and is discarded by the consumer rather than retried.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One (repo version, attempt group, model, task) combination to benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Version-control reference (commit hash or tag) of the benchmark
    /// tool's source to build and run.
    pub repo_version: String,
    /// Opaque label grouping attempts belonging to the same logical
    /// experiment run.
    pub attempt_group: String,
    /// Identifier of the model under test.
    pub model: String,
    /// Identifier of the benchmark task.
    pub task: String,
}

/// Loosely-typed mirror of [`WorkItem`] used to report every missing or
/// blank field at once instead of failing on the first.
#[derive(Debug, Default, Deserialize)]
struct RawWorkItem {
    #[serde(default)]
    repo_version: Option<String>,
    #[serde(default)]
    attempt_group: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    task: Option<String>,
}

fn trimmed(value: Option<&String>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl WorkItem {
    /// Creates a work item from its four fields.
    #[must_use]
    pub fn new(
        repo_version: impl Into<String>,
        attempt_group: impl Into<String>,
        model: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            repo_version: repo_version.into(),
            attempt_group: attempt_group.into(),
            model: model.into(),
            task: task.into(),
        }
    }

    /// Parses and validates a queue message body.
    ///
    /// Field values are trimmed. Returns the fields in declaration order,
    /// unchanged apart from trimming.
    ///
    /// # Errors
    ///
    /// - [`Error::Serialization`] if the body is not a JSON object.
    /// - [`Error::InvalidItem`] listing exactly the fields that are
    ///   missing or blank after trimming.
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawWorkItem =
            serde_json::from_str(body).map_err(|e| Error::serialization(e.to_string()))?;

        let repo_version = trimmed(raw.repo_version.as_ref());
        let attempt_group = trimmed(raw.attempt_group.as_ref());
        let model = trimmed(raw.model.as_ref());
        let task = trimmed(raw.task.as_ref());

        let mut missing = Vec::new();
        if repo_version.is_none() {
            missing.push("repo_version");
        }
        if attempt_group.is_none() {
            missing.push("attempt_group");
        }
        if model.is_none() {
            missing.push("model");
        }
        if task.is_none() {
            missing.push("task");
        }
        let (Some(repo_version), Some(attempt_group), Some(model), Some(task)) =
            (repo_version, attempt_group, model, task)
        else {
            return Err(Error::InvalidItem { missing });
        };

        Ok(Self {
            repo_version,
            attempt_group,
            model,
            task,
        })
    }

    /// Serializes the work item to its JSON message body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::serialization(e.to_string()))
    }
}
