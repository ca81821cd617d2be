// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::identifier::Identifier;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Duplicate task in graph: {0}")]
    DuplicateTask(Identifier),

    #[error("{}", dangling_message(.referenced_by, .missing))]
    DanglingReference {
        /// The task whose `deps` mention `missing`, or `None` for a root entry.
        referenced_by: Option<Identifier>,
        missing: Identifier,
    },

    #[error("Cycle detected in task graph involving: {}", join_ids(.0))]
    CycleDetected(Vec<Identifier>),

    #[error("Invalid task identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn dangling_message(referenced_by: &Option<Identifier>, missing: &Identifier) -> String {
    match referenced_by {
        Some(task) => format!("Task {task} depends on unknown task {missing}"),
        None => format!("Root task {missing} is not present in the task list"),
    }
}

fn join_ids(ids: &[Identifier]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ExplorerError>;
