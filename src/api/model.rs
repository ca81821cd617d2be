// src/api/model.rs

//! Wire types for the engine's read-only explorer API.
//!
//! ```json
//! {
//!   "root_tasks": [{"path": "exp", "name": "plots"}],
//!   "tasks": [
//!     {
//!       "identifier": {"path": "exp", "name": "plots"},
//!       "deps": [{"path": "exp", "name": "bench"}],
//!       "task_type": "combine"
//!     }
//!   ]
//! }
//! ```
//!
//! Nothing here is validated; [`crate::dag::TaskGraph::from_raw`] does that.

use serde::{Deserialize, Serialize};

use crate::identifier::RawIdentifier;

/// Response of `GET /api/1/task_graph`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTaskGraph {
    /// Tasks that nothing depends on.
    #[serde(default)]
    pub root_tasks: Vec<RawIdentifier>,

    #[serde(default)]
    pub tasks: Vec<RawTask>,
}

/// One entry of `tasks`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTask {
    pub identifier: RawIdentifier,

    #[serde(default)]
    pub deps: Vec<RawIdentifier>,

    /// Kept as a string so unknown task kinds survive deserialization.
    pub task_type: String,
}

/// One stored result version of a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultVersion {
    /// Seconds since the epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub commit_hash: Option<String>,
    #[serde(default)]
    pub has_uncommitted_changes: bool,
}

/// One entry of `GET /api/1/results/all_versions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskResults {
    pub identifier: RawIdentifier,
    #[serde(default)]
    pub versions: Vec<ResultVersion>,
}

/// Both endpoints, fetched together.
#[derive(Debug, Clone, Default)]
pub struct ExplorerSnapshot {
    pub task_graph: RawTaskGraph,
    pub versions: Vec<TaskResults>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_graph_payload_deserializes() {
        let body = r#"{
            "root_tasks": [{"path": ".", "name": "all"}],
            "tasks": [
                {"identifier": {"path": ".", "name": "all"},
                 "deps": [{"path": "lib", "name": "build"}],
                 "task_type": "group"},
                {"identifier": {"path": "lib", "name": "build"},
                 "deps": [],
                 "task_type": "run_command"}
            ]
        }"#;

        let graph: RawTaskGraph = serde_json::from_str(body).unwrap();
        assert_eq!(graph.root_tasks.len(), 1);
        assert_eq!(graph.tasks.len(), 2);
        assert_eq!(graph.tasks[0].deps[0], RawIdentifier::new("lib", "build"));
    }

    #[test]
    fn versions_payload_tolerates_missing_commit() {
        let body = r#"[{"identifier": {"path": "lib", "name": "build"},
                        "versions": [{"timestamp": 1700000000, "has_uncommitted_changes": true}]}]"#;

        let results: Vec<TaskResults> = serde_json::from_str(body).unwrap();
        assert_eq!(results[0].versions[0].commit_hash, None);
        assert!(results[0].versions[0].has_uncommitted_changes);
    }
}
