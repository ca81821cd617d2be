#![allow(dead_code)]

use taskgraph_explorer::api::model::{
    ExplorerSnapshot, RawTask, RawTaskGraph, ResultVersion, TaskResults,
};
use taskgraph_explorer::dag::TaskGraph;
use taskgraph_explorer::identifier::RawIdentifier;

/// Parse `"path:name"` or a bare `"name"` (which lives at path `.`).
pub fn raw_id(text: &str) -> RawIdentifier {
    match text.rsplit_once(':') {
        Some((path, name)) => RawIdentifier::new(path, name),
        None => RawIdentifier::new(".", text),
    }
}

/// Builder for engine payloads to simplify test setup.
///
/// ```ignore
/// let graph = RawTaskGraphBuilder::new()
///     .task("A", &[])
///     .task("B", &["A"])
///     .root("B")
///     .build_graph();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawTaskGraphBuilder {
    graph: RawTaskGraph,
    versions: Vec<TaskResults>,
}

impl RawTaskGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `run_command` task.
    pub fn task(self, id: &str, deps: &[&str]) -> Self {
        self.typed_task(id, "run_command", deps)
    }

    pub fn typed_task(mut self, id: &str, task_type: &str, deps: &[&str]) -> Self {
        self.graph.tasks.push(RawTask {
            identifier: raw_id(id),
            deps: deps.iter().map(|d| raw_id(d)).collect(),
            task_type: task_type.to_string(),
        });
        self
    }

    pub fn root(mut self, id: &str) -> Self {
        self.graph.root_tasks.push(raw_id(id));
        self
    }

    /// Record one stored result version for `id`.
    pub fn version(mut self, id: &str, timestamp: i64) -> Self {
        let identifier = raw_id(id);
        let version = ResultVersion {
            timestamp,
            commit_hash: Some(format!("{timestamp:x}")),
            has_uncommitted_changes: false,
        };
        match self.versions.iter_mut().find(|r| r.identifier == identifier) {
            Some(entry) => entry.versions.push(version),
            None => self.versions.push(TaskResults {
                identifier,
                versions: vec![version],
            }),
        }
        self
    }

    pub fn build_raw(&self) -> RawTaskGraph {
        self.graph.clone()
    }

    pub fn build_graph(&self) -> TaskGraph {
        TaskGraph::from_raw(&self.graph).expect("Failed to build valid graph from builder")
    }

    pub fn snapshot(&self) -> ExplorerSnapshot {
        ExplorerSnapshot {
            task_graph: self.graph.clone(),
            versions: self.versions.clone(),
        }
    }
}

/// `A <- B`, with `B` as root.
pub fn chain_ab() -> RawTaskGraphBuilder {
    RawTaskGraphBuilder::new()
        .task("A", &[])
        .task("B", &["A"])
        .root("B")
}

/// `A <- B`, `A <- C`, `B <- D`, `C <- D`.
pub fn diamond() -> RawTaskGraphBuilder {
    RawTaskGraphBuilder::new()
        .task("A", &[])
        .task("B", &["A"])
        .task("C", &["A"])
        .task("D", &["B", "C"])
        .root("D")
}
