// src/dag/validate.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::api::model::{RawTask, RawTaskGraph};
use crate::dag::graph::{TaskGraph, TaskNode};
use crate::errors::{ExplorerError, Result};
use crate::identifier::{Identifier, RawIdentifier};
use crate::types::TaskType;

impl TaskGraph {
    /// Validate a fetched task list and build the immutable graph.
    ///
    /// Checks, in order:
    /// 1. no identifier appears twice among `raw_tasks`
    /// 2. every dependency and every root names a task in the list
    /// 3. the dependency relation is acyclic
    ///
    /// Unknown `task_type` strings are not an error; the node is classified
    /// as [`TaskType::Unknown`] and a warning is logged.
    pub fn build(raw_roots: &[RawIdentifier], raw_tasks: &[RawTask]) -> Result<TaskGraph> {
        let nodes = collect_nodes(raw_tasks)?;
        let roots = resolve_roots(raw_roots, &nodes)?;
        ensure_acyclic(&nodes)?;

        debug!(tasks = nodes.len(), roots = roots.len(), "task graph validated");
        Ok(TaskGraph::new_unchecked(nodes, roots))
    }

    pub fn from_raw(raw: &RawTaskGraph) -> Result<TaskGraph> {
        Self::build(&raw.root_tasks, &raw.tasks)
    }
}

fn collect_nodes(raw_tasks: &[RawTask]) -> Result<Vec<TaskNode>> {
    let mut seen: HashSet<Identifier> = HashSet::with_capacity(raw_tasks.len());
    let mut nodes = Vec::with_capacity(raw_tasks.len());

    for raw in raw_tasks {
        let id = Identifier::from(&raw.identifier);
        if !seen.insert(id.clone()) {
            return Err(ExplorerError::DuplicateTask(id));
        }

        let task_type = TaskType::classify(&raw.task_type);
        if task_type.is_unknown() {
            warn!(
                task = %id,
                task_type = %raw.task_type,
                "unrecognised task_type; rendering with the default style"
            );
        }

        let mut dependencies: Vec<Identifier> = Vec::with_capacity(raw.deps.len());
        let mut seen_deps: HashSet<Identifier> = HashSet::with_capacity(raw.deps.len());
        for dep in &raw.deps {
            let dep = Identifier::from(dep);
            if !seen_deps.insert(dep.clone()) {
                debug!(task = %id, dep = %dep, "dropping repeated dependency");
                continue;
            }
            dependencies.push(dep);
        }

        nodes.push(TaskNode {
            id,
            task_type,
            dependencies,
        });
    }

    // Dependencies may point forward in the list, so check them only once
    // the whole node set is known.
    for node in &nodes {
        for dep in &node.dependencies {
            if !seen.contains(dep) {
                return Err(ExplorerError::DanglingReference {
                    referenced_by: Some(node.id.clone()),
                    missing: dep.clone(),
                });
            }
        }
    }

    Ok(nodes)
}

fn resolve_roots(raw_roots: &[RawIdentifier], nodes: &[TaskNode]) -> Result<Vec<Identifier>> {
    let known: HashSet<&Identifier> = nodes.iter().map(|n| &n.id).collect();
    let mut roots: Vec<Identifier> = Vec::with_capacity(raw_roots.len());

    for raw in raw_roots {
        let id = Identifier::from(raw);
        if !known.contains(&id) {
            return Err(ExplorerError::DanglingReference {
                referenced_by: None,
                missing: id,
            });
        }
        if !roots.contains(&id) {
            roots.push(id);
        }
    }

    Ok(roots)
}

fn ensure_acyclic(nodes: &[TaskNode]) -> Result<()> {
    // Edge direction: dependency -> dependent, over node indices.
    let index: HashMap<&Identifier, usize> =
        nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();

    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    for idx in 0..nodes.len() {
        graph.add_node(idx);
    }
    for (idx, node) in nodes.iter().enumerate() {
        for dep in &node.dependencies {
            if let Some(&dep_idx) = index.get(dep) {
                graph.add_edge(dep_idx, idx, ());
            }
        }
    }

    if toposort(&graph, None).is_ok() {
        return Ok(());
    }

    // Report every task that sits on a cycle, not just the one toposort hit.
    let mut offending: Vec<Identifier> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .flatten()
        .map(|idx| nodes[idx].id.clone())
        .collect();
    offending.sort();

    Err(ExplorerError::CycleDetected(offending))
}
