// src/dag/graph.rs

use std::collections::HashMap;

use crate::identifier::Identifier;
use crate::types::TaskType;

/// A validated task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub id: Identifier,
    pub task_type: TaskType,
    /// Direct dependencies, in the order the engine listed them (duplicates
    /// removed).
    pub dependencies: Vec<Identifier>,
}

/// Per-node index data: immediate deps, dependents and the root flag.
#[derive(Debug, Clone, Default)]
struct NodeLinks {
    deps: Vec<usize>,
    dependents: Vec<usize>,
    is_root: bool,
}

/// Immutable, validated task DAG.
///
/// Construct through [`TaskGraph::build`] / [`TaskGraph::from_raw`], which
/// reject duplicates, dangling references and cycles. Everything downstream
/// (layout, feedback loop) may assume those invariants hold.
///
/// Nodes keep the order in which the engine listed them; that order seeds
/// the left-to-right ordering in the layout.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    index: HashMap<Identifier, usize>,
    links: Vec<NodeLinks>,
    roots: Vec<Identifier>,
}

impl TaskGraph {
    /// Assemble a graph from parts that have already been validated.
    pub(crate) fn new_unchecked(nodes: Vec<TaskNode>, roots: Vec<Identifier>) -> Self {
        let index: HashMap<Identifier, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();

        let mut links = vec![NodeLinks::default(); nodes.len()];
        for (idx, node) in nodes.iter().enumerate() {
            for dep in &node.dependencies {
                if let Some(&dep_idx) = index.get(dep) {
                    links[idx].deps.push(dep_idx);
                    links[dep_idx].dependents.push(idx);
                }
            }
        }
        for root in &roots {
            if let Some(&idx) = index.get(root) {
                links[idx].is_root = true;
            }
        }

        Self {
            nodes,
            index,
            links,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &Identifier) -> Option<&TaskNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode> {
        self.nodes.iter()
    }

    /// Tasks that nothing depends on, as reported by the engine.
    pub fn roots(&self) -> &[Identifier] {
        &self.roots
    }

    pub fn is_root(&self, id: &Identifier) -> bool {
        self.index
            .get(id)
            .is_some_and(|&idx| self.links[idx].is_root)
    }

    /// Immediate dependencies of a task.
    pub fn dependencies_of(&self, id: &Identifier) -> &[Identifier] {
        self.get(id)
            .map(|n| n.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list it in their `deps`).
    pub fn dependents_of(&self, id: &Identifier) -> Vec<&Identifier> {
        self.index
            .get(id)
            .map(|&idx| {
                self.links[idx]
                    .dependents
                    .iter()
                    .map(|&d| &self.nodes[d].id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &TaskNode {
        &self.nodes[idx]
    }

    pub(crate) fn dep_indices(&self, idx: usize) -> &[usize] {
        &self.links[idx].deps
    }

    pub(crate) fn dependent_indices(&self, idx: usize) -> &[usize] {
        &self.links[idx].dependents
    }
}
