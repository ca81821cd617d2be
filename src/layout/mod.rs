// src/layout/mod.rs

//! Layered layout of a validated task graph.
//!
//! [`layout`] is a pure function: the same graph, size table and config give
//! a bit-identical [`LayoutResult`]. It runs three phases:
//!
//! 1. [`ranking`]: longest-path layering. Rank 0 holds tasks without
//!    dependencies, so every dependency ranks strictly below its dependents.
//! 2. [`ordering`]: median-heuristic crossing reduction inside each rank.
//! 3. [`coords`]: band stacking, row packing and straight edge connectors.
//!
//! Nodes missing from the size table are laid out as zero-sized points. That
//! is expected on the first pass; the feedback loop in
//! [`crate::engine::feedback`] re-runs the layout once sizes are measured.

mod coords;
mod ordering;
mod ranking;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::dag::TaskGraph;
use crate::identifier::Identifier;
use crate::types::{LayoutDirection, NodeDimension, Point};

/// Measured node sizes, keyed by identifier.
pub type DimensionTable = HashMap<Identifier, NodeDimension>;

/// Spacing and direction knobs for the layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub direction: LayoutDirection,

    /// Vertical gap between two rank bands.
    #[serde(default = "default_rank_sep")]
    pub rank_sep: f64,

    /// Horizontal gap between neighbours in a rank.
    #[serde(default = "default_node_gap")]
    pub node_gap: f64,

    /// Upward + downward sweeps of the crossing-reduction heuristic.
    #[serde(default = "default_ordering_passes")]
    pub ordering_passes: usize,
}

fn default_rank_sep() -> f64 {
    50.0
}

fn default_node_gap() -> f64 {
    30.0
}

fn default_ordering_passes() -> usize {
    4
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::default(),
            rank_sep: default_rank_sep(),
            node_gap: default_node_gap(),
            ordering_passes: default_ordering_passes(),
        }
    }
}

/// Straight connector from a dependency to the task that requires it.
///
/// The arrow head belongs at `target`, on the dependent (`to`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRoute {
    pub from: Identifier,
    pub to: Identifier,
    pub source: Point,
    pub target: Point,
}

/// Output of one layout pass. Built fresh by every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub ranks: BTreeMap<Identifier, usize>,
    /// Top-left corner of each node, in screen coordinates.
    pub positions: BTreeMap<Identifier, Point>,
    pub edges: Vec<EdgeRoute>,
}

impl LayoutResult {
    pub fn rank_of(&self, id: &Identifier) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    pub fn position_of(&self, id: &Identifier) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lay out `graph` using whatever sizes are known in `dims`.
pub fn layout(graph: &TaskGraph, dims: &DimensionTable, config: &LayoutConfig) -> LayoutResult {
    if graph.is_empty() {
        return LayoutResult::default();
    }

    let sizes: Vec<NodeDimension> = graph
        .nodes()
        .map(|node| dims.get(&node.id).copied().unwrap_or(NodeDimension::ZERO))
        .collect();

    let ranks = ranking::assign_ranks(graph);
    let mut rank_nodes = ranking::rank_buckets(&ranks);
    ordering::order_ranks(graph, &mut rank_nodes, config.ordering_passes);

    let points = coords::assign_coordinates(&rank_nodes, &sizes, config);
    let edges = coords::route_edges(graph, &points, &sizes, config.direction);

    let mut result = LayoutResult {
        ranks: BTreeMap::new(),
        positions: BTreeMap::new(),
        edges,
    };
    for (idx, node) in graph.nodes().enumerate() {
        result.ranks.insert(node.id.clone(), ranks[idx]);
        result.positions.insert(node.id.clone(), points[idx]);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::RawTask;
    use crate::identifier::RawIdentifier;

    fn graph(tasks: &[(&str, &[&str])]) -> TaskGraph {
        let raw: Vec<RawTask> = tasks
            .iter()
            .map(|(name, deps)| RawTask {
                identifier: RawIdentifier::new(".", *name),
                deps: deps.iter().map(|d| RawIdentifier::new(".", *d)).collect(),
                task_type: "run_command".to_string(),
            })
            .collect();
        TaskGraph::build(&[], &raw).unwrap()
    }

    fn id(name: &str) -> Identifier {
        Identifier::new(".", name)
    }

    #[test]
    fn two_node_chain() {
        let g = graph(&[("A", &[]), ("B", &["A"])]);
        let result = layout(&g, &DimensionTable::new(), &LayoutConfig::default());

        assert_eq!(result.rank_of(&id("A")), Some(0));
        assert_eq!(result.rank_of(&id("B")), Some(1));
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].from, id("A"));
        assert_eq!(result.edges[0].to, id("B"));
    }

    #[test]
    fn siblings_share_rank_without_overlap() {
        let g = graph(&[("A", &[]), ("B", &["A"]), ("C", &["A"])]);
        let mut dims = DimensionTable::new();
        for name in ["A", "B", "C"] {
            dims.insert(id(name), NodeDimension::new(80.0, 30.0));
        }
        let result = layout(&g, &dims, &LayoutConfig::default());

        assert_eq!(result.rank_of(&id("B")), Some(1));
        assert_eq!(result.rank_of(&id("C")), Some(1));

        let b = result.position_of(&id("B")).unwrap();
        let c = result.position_of(&id("C")).unwrap();
        assert_eq!(b.y, c.y);
        let (left, right) = if b.x < c.x { (b, c) } else { (c, b) };
        assert!(left.x + 80.0 <= right.x, "B and C overlap: {left:?} {right:?}");
    }

    #[test]
    fn dependencies_are_drawn_below_by_default() {
        let g = graph(&[("A", &[]), ("B", &["A"])]);
        let mut dims = DimensionTable::new();
        dims.insert(id("A"), NodeDimension::new(50.0, 20.0));
        dims.insert(id("B"), NodeDimension::new(50.0, 20.0));
        let result = layout(&g, &dims, &LayoutConfig::default());

        let a = result.position_of(&id("A")).unwrap();
        let b = result.position_of(&id("B")).unwrap();
        assert!(a.y > b.y, "dependency should be lower on screen");

        let edge = &result.edges[0];
        assert_eq!(edge.source, Point::new(a.x + 25.0, a.y));
        assert_eq!(edge.target, Point::new(b.x + 25.0, b.y + 20.0));
    }

    #[test]
    fn top_to_bottom_mirrors_vertical_order() {
        let g = graph(&[("A", &[]), ("B", &["A"])]);
        let config = LayoutConfig {
            direction: LayoutDirection::TopToBottom,
            ..LayoutConfig::default()
        };
        let result = layout(&g, &DimensionTable::new(), &config);
        let a = result.position_of(&id("A")).unwrap();
        let b = result.position_of(&id("B")).unwrap();
        assert!(a.y < b.y);
    }

    #[test]
    fn empty_graph_gives_empty_layout() {
        let g = TaskGraph::build(&[], &[]).unwrap();
        let result = layout(&g, &DimensionTable::new(), &LayoutConfig::default());
        assert!(result.positions.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn same_inputs_same_output() {
        let g = graph(&[
            ("a", &[]),
            ("b", &[]),
            ("c", &["a", "b"]),
            ("d", &["b"]),
            ("e", &["c", "d"]),
        ]);
        let mut dims = DimensionTable::new();
        dims.insert(id("c"), NodeDimension::new(120.0, 40.0));
        let config = LayoutConfig::default();

        assert_eq!(layout(&g, &dims, &config), layout(&g, &dims, &config));
    }
}
