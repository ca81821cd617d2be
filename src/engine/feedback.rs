// src/engine/feedback.rs

//! Measure-then-relayout loop.
//!
//! Node sizes are only known after the renderer has mounted the nodes, so
//! the first layout runs with an empty size table (every node a point).
//! Each measurement that changes the table triggers exactly one new layout;
//! a measurement equal to what is already stored is a no-op. Once every node
//! has reported a stable size, the loop has reached its fixed point and stays
//! there.

use tracing::{debug, trace, warn};

use crate::dag::TaskGraph;
use crate::identifier::Identifier;
use crate::layout::{layout, DimensionTable, LayoutConfig, LayoutResult};
use crate::types::NodeDimension;

#[derive(Debug)]
pub struct DimensionFeedbackLoop {
    graph: TaskGraph,
    dims: DimensionTable,
    config: LayoutConfig,
    current: LayoutResult,
    layouts_computed: u64,
}

impl DimensionFeedbackLoop {
    /// Start a loop for a freshly fetched graph and run the first pass with
    /// no sizes known.
    pub fn new(graph: TaskGraph, config: LayoutConfig) -> Self {
        let dims = DimensionTable::new();
        let current = layout(&graph, &dims, &config);
        debug!(nodes = graph.len(), "initial layout computed with empty sizes");
        Self {
            graph,
            dims,
            config,
            current,
            layouts_computed: 1,
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn dims(&self) -> &DimensionTable {
        &self.dims
    }

    /// The most recent layout.
    pub fn current(&self) -> &LayoutResult {
        &self.current
    }

    /// Number of layout passes run so far, the initial one included.
    pub fn layouts_computed(&self) -> u64 {
        self.layouts_computed
    }

    /// Every node has a recorded size.
    pub fn is_fully_measured(&self) -> bool {
        self.graph.nodes().all(|node| self.dims.contains_key(&node.id))
    }

    /// Apply one measurement.
    ///
    /// Returns the new layout when the measurement changed the size table,
    /// `None` when it was a repeat or named a task that is not in the graph.
    pub fn report(&mut self, id: &Identifier, dimension: NodeDimension) -> Option<&LayoutResult> {
        // Renderers may build the struct directly; clamp NaN and negatives.
        let dimension = NodeDimension::new(dimension.width, dimension.height);

        if !self.graph.contains(id) {
            warn!(id = %id, "measurement for a task that is not in the graph; ignoring");
            return None;
        }

        if self.dims.get(id) == Some(&dimension) {
            trace!(id = %id, "measurement unchanged; skipping relayout");
            return None;
        }

        self.dims.insert(id.clone(), dimension);
        self.current = layout(&self.graph, &self.dims, &self.config);
        self.layouts_computed += 1;

        debug!(
            id = %id,
            width = dimension.width,
            height = dimension.height,
            measured = self.dims.len(),
            total = self.graph.len(),
            "size changed; layout recomputed"
        );

        Some(&self.current)
    }
}
