// src/engine/core.rs

//! Pure core explorer state machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`ExplorerEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - running fetches against the engine API
//! - handing frames to the renderer
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, network, or renderer.

use std::collections::HashMap;

use tracing::debug;

use crate::api::model::{ExplorerSnapshot, ResultVersion};
use crate::dag::TaskGraph;
use crate::engine::event_handlers::{
    handle_graph_fetched, handle_measurement, handle_refresh, CoreStep,
};
use crate::engine::feedback::DimensionFeedbackLoop;
use crate::engine::fetches::FetchTracker;
use crate::engine::{ExplorerEvent, RuntimeOptions};
use crate::errors::Result;
use crate::identifier::Identifier;
use crate::layout::{LayoutConfig, LayoutResult};
use crate::render::{NodePayload, RenderFrame};
use crate::types::NodeDimension;

/// A graph currently on screen together with its stored result versions.
#[derive(Debug)]
struct GraphView {
    feedback: DimensionFeedbackLoop,
    versions: HashMap<Identifier, Vec<ResultVersion>>,
}

impl GraphView {
    fn frame(&self, generation: u64) -> RenderFrame {
        let graph = self.feedback.graph();
        let nodes = graph
            .nodes()
            .map(|node| {
                let versions = self
                    .versions
                    .get(&node.id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                NodePayload {
                    id: node.id.clone(),
                    task_type: node.task_type,
                    is_root: graph.is_root(&node.id),
                    version_count: versions.len(),
                    latest_version: versions.iter().max_by_key(|v| v.timestamp).cloned(),
                }
            })
            .collect();

        RenderFrame {
            generation,
            layout: self.feedback.current().clone(),
            nodes,
        }
    }
}

/// What is displayed: at most one graph, plus a generation counter that
/// changes whenever the graph is replaced or cleared.
#[derive(Debug)]
pub struct DisplayState {
    config: LayoutConfig,
    generation: u64,
    view: Option<GraphView>,
}

impl DisplayState {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            generation: 0,
            view: None,
        }
    }

    /// Validate a snapshot and make it the displayed graph.
    ///
    /// On a validation error the previous graph is left untouched; the caller
    /// decides whether to clear it.
    pub fn replace(&mut self, snapshot: ExplorerSnapshot) -> Result<RenderFrame> {
        let graph = TaskGraph::from_raw(&snapshot.task_graph)?;

        let mut versions: HashMap<Identifier, Vec<ResultVersion>> = HashMap::new();
        for entry in snapshot.versions {
            versions
                .entry(Identifier::from(entry.identifier))
                .or_default()
                .extend(entry.versions);
        }

        self.generation += 1;
        self.view = Some(GraphView {
            feedback: DimensionFeedbackLoop::new(graph, self.config),
            versions,
        });
        Ok(self.frame_for_current())
    }

    /// Drop the displayed graph and its sizes. Returns the new generation.
    pub fn clear(&mut self) -> u64 {
        self.generation += 1;
        self.view = None;
        self.generation
    }

    /// Apply a measurement; returns a frame to draw when the layout changed.
    pub fn report(&mut self, id: &Identifier, dimension: NodeDimension) -> Option<RenderFrame> {
        let Some(view) = self.view.as_mut() else {
            debug!(id = %id, "measurement with no graph displayed; ignoring");
            return None;
        };
        view.feedback.report(id, dimension)?;
        Some(view.frame(self.generation))
    }

    /// Every node of the displayed graph has a recorded size.
    pub fn is_converged(&self) -> bool {
        self.view
            .as_ref()
            .is_some_and(|view| view.feedback.is_fully_measured())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn layout(&self) -> Option<&LayoutResult> {
        self.view.as_ref().map(|view| view.feedback.current())
    }

    pub fn feedback(&self) -> Option<&DimensionFeedbackLoop> {
        self.view.as_ref().map(|view| &view.feedback)
    }

    fn frame_for_current(&self) -> RenderFrame {
        match &self.view {
            Some(view) => view.frame(self.generation),
            None => RenderFrame {
                generation: self.generation,
                layout: LayoutResult::default(),
                nodes: Vec::new(),
            },
        }
    }
}

/// Pure core explorer state.
///
/// This owns:
/// - the fetch sequence tracker
/// - the displayed graph and its feedback loop
/// - runtime options (e.g. `exit_when_converged`)
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreExplorer {
    fetches: FetchTracker,
    display: DisplayState,
    options: RuntimeOptions,
}

impl CoreExplorer {
    pub fn new(config: LayoutConfig, options: RuntimeOptions) -> Self {
        Self {
            fetches: FetchTracker::new(),
            display: DisplayState::new(config),
            options,
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Handle a single explorer event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: ExplorerEvent) -> CoreStep {
        match event {
            ExplorerEvent::RefreshRequested => handle_refresh(&mut self.fetches),
            ExplorerEvent::GraphFetched { seq, outcome } => handle_graph_fetched(
                &mut self.fetches,
                &mut self.display,
                &self.options,
                seq,
                outcome,
            ),
            ExplorerEvent::DimensionsMeasured { id, dimensions } => {
                handle_measurement(&mut self.display, &self.options, id, dimensions)
            }
            ExplorerEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
