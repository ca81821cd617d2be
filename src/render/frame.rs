// src/render/frame.rs

//! What the core hands to the renderer.

use std::fmt;

use serde::Serialize;

use crate::api::model::ResultVersion;
use crate::identifier::Identifier;
use crate::layout::LayoutResult;
use crate::types::TaskType;

/// Styling payload for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePayload {
    /// Serialized as the canonical string, which is also the node label.
    pub id: Identifier,
    pub task_type: TaskType,
    pub is_root: bool,
    pub version_count: usize,
    /// Newest stored result version, if any.
    pub latest_version: Option<ResultVersion>,
}

/// A complete, positioned graph ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Bumped every time a new fetch result replaces the displayed graph.
    /// Renderers remount everything when it changes.
    pub generation: u64,
    pub layout: LayoutResult,
    pub nodes: Vec<NodePayload>,
}

/// Why the renderer should show the empty state instead of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum EmptyReason {
    /// Either endpoint could not be fetched.
    FetchFailed(String),
    /// The graph was fetched but failed validation.
    InvalidGraph(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::FetchFailed(msg) => write!(f, "could not fetch the task graph: {msg}"),
            EmptyReason::InvalidGraph(msg) => write!(f, "graph could not be displayed: {msg}"),
        }
    }
}
