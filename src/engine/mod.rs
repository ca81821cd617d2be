// src/engine/mod.rs

//! Orchestration engine for the explorer.
//!
//! This module ties together:
//! - the measure-then-relayout loop ([`feedback`])
//! - last-write-wins bookkeeping for in-flight fetches ([`fetches`])
//! - the main runtime event loop that reacts to:
//!   - refresh requests
//!   - completed fetches
//!   - node measurements from the renderer
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::api::model::ExplorerSnapshot;
use crate::identifier::Identifier;
use crate::types::NodeDimension;

/// Result of one fetch of both engine endpoints.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Loaded(ExplorerSnapshot),
    /// Either request failed; carries the error message.
    Failed(String),
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// If true, exit once the displayed graph has converged, is empty, or
    /// could not be shown (used for `--once`).
    pub exit_when_converged: bool,
}

/// Events flowing into the runtime from timers, fetch tasks and the renderer.
#[derive(Debug, Clone)]
pub enum ExplorerEvent {
    /// Fetch the graph again.
    RefreshRequested,
    /// A fetch issued with sequence number `seq` finished.
    GraphFetched { seq: u64, outcome: FetchOutcome },
    /// The renderer mounted or resized a node.
    DimensionsMeasured {
        id: Identifier,
        dimensions: NodeDimension,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod feedback;
pub mod fetches;
pub mod runtime;

pub use core::CoreExplorer;
pub use event_handlers::{CoreCommand, CoreStep};
pub use feedback::DimensionFeedbackLoop;
pub use fetches::FetchTracker;
pub use runtime::Runtime;
