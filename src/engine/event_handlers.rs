// src/engine/event_handlers.rs

//! Event handling logic for the core explorer.

use tracing::{debug, info, warn};

use crate::engine::core::DisplayState;
use crate::engine::fetches::FetchTracker;
use crate::engine::{FetchOutcome, RuntimeOptions};
use crate::identifier::Identifier;
use crate::render::{EmptyReason, RenderFrame};
use crate::types::NodeDimension;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Fetch both endpoints and report back with this sequence number.
    StartFetch { seq: u64 },
    /// Draw this frame.
    Render(RenderFrame),
    /// Nothing can be shown; clear the surface.
    ShowEmpty { generation: u64, reason: EmptyReason },
    /// Request that the process exits (used for `--once`).
    RequestExit,
}

/// Decision returned by the core after handling a single `ExplorerEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute (fetch, render, exit).
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn running(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    /// Append `RequestExit` and stop the loop.
    fn exit(mut commands: Vec<CoreCommand>) -> Self {
        commands.push(CoreCommand::RequestExit);
        Self {
            commands,
            keep_running: false,
        }
    }
}

/// Handle a refresh request by issuing a new fetch.
pub fn handle_refresh(fetches: &mut FetchTracker) -> CoreStep {
    let seq = fetches.issue();
    debug!(seq, "issuing fetch");
    CoreStep::running(vec![CoreCommand::StartFetch { seq }])
}

/// Handle a finished fetch.
///
/// - Results older than the last applied one are dropped.
/// - A failed fetch or a graph that does not validate clears the display
///   and shows the empty state.
/// - A valid graph replaces the display and is rendered with no sizes known.
pub fn handle_graph_fetched(
    fetches: &mut FetchTracker,
    display: &mut DisplayState,
    options: &RuntimeOptions,
    seq: u64,
    outcome: FetchOutcome,
) -> CoreStep {
    if !fetches.accept(seq) {
        return CoreStep::running(Vec::new());
    }

    let reason = match outcome {
        FetchOutcome::Failed(message) => {
            warn!(seq, error = %message, "fetch failed");
            EmptyReason::FetchFailed(message)
        }
        FetchOutcome::Loaded(snapshot) => match display.replace(snapshot) {
            Ok(frame) => {
                info!(
                    seq,
                    generation = frame.generation,
                    nodes = frame.nodes.len(),
                    "new task graph loaded"
                );
                let converged = frame.nodes.is_empty();
                let commands = vec![CoreCommand::Render(frame)];
                return if options.exit_when_converged && converged {
                    CoreStep::exit(commands)
                } else {
                    CoreStep::running(commands)
                };
            }
            Err(err) => {
                warn!(seq, error = %err, "fetched graph is invalid");
                EmptyReason::InvalidGraph(err.to_string())
            }
        },
    };

    let generation = display.clear();
    let commands = vec![CoreCommand::ShowEmpty { generation, reason }];
    if options.exit_when_converged {
        CoreStep::exit(commands)
    } else {
        CoreStep::running(commands)
    }
}

/// Handle a measurement reported by the renderer.
pub fn handle_measurement(
    display: &mut DisplayState,
    options: &RuntimeOptions,
    id: Identifier,
    dimensions: NodeDimension,
) -> CoreStep {
    let Some(frame) = display.report(&id, dimensions) else {
        return CoreStep::running(Vec::new());
    };

    let commands = vec![CoreCommand::Render(frame)];
    if options.exit_when_converged && display.is_converged() {
        info!("every node measured; layout converged");
        CoreStep::exit(commands)
    } else {
        CoreStep::running(commands)
    }
}
