// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::client::{fetch_snapshot, GraphSource};
use crate::errors::Result;
use crate::render::RendererBackend;

use super::core::CoreExplorer;
use super::{CoreCommand, ExplorerEvent, FetchOutcome};

/// Drives the core explorer in response to `ExplorerEvent`s, runs fetches
/// against a `GraphSource`, and hands frames to a `RendererBackend`.
///
/// This is a pure IO shell around `CoreExplorer`, which contains all the
/// reconciliation semantics.
pub struct Runtime<R: RendererBackend, S: GraphSource + 'static> {
    core: CoreExplorer,
    event_rx: mpsc::Receiver<ExplorerEvent>,
    event_tx: mpsc::WeakSender<ExplorerEvent>,
    renderer: R,
    source: Arc<S>,
}

impl<R: RendererBackend, S: GraphSource + 'static> fmt::Debug for Runtime<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<R: RendererBackend, S: GraphSource + 'static> Runtime<R, S> {
    /// `event_tx` must feed `event_rx`; fetch tasks report back through it.
    /// Only a weak handle is kept, so the loop still ends once every other
    /// sender is dropped.
    pub fn new(
        core: CoreExplorer,
        event_rx: mpsc::Receiver<ExplorerEvent>,
        event_tx: mpsc::Sender<ExplorerEvent>,
        renderer: R,
        source: Arc<S>,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx: event_tx.downgrade(),
            renderer,
            source,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `ExplorerEvent`s from `event_rx`.
    /// - Feeds them into the core.
    /// - Executes commands returned by the core (fetch, render, exit).
    ///
    /// Returns the renderer so callers can inspect it after shutdown.
    pub async fn run(mut self) -> Result<R> {
        info!("explorer runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        self.renderer.finish().await?;
        info!("runtime exiting");
        Ok(self.renderer)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::StartFetch { seq } => self.spawn_fetch(seq),
            CoreCommand::Render(frame) => {
                debug!(
                    generation = frame.generation,
                    nodes = frame.nodes.len(),
                    "presenting frame"
                );
                self.renderer.present(frame).await?;
            }
            CoreCommand::ShowEmpty { generation, reason } => {
                self.renderer.present_empty(generation, reason).await?;
            }
            CoreCommand::RequestExit => {
                info!("core issued RequestExit command");
            }
        }
        Ok(())
    }

    fn spawn_fetch(&self, seq: u64) {
        let Some(tx) = self.event_tx.upgrade() else {
            warn!(seq, "event channel closed; not starting fetch");
            return;
        };
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            let outcome = match fetch_snapshot(source.as_ref()).await {
                Ok(snapshot) => FetchOutcome::Loaded(snapshot),
                Err(err) => FetchOutcome::Failed(err.to_string()),
            };
            if tx
                .send(ExplorerEvent::GraphFetched { seq, outcome })
                .await
                .is_err()
            {
                warn!(seq, "runtime gone before fetch completed");
            }
        });
    }
}
