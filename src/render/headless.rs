// src/render/headless.rs

use std::collections::HashSet;
use std::io::Write;

use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::ExplorerEvent;
use crate::errors::Result;
use crate::identifier::Identifier;
use crate::render::backend::{RenderFuture, RendererBackend};
use crate::render::frame::{EmptyReason, RenderFrame};
use crate::render::metrics::TextMetrics;
use crate::types::NodeDimension;

/// Renderer without a drawing surface.
///
/// "Mounting" a node means estimating its size from the label with
/// [`TextMetrics`]; each node is mounted once per graph generation and its
/// size is reported back to the runtime. Frames are written as JSON lines:
/// all of them when `stream` is set, otherwise only the last one, on
/// [`RendererBackend::finish`].
pub struct HeadlessRenderer {
    runtime_tx: mpsc::Sender<ExplorerEvent>,
    metrics: TextMetrics,
    stream: bool,
    writer: Box<dyn Write + Send>,
    generation: Option<u64>,
    mounted: HashSet<Identifier>,
    latest: Option<Value>,
}

impl HeadlessRenderer {
    pub fn new(
        runtime_tx: mpsc::Sender<ExplorerEvent>,
        metrics: TextMetrics,
        stream: bool,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            runtime_tx,
            metrics,
            stream,
            writer,
            generation: None,
            mounted: HashSet::new(),
            latest: None,
        }
    }

    /// Convenience constructor writing to stdout.
    pub fn stdout(
        runtime_tx: mpsc::Sender<ExplorerEvent>,
        metrics: TextMetrics,
        stream: bool,
    ) -> Self {
        Self::new(runtime_tx, metrics, stream, Box::new(std::io::stdout()))
    }

    fn enter_generation(&mut self, generation: u64) {
        if self.generation != Some(generation) {
            debug!(generation, "new graph generation; remounting all nodes");
            self.generation = Some(generation);
            self.mounted.clear();
        }
    }

    /// Mount nodes not seen yet in this generation and measure them.
    fn mount_new_nodes(&mut self, frame: &RenderFrame) -> Vec<(Identifier, NodeDimension)> {
        let mut measured = Vec::new();
        for node in &frame.nodes {
            if self.mounted.insert(node.id.clone()) {
                measured.push((node.id.clone(), self.metrics.measure(node.id.as_str())));
            }
        }
        measured
    }

    fn emit(&mut self, line: Value) -> Result<()> {
        if self.stream {
            write_line(&mut self.writer, &line)?;
        }
        self.latest = Some(line);
        Ok(())
    }
}

fn write_line(writer: &mut Box<dyn Write + Send>, line: &Value) -> Result<()> {
    serde_json::to_writer(&mut *writer, line)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

impl RendererBackend for HeadlessRenderer {
    fn present(&mut self, frame: RenderFrame) -> RenderFuture<'_> {
        Box::pin(async move {
            self.enter_generation(frame.generation);
            let measured = self.mount_new_nodes(&frame);

            let line = json!({ "status": "graph", "frame": serde_json::to_value(&frame)? });
            self.emit(line)?;

            if !measured.is_empty() {
                debug!(count = measured.len(), "reporting measured node sizes");
                // Report from a separate task: the runtime is awaiting this call
                // and would never drain a full channel.
                let tx = self.runtime_tx.clone();
                tokio::spawn(async move {
                    for (id, dimensions) in measured {
                        if tx
                            .send(ExplorerEvent::DimensionsMeasured { id, dimensions })
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                });
            }
            Ok(())
        })
    }

    fn present_empty(&mut self, generation: u64, reason: EmptyReason) -> RenderFuture<'_> {
        Box::pin(async move {
            self.enter_generation(generation);
            info!(%reason, "showing empty graph");
            let line = json!({ "status": "empty", "generation": generation, "reason": reason });
            self.emit(line)
        })
    }

    fn finish(&mut self) -> RenderFuture<'_> {
        Box::pin(async move {
            if !self.stream {
                if let Some(line) = self.latest.take() {
                    write_line(&mut self.writer, &line)?;
                }
            }
            Ok(())
        })
    }
}
