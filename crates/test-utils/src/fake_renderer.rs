use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc;
use tracing::warn;
use taskgraph_explorer::engine::ExplorerEvent;
use taskgraph_explorer::identifier::Identifier;
use taskgraph_explorer::render::{EmptyReason, RenderFrame, RenderFuture, RendererBackend};
use taskgraph_explorer::types::NodeDimension;

/// A fake renderer that:
/// - records every frame and empty state it is asked to show
/// - "mounts" new nodes once per generation and immediately reports a fixed
///   size for each of them.
pub struct FakeRenderer {
    runtime_tx: mpsc::Sender<ExplorerEvent>,
    sizes: HashMap<String, NodeDimension>,
    default_size: NodeDimension,
    generation: Option<u64>,
    mounted: HashSet<Identifier>,
    frames: Vec<RenderFrame>,
    empties: Vec<(u64, EmptyReason)>,
    finished: bool,
}

impl FakeRenderer {
    pub fn new(runtime_tx: mpsc::Sender<ExplorerEvent>, default_size: NodeDimension) -> Self {
        Self {
            runtime_tx,
            sizes: HashMap::new(),
            default_size,
            generation: None,
            mounted: HashSet::new(),
            frames: Vec::new(),
            empties: Vec::new(),
            finished: false,
        }
    }

    /// Report `size` for the node whose canonical string is `id`.
    pub fn with_size(mut self, id: &str, size: NodeDimension) -> Self {
        self.sizes.insert(id.to_string(), size);
        self
    }

    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    pub fn empties(&self) -> &[(u64, EmptyReason)] {
        &self.empties
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    fn size_of(&self, id: &Identifier) -> NodeDimension {
        self.sizes
            .get(id.as_str())
            .copied()
            .unwrap_or(self.default_size)
    }
}

impl RendererBackend for FakeRenderer {
    fn present(&mut self, frame: RenderFrame) -> RenderFuture<'_> {
        Box::pin(async move {
            if self.generation != Some(frame.generation) {
                self.generation = Some(frame.generation);
                self.mounted.clear();
            }

            let mut measured = Vec::new();
            for node in &frame.nodes {
                if self.mounted.insert(node.id.clone()) {
                    measured.push((node.id.clone(), self.size_of(&node.id)));
                }
            }
            self.frames.push(frame);

            let tx = self.runtime_tx.clone();
            tokio::spawn(async move {
                for (id, dimensions) in measured {
                    if tx
                        .send(ExplorerEvent::DimensionsMeasured { id, dimensions })
                        .await
                        .is_err()
                    {
                        warn!("runtime gone; dropping remaining measurements");
                        break;
                    }
                }
            });
            Ok(())
        })
    }

    fn present_empty(&mut self, generation: u64, reason: EmptyReason) -> RenderFuture<'_> {
        Box::pin(async move {
            self.generation = Some(generation);
            self.mounted.clear();
            self.empties.push((generation, reason));
            Ok(())
        })
    }

    fn finish(&mut self) -> RenderFuture<'_> {
        Box::pin(async move {
            self.finished = true;
            Ok(())
        })
    }
}
