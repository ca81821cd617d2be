// src/render/backend.rs

//! Pluggable renderer abstraction.
//!
//! The runtime talks to a `RendererBackend` instead of a concrete drawing
//! surface. This keeps the feedback loop testable without any UI:
//!
//! - [`super::HeadlessRenderer`] is the implementation the binary uses. It
//!   estimates node sizes from label text and prints frames as JSON.
//! - Tests can provide their own backend that records frames and reports
//!   fixed measurements back as `ExplorerEvent`s.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::render::frame::{EmptyReason, RenderFrame};

/// Boxed future returned by renderer calls.
pub type RenderFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Trait abstracting the drawing surface.
///
/// Implementations own mounting and measurement. After mounting or resizing
/// a node they report its size by sending
/// `ExplorerEvent::DimensionsMeasured` back to the runtime. They must not
/// block waiting for the runtime to consume those events, since the runtime
/// is the one awaiting this call.
pub trait RendererBackend: Send {
    /// Draw (or redraw) a positioned graph.
    fn present(&mut self, frame: RenderFrame) -> RenderFuture<'_>;

    /// Replace whatever is shown with the empty state.
    fn present_empty(&mut self, generation: u64, reason: EmptyReason) -> RenderFuture<'_>;

    /// Called once when the runtime stops.
    fn finish(&mut self) -> RenderFuture<'_> {
        Box::pin(async { Ok(()) })
    }
}
