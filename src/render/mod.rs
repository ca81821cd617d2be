// src/render/mod.rs

//! Renderer boundary.
//!
//! - [`frame`] defines what the core hands over: positioned frames and the
//!   empty state.
//! - [`backend`] is the `RendererBackend` trait the runtime drives.
//! - [`headless`] and [`metrics`] implement a renderer without a drawing
//!   surface that estimates node sizes from label text.

pub mod backend;
pub mod frame;
pub mod headless;
pub mod metrics;

pub use backend::{RenderFuture, RendererBackend};
pub use frame::{EmptyReason, NodePayload, RenderFrame};
pub use headless::HeadlessRenderer;
pub use metrics::TextMetrics;
