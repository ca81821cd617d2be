// src/api/mod.rs

//! The engine's read-only explorer API: wire types and the client.

pub mod client;
pub mod model;

pub use client::{fetch_snapshot, GraphSource, HttpGraphSource, SourceFuture};
pub use model::{ExplorerSnapshot, RawTask, RawTaskGraph, ResultVersion, TaskResults};
