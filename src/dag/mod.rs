// src/dag/mod.rs

//! Validated task graph.
//!
//! - [`graph`] holds the immutable, indexed DAG of tasks.
//! - [`validate`] turns the engine's raw task list into a [`TaskGraph`],
//!   rejecting duplicates, dangling references and cycles.

pub mod graph;
pub mod validate;

pub use graph::{TaskGraph, TaskNode};
