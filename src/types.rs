// src/types.rs

//! Small value types shared by the graph model, the layout engine and the
//! renderer boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of task, as reported by the engine in `task_type`.
///
/// The engine may grow new task kinds; anything we do not recognise becomes
/// [`TaskType::Unknown`] and is rendered with a generic style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    RunCommand,
    RunExperiment,
    Group,
    Combine,
    RunExperimentGroup,
    Unknown,
}

impl TaskType {
    /// Classify a wire string. Total: unknown strings map to `Unknown`.
    pub fn classify(raw: &str) -> Self {
        match raw.trim() {
            "run_command" => TaskType::RunCommand,
            "run_experiment" => TaskType::RunExperiment,
            "group" => TaskType::Group,
            "combine" => TaskType::Combine,
            "run_experiment_group" => TaskType::RunExperimentGroup,
            _ => TaskType::Unknown,
        }
    }

    pub fn is_unknown(self) -> bool {
        self == TaskType::Unknown
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskType::RunCommand => "run_command",
            TaskType::RunExperiment => "run_experiment",
            TaskType::Group => "group",
            TaskType::Combine => "combine",
            TaskType::RunExperimentGroup => "run_experiment_group",
            TaskType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Measured size of a rendered node.
///
/// Equality is exact on both fields. The feedback loop depends on this to
/// recognise a repeated measurement and stop re-laying out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeDimension {
    pub width: f64,
    pub height: f64,
}

impl NodeDimension {
    pub const ZERO: NodeDimension = NodeDimension {
        width: 0.0,
        height: 0.0,
    };

    /// Negative or NaN components are clamped to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: clamp_non_negative(width),
            height: clamp_non_negative(height),
        }
    }
}

fn clamp_non_negative(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// A point in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which way the rank axis is drawn.
///
/// - `BottomToTop`: rank 0 (tasks without dependencies) sits at the bottom and
///   dependents stack above it. This is the default.
/// - `TopToBottom`: the mirror image, rank 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    BottomToTop,
    TopToBottom,
}

impl Default for LayoutDirection {
    fn default() -> Self {
        LayoutDirection::BottomToTop
    }
}

impl FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bottom_to_top" | "bt" => Ok(LayoutDirection::BottomToTop),
            "top_to_bottom" | "tb" => Ok(LayoutDirection::TopToBottom),
            other => Err(format!(
                "invalid layout direction: {other} (expected \"bottom_to_top\" or \"top_to_bottom\")"
            )),
        }
    }
}
