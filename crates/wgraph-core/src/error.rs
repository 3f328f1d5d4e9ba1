//! Error types for wgraph
//!
//! Errors fall into two groups:
//! - local usage errors (bad node ids, missing edges, invalid costs) surfaced
//!   immediately by graph operations
//! - algorithm failures (negative cycles) that abort the running computation

mod macros;

use thiserror::Error;

/// Errors that can occur during graph operations and algorithm runs
#[derive(Error, Debug)]
pub enum GraphError {
    /// Node id outside `[0, node_count)`, or a negative node count
    #[error("node {node} is out of range (graph has {node_count} nodes)")]
    OutOfRange { node: i64, node_count: usize },

    #[error("negative-weight cycle detected (reachable from node {start})")]
    NegativeCycleDetected { start: usize },

    #[error("path cost through edge {from} -> {to} does not fit the cost type")]
    CostOverflow { from: usize, to: usize },

    #[error("no edge {from} -> {to}")]
    MissingEdge { from: usize, to: usize },

    #[error("invalid cost on edge {from} -> {to}: {cost}")]
    InvalidCost {
        from: usize,
        to: usize,
        cost: String,
    },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GraphError {
    /// Create an error for a node id outside `[0, node_count)`
    pub fn out_of_range(node: usize, node_count: usize) -> Self {
        GraphError::OutOfRange {
            node: i64::try_from(node).unwrap_or(i64::MAX),
            node_count,
        }
    }

    /// Create the error for a graph requested with a negative node count
    pub fn negative_node_count(count: i64) -> Self {
        GraphError::OutOfRange {
            node: count,
            node_count: 0,
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GraphError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether the error comes from misuse of the graph API rather than
    /// from an algorithm or the environment
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            GraphError::OutOfRange { .. }
                | GraphError::MissingEdge { .. }
                | GraphError::InvalidCost { .. }
                | GraphError::InvalidValue { .. }
        )
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GraphError::OutOfRange { .. } => "out_of_range",
            GraphError::NegativeCycleDetected { .. } => "negative_cycle_detected",
            GraphError::CostOverflow { .. } => "cost_overflow",
            GraphError::MissingEdge { .. } => "missing_edge",
            GraphError::InvalidCost { .. } => "invalid_cost",
            GraphError::InvalidValue { .. } => "invalid_value",
            GraphError::Io(_) => "io_error",
            GraphError::Toml(_) => "toml_error",
            GraphError::TomlSer(_) => "toml_error",
            GraphError::ThreadPool(_) => "thread_pool",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "type": self.error_type(),
            "message": self.to_string(),
            "usage": self.is_usage_error(),
        });

        match self {
            GraphError::OutOfRange { node, node_count } => {
                error_obj["node"] = serde_json::json!(node);
                error_obj["node_count"] = serde_json::json!(node_count);
            }
            GraphError::NegativeCycleDetected { start } => {
                error_obj["start"] = serde_json::json!(start);
            }
            GraphError::MissingEdge { from, to }
            | GraphError::CostOverflow { from, to }
            | GraphError::InvalidCost { from, to, .. } => {
                error_obj["edge"] = serde_json::json!([from, to]);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for wgraph operations
pub type Result<T> = std::result::Result<T, GraphError>;
