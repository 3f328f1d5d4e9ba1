//! wgraph Core Library
//!
//! Directed weighted graphs with a single numeric cost per edge, and the
//! classical algorithms that run on them: Dijkstra, Prim, Bellman-Ford,
//! Johnson and Floyd-Warshall.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;

pub use error::{GraphError, Result};
pub use graph::{NodeId, Weight, WeightedGraph};
