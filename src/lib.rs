//! wgraph - weighted directed graph toolkit
//!
//! Re-exports the core graph and algorithm API, plus a small [`Toolkit`]
//! that carries the loaded configuration into the algorithms that use it.
//!
//! ```rust
//! use wgraph::prelude::*;
//!
//! let mut g: WeightedGraph<i64> = WeightedGraph::new(3);
//! g.link(0, 1, 4).unwrap();
//! g.link(0, 2, 1).unwrap();
//! g.link(2, 1, 1).unwrap();
//!
//! let tree = dijkstra(&g, 0).unwrap();
//! assert_eq!(tree.distance(1), Some(2));
//! assert_eq!(tree.predecessors(1), &[2]);
//! ```

pub use wgraph_core::{config, error, graph, logging};
pub use wgraph_core::{GraphError, NodeId, Result, Weight, WeightedGraph};

use wgraph_core::config::ToolkitConfig;
use wgraph_core::graph::{augment, johnson_with, DistanceMatrix};

/// Everything needed to build graphs and run algorithms
pub mod prelude {
    pub use wgraph_core::config::ToolkitConfig;
    pub use wgraph_core::graph::*;
    pub use wgraph_core::{GraphError, Result};

    pub use crate::Toolkit;
}

/// Configured entry point for callers that load settings from TOML
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    config: ToolkitConfig,
}

impl Toolkit {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    /// Build from the file named by `WGRAPH_CONFIG`, or defaults
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ToolkitConfig::load_from_env()?))
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Install the tracing subscriber described by the `[logging]` section.
    ///
    /// A subscriber that is already installed is left in place.
    pub fn init_logging(&self) {
        if let Err(e) = logging::init_from_config(&self.config.logging) {
            tracing::warn!(error = %e, "logging already initialized");
        }
    }

    /// All-pairs shortest paths of `original` using the `[johnson]` settings
    pub fn all_pairs<W: Weight>(&self, original: &WeightedGraph<W>) -> Result<DistanceMatrix<W>> {
        let helper = augment(original)?;
        johnson_with(&helper, original.node_count(), &self.config.johnson)
    }
}
