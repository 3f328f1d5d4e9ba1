//! Graph algorithm implementations
//!
//! - `dijkstra`: single-source shortest paths, non-negative costs, tie tracking
//! - `prim`: minimum spanning tree grown from a root
//! - `bellman_ford`: single-source shortest paths with negative costs
//! - `johnson`: all-pairs shortest paths via Bellman-Ford reweighting
//! - `floyd_warshall`: dense all-pairs shortest paths with path recovery

pub mod bellman_ford;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod johnson;
pub mod prim;

pub use bellman_ford::{bellman_ford, SingleSourceDistances};
pub use dijkstra::{dijkstra, ShortestPathTree};
pub use floyd_warshall::{floyd_warshall, path_cost, AllPairsPaths};
pub use johnson::{
    all_pairs, augment, johnson, johnson_with, DistanceMatrix, JohnsonOptions, HELPER_SOURCE,
};
pub use prim::{prim, prim_from, SpanningTree};
