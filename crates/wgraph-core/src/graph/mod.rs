//! Weighted directed graphs and the algorithms that run on them
//!
//! - `weighted`: adjacency-list storage with one cost per edge
//! - `frontier`: indexed min-heap with decrease-key, shared by Dijkstra and Prim
//! - `algos`: shortest paths, spanning trees and all-pairs distances
//! - `path`: rebuilding node sequences from predecessor data

pub mod algos;
pub mod frontier;
pub mod path;
pub mod types;
pub mod weighted;

pub use algos::{
    all_pairs, augment, bellman_ford, dijkstra, floyd_warshall, johnson, johnson_with, path_cost,
    prim, prim_from, AllPairsPaths, DistanceMatrix, JohnsonOptions, ShortestPathTree,
    SingleSourceDistances, SpanningTree, HELPER_SOURCE,
};
pub use frontier::Frontier;
pub use types::{NodeId, Weight};
pub use weighted::{Edges, WeightedGraph};
