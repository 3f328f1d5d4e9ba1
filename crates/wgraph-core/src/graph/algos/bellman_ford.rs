//! Bellman-Ford single-source shortest paths
//!
//! Tolerates negative edge costs. After `node_count` relaxation passes any
//! edge that still improves a distance lies on (or behind) a negative cycle
//! reachable from the source, and the run fails instead of returning
//! distances.

use crate::ensure_node;
use crate::error::{GraphError, Result};
use crate::graph::types::{improves, step, NodeId, Step, Weight};
use crate::graph::WeightedGraph;
use crate::trace_time;
use serde::Serialize;
use std::time::Instant;

/// Distances from a single source; `None` for unreachable nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleSourceDistances<W: Weight> {
    pub source: NodeId,
    pub distance: Vec<Option<W>>,
}

impl<W: Weight> SingleSourceDistances<W> {
    pub fn distance(&self, node: NodeId) -> Option<W> {
        self.distance.get(node).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }
}

/// State carried across relaxation passes
struct BellmanFordState<W: Weight> {
    distance: Vec<Option<W>>,
    parent: Vec<Option<NodeId>>,
    /// Tail of an edge whose candidate cost overflowed, per head node
    overflowed: Vec<Option<NodeId>>,
}

impl<W: Weight> BellmanFordState<W> {
    fn new(node_count: usize, source: NodeId) -> Self {
        let mut state = Self {
            distance: vec![None; node_count],
            parent: vec![None; node_count],
            overflowed: vec![None; node_count],
        };
        state.distance[source] = Some(W::ZERO);
        state
    }

    /// Whether `ancestor` is `node` or lies on its parent chain
    fn descends_from(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        for _ in 0..=self.parent.len() {
            match current {
                Some(x) if x == ancestor => return true,
                Some(x) => current = self.parent[x],
                None => return false,
            }
        }
        false
    }

    /// One pass over every edge; returns whether any distance improved
    fn relax_all(&mut self, edges: &[(NodeId, NodeId, W)], source: NodeId) -> Result<bool> {
        let mut updated = false;
        for &(u, w, cost) in edges {
            match step(self.distance[u], cost) {
                Step::Reached(candidate) => {
                    if improves(candidate, self.distance[w]) {
                        self.distance[w] = Some(candidate);
                        self.parent[w] = Some(u);
                        updated = true;
                    }
                }
                Step::Unreached => {}
                Step::Overflow => {
                    self.overflowed[w].get_or_insert(u);
                }
                // w is above u in the parent tree, so the loop back to w is negative
                Step::Underflow if self.descends_from(u, w) => {
                    tracing::debug!(source, from = u, to = w, "negative cycle hit the cost floor");
                    return Err(GraphError::NegativeCycleDetected { start: source });
                }
                Step::Underflow => return Err(GraphError::CostOverflow { from: u, to: w }),
            }
        }
        Ok(updated)
    }

    /// An edge that still improves its head once distances should be final
    fn improving_edge(&self, edges: &[(NodeId, NodeId, W)]) -> Option<(NodeId, NodeId)> {
        edges
            .iter()
            .find(|&&(u, w, cost)| match step(self.distance[u], cost) {
                Step::Reached(candidate) => improves(candidate, self.distance[w]),
                Step::Underflow => true,
                Step::Unreached | Step::Overflow => false,
            })
            .map(|&(u, w, _)| (u, w))
    }

    /// A node only reachable through overflowing paths has no representable
    /// distance
    fn check_overflow(&self) -> Result<()> {
        let unrepresentable = self
            .overflowed
            .iter()
            .zip(&self.distance)
            .enumerate()
            .find_map(|(w, (tail, d))| tail.filter(|_| d.is_none()).map(|u| (u, w)));
        match unrepresentable {
            Some((from, to)) => Err(GraphError::CostOverflow { from, to }),
            None => Ok(()),
        }
    }
}

/// Bellman-Ford from `source`. O(N * E).
///
/// Integer path costs are checked: a distance below the type's minimum that
/// closes a loop in the parent tree is a negative cycle, any other
/// unrepresentable distance fails with `CostOverflow`.
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn bellman_ford<W: Weight>(
    graph: &WeightedGraph<W>,
    source: NodeId,
) -> Result<SingleSourceDistances<W>> {
    ensure_node!(source, graph.node_count());
    let start = Instant::now();

    let edges: Vec<_> = graph.all_edges().collect();
    let mut state = BellmanFordState::new(graph.node_count(), source);

    let mut passes = 0usize;
    for _ in 0..graph.node_count() {
        passes += 1;
        if !state.relax_all(&edges, source)? {
            break;
        }
    }

    if let Some((u, w)) = state.improving_edge(&edges) {
        tracing::debug!(source, from = u, to = w, passes, "negative cycle detected");
        return Err(GraphError::NegativeCycleDetected { start: source });
    }
    state.check_overflow()?;

    tracing::debug!(passes, "bellman_ford finished");
    trace_time!(start, "bellman_ford");
    Ok(SingleSourceDistances {
        source,
        distance: state.distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize, i64)]) -> WeightedGraph<i64> {
        let mut g = WeightedGraph::new(n);
        for &(u, w, c) in edges {
            g.link(u, w, c).unwrap();
        }
        g
    }

    #[test]
    fn test_bellman_ford_negative_edges() {
        let g = graph(4, &[(0, 1, 4), (0, 2, 5), (2, 1, -3), (1, 3, 2)]);
        let result = bellman_ford(&g, 0).unwrap();

        assert_eq!(result.distance, vec![Some(0), Some(2), Some(5), Some(4)]);
    }

    #[test]
    fn test_bellman_ford_two_node_negative_cycle() {
        let g = graph(2, &[(0, 1, 5), (1, 0, -7)]);
        let err = bellman_ford(&g, 0).unwrap_err();
        assert!(matches!(err, GraphError::NegativeCycleDetected { start: 0 }));
    }

    #[test]
    fn test_bellman_ford_negative_self_loop() {
        let g = graph(2, &[(0, 1, 1), (1, 1, -1)]);
        assert!(matches!(
            bellman_ford(&g, 0),
            Err(GraphError::NegativeCycleDetected { .. })
        ));
    }

    #[test]
    fn test_bellman_ford_ignores_unreachable_cycle() {
        // the cycle 2 <-> 3 cannot be reached from 0
        let g = graph(4, &[(0, 1, 1), (2, 3, 1), (3, 2, -5)]);
        let result = bellman_ford(&g, 0).unwrap();

        assert_eq!(result.distance(1), Some(1));
        assert!(!result.is_reachable(2));
        assert!(!result.is_reachable(3));
    }

    #[test]
    fn test_bellman_ford_zero_cycle_is_fine() {
        let g = graph(3, &[(0, 1, 2), (1, 2, -1), (2, 1, 1)]);
        let result = bellman_ford(&g, 0).unwrap();
        assert_eq!(result.distance, vec![Some(0), Some(2), Some(1)]);
    }

    #[test]
    fn test_bellman_ford_source_out_of_range() {
        let g = graph(1, &[]);
        assert!(matches!(
            bellman_ford(&g, 3),
            Err(GraphError::OutOfRange { node: 3, .. })
        ));
    }

    #[test]
    fn test_bellman_ford_negative_chain() {
        let n = 6;
        let mut g: WeightedGraph<i64> = WeightedGraph::new(n);
        for u in (0..n - 1).rev() {
            g.link(u, u + 1, -1).unwrap();
        }
        let result = bellman_ford(&g, 0).unwrap();
        let expected: Vec<_> = (0..n as i64).map(|d| Some(-d)).collect();
        assert_eq!(result.distance, expected);
    }

    #[test]
    fn test_bellman_ford_float_costs() {
        let mut g: WeightedGraph<f64> = WeightedGraph::new(3);
        g.link(0, 1, 1.5).unwrap();
        g.link(1, 2, -0.5).unwrap();
        g.link(0, 2, 1.25).unwrap();
        let result = bellman_ford(&g, 0).unwrap();
        assert_eq!(result.distance(2), Some(1.0));
    }

    #[test]
    fn test_bellman_ford_negative_cycle_at_cost_floor() {
        let half = i64::MIN / 2;
        let g = graph(2, &[(0, 1, half), (1, 0, half)]);
        assert!(matches!(
            bellman_ford(&g, 0),
            Err(GraphError::NegativeCycleDetected { start: 0 })
        ));
    }

    #[test]
    fn test_bellman_ford_reaches_cost_floor_exactly() {
        let half = i64::MIN / 2;
        let g = graph(3, &[(0, 1, half), (1, 2, half)]);
        let result = bellman_ford(&g, 0).unwrap();
        assert_eq!(result.distance(2), Some(i64::MIN));
    }

    #[test]
    fn test_bellman_ford_path_below_cost_floor() {
        let half = i64::MIN / 2;
        let g = graph(3, &[(0, 1, half - 1), (1, 2, half)]);
        assert!(matches!(
            bellman_ford(&g, 0),
            Err(GraphError::CostOverflow { from: 1, to: 2 })
        ));
    }

    #[test]
    fn test_bellman_ford_path_above_cost_ceiling() {
        let g = graph(3, &[(0, 1, i64::MAX), (1, 2, 1)]);
        assert!(matches!(
            bellman_ford(&g, 0),
            Err(GraphError::CostOverflow { from: 1, to: 2 })
        ));

        // a cheaper route keeps node 2 representable
        let g = graph(3, &[(0, 1, i64::MAX), (1, 2, 1), (0, 2, -3)]);
        let result = bellman_ford(&g, 0).unwrap();
        assert_eq!(result.distance, vec![Some(0), Some(i64::MAX), Some(-3)]);
    }
}
