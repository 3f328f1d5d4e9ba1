use crate::error::{GraphError, Result};
use crate::graph::algos::johnson::DistanceMatrix;
use crate::graph::path::walk_predecessors;
use crate::graph::types::{add_distance, improves, NodeId, Weight};
use crate::graph::WeightedGraph;
use crate::trace_time;
use serde::Serialize;
use std::time::Instant;

/// All-pairs distances with the predecessor matrix needed to rebuild paths
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllPairsPaths<W: Weight> {
    pub distances: DistanceMatrix<W>,
    /// `predecessor[i][j]`: node right before `j` on the best `i -> j` path
    pub predecessor: Vec<Vec<Option<NodeId>>>,
}

impl<W: Weight> AllPairsPaths<W> {
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<W> {
        self.distances.get(from, to)
    }

    /// Node sequence of a shortest `from -> to` path
    pub fn path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        self.distance(from, to)?;
        let row = self.predecessor.get(from)?;
        walk_predecessors(from, to, row.len(), |node| row[node])
    }
}

/// Floyd-Warshall over a dense matrix. O(N^3) time, O(N^2) memory.
///
/// Fails with `NegativeCycleDetected` (naming a node on the cycle) when any
/// node ends up with a negative distance to itself, and with `CostOverflow`
/// when a distance does not fit the cost type.
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn floyd_warshall<W: Weight>(graph: &WeightedGraph<W>) -> Result<AllPairsPaths<W>> {
    let start = Instant::now();
    let n = graph.node_count();

    let mut dist: Vec<Vec<Option<W>>> = vec![vec![None; n]; n];
    let mut pred: Vec<Vec<Option<NodeId>>> = vec![vec![None; n]; n];
    let mut overflowed: Vec<(NodeId, NodeId)> = Vec::new();
    for i in 0..n {
        dist[i][i] = Some(W::ZERO);
    }
    for (u, w, cost) in graph.all_edges() {
        if improves(cost, dist[u][w]) {
            dist[u][w] = Some(cost);
            pred[u][w] = Some(u);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i][k] else {
                continue;
            };
            for j in 0..n {
                let Some(kj) = dist[k][j] else {
                    continue;
                };
                let Some(candidate) = ik.checked_accumulate(kj) else {
                    if kj < W::ZERO {
                        // below the floor: either a negative cycle or a
                        // distance the type cannot hold
                        return Err(negative_diagonal(&dist)
                            .map(|node| GraphError::NegativeCycleDetected { start: node })
                            .unwrap_or(GraphError::CostOverflow { from: i, to: j }));
                    }
                    if dist[i][j].is_none() {
                        overflowed.push((i, j));
                    }
                    continue;
                };
                if improves(candidate, dist[i][j]) {
                    dist[i][j] = Some(candidate);
                    pred[i][j] = pred[k][j];
                }
            }
        }
    }

    if let Some(node) = negative_diagonal(&dist) {
        tracing::debug!(node, "negative cycle detected");
        return Err(GraphError::NegativeCycleDetected { start: node });
    }
    if let Some((from, to)) = overflowed.into_iter().find(|&(i, j)| dist[i][j].is_none()) {
        return Err(GraphError::CostOverflow { from, to });
    }

    trace_time!(start, "floyd_warshall");
    Ok(AllPairsPaths {
        distances: DistanceMatrix::from_rows(dist),
        predecessor: pred,
    })
}

/// First node with a negative distance to itself
fn negative_diagonal<W: Weight>(dist: &[Vec<Option<W>>]) -> Option<NodeId> {
    (0..dist.len()).find(|&i| dist[i][i].is_some_and(|d| d < W::ZERO))
}

/// Sum of costs along `path`, if every hop is an edge of `graph`
pub fn path_cost<W: Weight>(graph: &WeightedGraph<W>, path: &[NodeId]) -> Option<W> {
    path.windows(2).try_fold(W::ZERO, |acc, hop| {
        add_distance(Some(acc), graph.weight(hop[0], hop[1]).ok()?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::algos::johnson::all_pairs;

    fn graph(n: usize, edges: &[(usize, usize, i64)]) -> WeightedGraph<i64> {
        let mut g = WeightedGraph::new(n);
        for &(u, w, c) in edges {
            g.link(u, w, c).unwrap();
        }
        g
    }

    #[test]
    fn test_floyd_warshall_small_graph() {
        let g = graph(4, &[(0, 1, 5), (0, 3, 10), (1, 2, 3), (2, 3, 1)]);
        let result = floyd_warshall(&g).unwrap();

        assert_eq!(result.distance(0, 3), Some(9));
        assert_eq!(result.path(0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(result.distance(3, 0), None);
        assert_eq!(result.path(3, 0), None);
        assert_eq!(result.path(2, 2), Some(vec![2]));
    }

    #[test]
    fn test_floyd_warshall_path_cost_matches_distance() {
        let g = graph(
            5,
            &[
                (0, 1, 3),
                (0, 2, 8),
                (0, 4, -4),
                (1, 3, 1),
                (1, 4, 7),
                (2, 1, 4),
                (3, 0, 2),
                (3, 2, -5),
                (4, 3, 6),
            ],
        );
        let result = floyd_warshall(&g).unwrap();

        for u in g.nodes() {
            for w in g.nodes() {
                let path = result.path(u, w).unwrap();
                assert_eq!(path.first(), Some(&u));
                assert_eq!(path.last(), Some(&w));
                assert_eq!(path_cost(&g, &path), result.distance(u, w));
            }
        }
    }

    #[test]
    fn test_floyd_warshall_agrees_with_johnson() {
        let g = graph(4, &[(0, 1, 1), (1, 2, -2), (2, 3, 2), (3, 1, 1), (0, 3, 4)]);
        let fw = floyd_warshall(&g).unwrap();
        let johnson = all_pairs(&g).unwrap();
        assert_eq!(fw.distances, johnson);
    }

    #[test]
    fn test_floyd_warshall_negative_cycle() {
        let g = graph(3, &[(0, 1, 1), (1, 2, -3), (2, 1, 1)]);
        assert!(matches!(
            floyd_warshall(&g),
            Err(GraphError::NegativeCycleDetected { .. })
        ));
    }

    #[test]
    fn test_floyd_warshall_costs_at_type_limits() {
        let quarter = i64::MIN / 4;
        let g = graph(3, &[(0, 1, quarter), (1, 2, quarter), (2, 0, i64::MAX)]);
        let result = floyd_warshall(&g).unwrap();

        assert_eq!(result.distance(0, 2), Some(2 * quarter));
        assert_eq!(result.distance(2, 0), Some(i64::MAX));
        assert_eq!(result.distance(2, 1), Some(i64::MAX + quarter));
    }

    #[test]
    fn test_floyd_warshall_negative_cycle_at_cost_floor() {
        let half = i64::MIN / 2;
        let g = graph(2, &[(0, 1, half), (1, 0, half)]);
        assert!(matches!(
            floyd_warshall(&g),
            Err(GraphError::NegativeCycleDetected { .. })
        ));
    }

    #[test]
    fn test_floyd_warshall_unrepresentable_distance() {
        let g = graph(3, &[(0, 1, i64::MAX), (1, 2, 1)]);
        assert!(matches!(
            floyd_warshall(&g),
            Err(GraphError::CostOverflow { from: 0, to: 2 })
        ));
    }

    #[test]
    fn test_path_cost_missing_hop() {
        let g = graph(3, &[(0, 1, 2)]);
        assert_eq!(path_cost(&g, &[0, 1]), Some(2));
        assert_eq!(path_cost(&g, &[0, 1, 2]), None);
        assert_eq!(path_cost(&g, &[1]), Some(0));

        let g = graph(3, &[(0, 1, i64::MAX), (1, 2, 1)]);
        assert_eq!(path_cost(&g, &[0, 1, 2]), None);
    }
}
