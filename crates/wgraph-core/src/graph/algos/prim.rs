use crate::ensure_node;
use crate::error::Result;
use crate::graph::frontier::Frontier;
use crate::graph::types::{improves, NodeId, Weight};
use crate::graph::WeightedGraph;
use crate::trace_time;
use serde::Serialize;
use std::time::Instant;

/// Minimum spanning tree of the component containing `root`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree<W: Weight> {
    pub root: NodeId,
    /// Tree parent of each node; `None` for the root and for nodes the tree
    /// does not reach
    pub parent: Vec<Option<NodeId>>,
    /// Cost of the edge `parent[v] -> v`
    pub edge_cost: Vec<Option<W>>,
}

impl<W: Weight> SpanningTree<W> {
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(node).copied().flatten()
    }

    /// Whether `node` is the root or hangs off the tree
    pub fn spans(&self, node: NodeId) -> bool {
        node == self.root || self.parent(node).is_some()
    }

    /// Nodes outside the root's component
    pub fn unreachable(&self) -> Vec<NodeId> {
        (0..self.parent.len()).filter(|&v| !self.spans(v)).collect()
    }

    /// Tree edges as `(parent, child, cost)`, by child id
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, W)> + '_ {
        self.parent
            .iter()
            .zip(&self.edge_cost)
            .enumerate()
            .filter_map(|(child, (p, c))| Some(((*p)?, child, (*c)?)))
    }

    /// Sum of tree edge costs; `None` when it does not fit the cost type
    pub fn total_cost(&self) -> Option<W> {
        self.edges()
            .try_fold(W::ZERO, |acc, (_, _, c)| acc.checked_accumulate(c))
    }
}

/// Prim's algorithm rooted at node 0
pub fn prim<W: Weight>(graph: &WeightedGraph<W>) -> Result<SpanningTree<W>> {
    prim_from(graph, 0)
}

/// Prim's algorithm from an explicit root.
///
/// Edges are read as directed: only `u -> w` is considered when growing the
/// tree out of `u`. Link both directions for an undirected spanning tree.
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn prim_from<W: Weight>(graph: &WeightedGraph<W>, root: NodeId) -> Result<SpanningTree<W>> {
    ensure_node!(root, graph.node_count());
    let start = Instant::now();
    let n = graph.node_count();

    let mut best: Vec<Option<W>> = vec![None; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut frontier = Frontier::new(n);

    best[root] = Some(W::ZERO);
    frontier.relax(root, W::ZERO);

    while let Some((u, _)) = frontier.pop() {
        in_tree[u] = true;
        for (w, cost) in graph.out_edges(u) {
            if !in_tree[w] && improves(cost, best[w]) {
                parent[w] = Some(u);
                best[w] = Some(cost);
                frontier.relax(w, cost);
            }
        }
    }

    let edge_cost = parent
        .iter()
        .zip(&best)
        .map(|(p, b)| p.and(*b))
        .collect();
    let tree = SpanningTree {
        root,
        parent,
        edge_cost,
    };

    let unreachable = tree.unreachable().len();
    tracing::debug!(spanned = n - unreachable, unreachable, "prim finished");
    trace_time!(start, "prim");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn undirected(n: usize, edges: &[(usize, usize, i64)]) -> WeightedGraph<i64> {
        let mut g = WeightedGraph::new(n);
        for &(u, w, c) in edges {
            g.link(u, w, c).unwrap();
            g.link(w, u, c).unwrap();
        }
        g
    }

    #[test]
    fn test_prim_square_with_diagonal() {
        let g = undirected(4, &[(0, 1, 1), (1, 2, 2), (2, 3, 1), (3, 0, 4), (0, 2, 3)]);
        let tree = prim(&g).unwrap();

        assert_eq!(tree.parent, vec![None, Some(0), Some(1), Some(2)]);
        assert_eq!(tree.total_cost(), Some(4));
        assert!(tree.unreachable().is_empty());
    }

    #[test]
    fn test_prim_reports_other_components() {
        let g = undirected(5, &[(0, 1, 2), (1, 2, 2), (3, 4, 1)]);
        let tree = prim(&g).unwrap();

        assert_eq!(tree.unreachable(), vec![3, 4]);
        assert!(!tree.spans(3));
        assert!(tree.spans(0));
        assert_eq!(tree.total_cost(), Some(4));
    }

    #[test]
    fn test_prim_edges_listing() {
        let g = undirected(3, &[(0, 1, 5), (0, 2, 1), (1, 2, 1)]);
        let tree = prim(&g).unwrap();

        let edges: Vec<_> = tree.edges().collect();
        assert_eq!(edges, vec![(2, 1, 1), (0, 2, 1)]);
        assert_eq!(tree.total_cost(), Some(2));
    }

    #[test]
    fn test_prim_from_other_root() {
        let g = undirected(3, &[(0, 1, 5), (0, 2, 1), (1, 2, 1)]);
        let tree = prim_from(&g, 1).unwrap();

        assert_eq!(tree.root, 1);
        assert_eq!(tree.parent(1), None);
        assert_eq!(tree.parent(2), Some(1));
        assert_eq!(tree.parent(0), Some(2));
        assert_eq!(tree.total_cost(), Some(2));
    }

    #[test]
    fn test_prim_directed_edges_only() {
        // only 1 -> 0 exists, so nothing leaves the root
        let mut g: WeightedGraph<i64> = WeightedGraph::new(2);
        g.link(1, 0, 1).unwrap();
        let tree = prim(&g).unwrap();
        assert_eq!(tree.unreachable(), vec![1]);
    }

    #[test]
    fn test_prim_empty_graph() {
        let g: WeightedGraph<i64> = WeightedGraph::new(0);
        assert!(matches!(prim(&g), Err(GraphError::OutOfRange { node: 0, .. })));
    }

    #[test]
    fn test_prim_single_node() {
        let g: WeightedGraph<i64> = WeightedGraph::new(1);
        let tree = prim(&g).unwrap();
        assert_eq!(tree.parent, vec![None]);
        assert_eq!(tree.total_cost(), Some(0));
    }

    #[test]
    fn test_prim_total_cost_out_of_range() {
        let g = undirected(3, &[(0, 1, i64::MAX), (1, 2, 1)]);
        let tree = prim(&g).unwrap();

        assert_eq!(tree.edges().count(), 2);
        assert_eq!(tree.total_cost(), None);
    }
}
