use crate::ensure_node;
use crate::error::{GraphError, Result};
use crate::graph::frontier::Frontier;
use crate::graph::path::walk_predecessors;
use crate::graph::types::{improves, step, NodeId, Step, Weight};
use crate::graph::WeightedGraph;
use crate::trace_time;
use serde::Serialize;
use std::time::Instant;

/// Single-source shortest paths with every tying predecessor recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathTree<W: Weight> {
    pub source: NodeId,
    /// Best cost from `source`; `None` for unreachable nodes
    pub distance: Vec<Option<W>>,
    /// Nodes `p` with `distance[v] == distance[p] + weight(p, v)`, in
    /// discovery order
    pub predecessors: Vec<Vec<NodeId>>,
}

impl<W: Weight> ShortestPathTree<W> {
    pub fn distance(&self, node: NodeId) -> Option<W> {
        self.distance.get(node).copied().flatten()
    }

    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.predecessors.get(node).map_or(&[], |p| p.as_slice())
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }

    /// Nodes with a finite distance, in id order
    pub fn reachable(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.distance
            .iter()
            .enumerate()
            .filter_map(|(node, d)| d.map(|_| node))
    }

    /// One shortest path `source..=target`, following the first recorded
    /// predecessor of each node
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }
        walk_predecessors(self.source, target, self.distance.len(), |node| {
            self.predecessors(node).first().copied()
        })
    }
}

/// State tracked during one Dijkstra run
struct DijkstraState<W: Weight> {
    distance: Vec<Option<W>>,
    predecessors: Vec<Vec<NodeId>>,
    settled: Vec<bool>,
    /// Tail of an edge whose candidate cost overflowed, per head node
    overflowed: Vec<Option<NodeId>>,
    frontier: Frontier<W>,
}

impl<W: Weight> DijkstraState<W> {
    fn new(node_count: usize, source: NodeId) -> Self {
        let mut state = Self {
            distance: vec![None; node_count],
            predecessors: vec![Vec::new(); node_count],
            settled: vec![false; node_count],
            overflowed: vec![None; node_count],
            frontier: Frontier::new(node_count),
        };
        state.distance[source] = Some(W::ZERO);
        state.frontier.relax(source, W::ZERO);
        state
    }

    /// Relax edge `u -> w` whose tail is already final
    fn relax(&mut self, u: NodeId, w: NodeId, cost: W) -> Result<()> {
        let candidate = match step(self.distance[u], cost) {
            Step::Reached(candidate) => candidate,
            Step::Unreached => return Ok(()),
            Step::Overflow => {
                self.overflowed[w].get_or_insert(u);
                return Ok(());
            }
            Step::Underflow => return Err(GraphError::CostOverflow { from: u, to: w }),
        };
        if improves(candidate, self.distance[w]) {
            // only reachable through a negative edge; never reopen a settled node
            if self.settled[w] {
                return Ok(());
            }
            self.predecessors[w].clear();
            self.predecessors[w].push(u);
            self.distance[w] = Some(candidate);
            self.frontier.relax(w, candidate);
        } else if self.distance[w] == Some(candidate) {
            self.predecessors[w].push(u);
        }
        Ok(())
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

/// Dijkstra's algorithm from `source`.
///
/// All edge costs must be non-negative; with negative costs the result is
/// meaningless (use Bellman-Ford instead). Runs in O(E log N).
///
/// Fails with `CostOverflow` when a reachable node's distance does not fit
/// the cost type.
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn dijkstra<W: Weight>(graph: &WeightedGraph<W>, source: NodeId) -> Result<ShortestPathTree<W>> {
    ensure_node!(source, graph.node_count());
    let start = Instant::now();

    let mut state = DijkstraState::new(graph.node_count(), source);
    let mut settled = 0usize;

    while let Some((u, _)) = state.frontier.pop() {
        // distance[u] is final from here on
        state.settled[u] = true;
        settled += 1;
        for (w, cost) in graph.out_edges(u) {
            state.relax(u, w, cost)?;
        }
    }
    state.check_overflow()?;

    tracing::debug!(settled, "dijkstra finished");
    trace_time!(start, "dijkstra");

    Ok(ShortestPathTree {
        source,
        distance: state.distance,
        predecessors: state.predecessors,
    })
}
