//! Adjacency-list storage for directed weighted graphs
//!
//! Each node keeps an ordered list of distinct successors, most recently
//! linked first. Costs live in a map keyed by the ordered node pair, so every
//! successor in `adjacency[u]` has exactly one entry `(u, w)` in `weights`.

use crate::ensure_node;
use crate::error::{GraphError, Result};
use crate::graph::types::{NodeId, Weight};
use std::collections::vec_deque;
use std::collections::{HashMap, VecDeque};

/// A directed graph over nodes `0..node_count` with one cost per edge
#[derive(Debug, Clone)]
pub struct WeightedGraph<W: Weight> {
    adjacency: Vec<VecDeque<NodeId>>,
    weights: HashMap<(NodeId, NodeId), W>,
    edge_count: usize,
}

/// Lazy iterator over the successor ids of a node, in storage order.
///
/// Cloning restarts the walk from the current position, so callers can
/// traverse the same list more than once.
#[derive(Debug, Clone)]
pub struct Edges<'a> {
    inner: vec_deque::Iter<'a, NodeId>,
}

impl Iterator for Edges<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Edges<'_> {}

impl<W: Weight> WeightedGraph<W> {
    /// Create a graph with `node_count` nodes and no edges
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![VecDeque::new(); node_count],
            weights: HashMap::with_capacity(node_count),
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All node ids, in order
    pub fn nodes(&self) -> std::ops::Range<NodeId> {
        0..self.node_count()
    }

    /// Insert edge `u -> w`, or overwrite its cost if it already exists.
    ///
    /// Returns `true` when a new edge was created. New successors go to the
    /// front of `u`'s list; an overwritten edge keeps its position.
    pub fn link(&mut self, u: NodeId, w: NodeId, cost: W) -> Result<bool> {
        ensure_node!(u, self.node_count());
        ensure_node!(w, self.node_count());
        if !cost.is_valid() {
            return Err(GraphError::InvalidCost {
                from: u,
                to: w,
                cost: cost.to_string(),
            });
        }

        let inserted = self.weights.insert((u, w), cost).is_none();
        if inserted {
            self.adjacency[u].push_front(w);
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Remove edge `u -> w`. Returns `false`, changing nothing, if absent.
    pub fn unlink(&mut self, u: NodeId, w: NodeId) -> Result<bool> {
        ensure_node!(u, self.node_count());
        ensure_node!(w, self.node_count());

        if self.weights.remove(&(u, w)).is_none() {
            return Ok(false);
        }
        let list = &mut self.adjacency[u];
        if let Some(pos) = list.iter().position(|&x| x == w) {
            list.remove(pos);
        }
        self.edge_count -= 1;
        Ok(true)
    }

    /// Remove every edge entering or leaving `u`. Returns how many were removed.
    pub fn delete_node(&mut self, u: NodeId) -> Result<usize> {
        ensure_node!(u, self.node_count());

        let mut removed = 0;
        for w in self.nodes() {
            if self.unlink(u, w)? {
                removed += 1;
            }
            if w != u && self.unlink(w, u)? {
                removed += 1;
            }
        }
        tracing::trace!(node = u, removed, "delete_node");
        Ok(removed)
    }

    /// Cost of edge `u -> w`
    pub fn weight(&self, u: NodeId, w: NodeId) -> Result<W> {
        ensure_node!(u, self.node_count());
        ensure_node!(w, self.node_count());
        self.weights
            .get(&(u, w))
            .copied()
            .ok_or(GraphError::MissingEdge { from: u, to: w })
    }

    pub fn has_edge(&self, u: NodeId, w: NodeId) -> bool {
        self.weights.contains_key(&(u, w))
    }

    /// Successor ids of `u`, in storage order
    pub fn edges(&self, u: NodeId) -> Result<Edges<'_>> {
        ensure_node!(u, self.node_count());
        Ok(Edges {
            inner: self.adjacency[u].iter(),
        })
    }

    /// Successors of `u` paired with the edge cost
    pub fn successors(&self, u: NodeId) -> Result<impl Iterator<Item = (NodeId, W)> + Clone + '_> {
        ensure_node!(u, self.node_count());
        Ok(self.out_edges(u))
    }

    pub fn out_degree(&self, u: NodeId) -> Result<usize> {
        ensure_node!(u, self.node_count());
        Ok(self.adjacency[u].len())
    }

    /// Every edge `(u, w, cost)`, grouped by source node in id order
    pub fn all_edges(&self) -> impl Iterator<Item = (NodeId, NodeId, W)> + '_ {
        self.nodes()
            .flat_map(move |u| self.out_edges(u).map(move |(w, cost)| (u, w, cost)))
    }

    /// Unchecked successor walk for algorithms that already validated `u`
    pub(crate) fn out_edges(&self, u: NodeId) -> impl Iterator<Item = (NodeId, W)> + Clone + '_ {
        self.adjacency[u].iter().map(move |&w| (w, self.weights[&(u, w)]))
    }
}

impl<W: Weight> TryFrom<i64> for WeightedGraph<W> {
    type Error = GraphError;

    fn try_from(node_count: i64) -> Result<Self> {
        let count =
            usize::try_from(node_count).map_err(|_| GraphError::negative_node_count(node_count))?;
        Ok(Self::new(count))
    }
}
