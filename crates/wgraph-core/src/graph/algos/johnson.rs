//! Johnson's all-pairs shortest paths
//!
//! Works on a helper graph of size `n + 1`: node 0 is a synthetic source with
//! a zero-cost edge to every real node, and original node `v` lives at
//! `v + 1`. Bellman-Ford from node 0 yields potentials `h`, every real edge is
//! reweighted to `cost + h[u] - h[w]` (never negative), Dijkstra runs from
//! every real node on the reweighted copy, and the potentials are taken back
//! out of each distance.

use crate::error::{GraphError, Result};
use crate::graph::algos::bellman_ford::bellman_ford;
use crate::graph::algos::dijkstra::dijkstra;
use crate::graph::types::{NodeId, Weight};
use crate::graph::WeightedGraph;
use crate::trace_time;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Synthetic source node of a helper graph
pub const HELPER_SOURCE: NodeId = 0;

/// How the per-source Dijkstra runs are dispatched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JohnsonOptions {
    /// Run the per-source Dijkstra passes on a rayon pool
    #[serde(default)]
    pub parallel: bool,
    /// Worker count for the pool; the global rayon pool when unset
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Dense `size x size` matrix of optional distances
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix<W: Weight> {
    rows: Vec<Vec<Option<W>>>,
}

impl<W: Weight> DistanceMatrix<W> {
    pub(crate) fn from_rows(rows: Vec<Vec<Option<W>>>) -> Self {
        Self { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Distance `from -> to`; `None` when unreachable or out of range
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<W> {
        self.rows.get(from)?.get(to).copied().flatten()
    }

    pub fn row(&self, from: NodeId) -> Option<&[Option<W>]> {
        self.rows.get(from).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<W>]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn into_rows(self) -> Vec<Vec<Option<W>>> {
        self.rows
    }
}

/// Build the helper graph for `original`: node 0 reaches every other node at
/// zero cost and original node `v` becomes `v + 1`
pub fn augment<W: Weight>(original: &WeightedGraph<W>) -> Result<WeightedGraph<W>> {
    let mut helper = WeightedGraph::new(original.node_count() + 1);
    for v in original.nodes() {
        helper.link(HELPER_SOURCE, v + 1, W::ZERO)?;
    }
    for (u, w, cost) in original.all_edges() {
        helper.link(u + 1, w + 1, cost)?;
    }
    Ok(helper)
}

/// All-pairs shortest paths of `original`, building the helper graph first
pub fn all_pairs<W: Weight>(original: &WeightedGraph<W>) -> Result<DistanceMatrix<W>> {
    johnson(&augment(original)?, original.node_count())
}

/// Johnson's algorithm on a helper graph with `n` real nodes, run
/// sequentially
pub fn johnson<W: Weight>(helper: &WeightedGraph<W>, n: usize) -> Result<DistanceMatrix<W>> {
    johnson_with(helper, n, &JohnsonOptions::default())
}

/// Johnson's algorithm on a helper graph with `n` real nodes.
///
/// The helper shape is a precondition and is not checked beyond
/// `n + 1 <= helper.node_count()`. A negative cycle in the original graph
/// fails with `NegativeCycleDetected` from the embedded Bellman-Ford run.
/// A reweighted cost or distance outside the cost type's range fails with
/// `CostOverflow`, naming helper node ids.
#[tracing::instrument(skip(helper, opts), fields(nodes = helper.node_count(), edges = helper.edge_count(), parallel = opts.parallel))]
pub fn johnson_with<W: Weight>(
    helper: &WeightedGraph<W>,
    n: usize,
    opts: &JohnsonOptions,
) -> Result<DistanceMatrix<W>> {
    if n >= helper.node_count() {
        return Err(GraphError::out_of_range(n, helper.node_count()));
    }
    let start = Instant::now();

    let potentials = bellman_ford(helper, HELPER_SOURCE)?;
    let h: Vec<W> = potentials
        .distance
        .iter()
        .map(|d| d.unwrap_or(W::ZERO))
        .collect();
    tracing::trace!(?h, "potentials");

    let reweighted = reweight(helper, n, &h)?;

    let row = |u: NodeId| -> Result<Vec<Option<W>>> {
        let tree = dijkstra(&reweighted, u + 1)?;
        (0..n)
            .map(|w| match tree.distance(w + 1) {
                Some(d) => shift(d, h[w + 1], h[u + 1])
                    .map(Some)
                    .ok_or(GraphError::CostOverflow {
                        from: u + 1,
                        to: w + 1,
                    }),
                None => Ok(None),
            })
            .collect()
    };

    let rows = if opts.parallel {
        match opts.threads {
            Some(threads) => {
                if threads == 0 {
                    crate::bail_invalid!("thread count", threads);
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(|| (0..n).into_par_iter().map(row).collect::<Result<Vec<_>>>())?
            }
            None => (0..n).into_par_iter().map(row).collect::<Result<Vec<_>>>()?,
        }
    } else {
        (0..n).map(row).collect::<Result<Vec<_>>>()?
    };

    tracing::debug!(n, "johnson finished");
    trace_time!(start, "johnson");
    Ok(DistanceMatrix::from_rows(rows))
}

/// `cost + from - to`, or `None` when it leaves the cost type's range
fn shift<W: Weight>(cost: W, from: W, to: W) -> Option<W> {
    from.checked_difference(to)?.checked_accumulate(cost)
}

/// Copy of `helper` with every real edge reweighted by the potentials
fn reweight<W: Weight>(helper: &WeightedGraph<W>, n: usize, h: &[W]) -> Result<WeightedGraph<W>> {
    let mut reweighted = helper.clone();
    for u in 1..=n {
        for (w, cost) in helper.out_edges(u) {
            let reduced =
                shift(cost, h[u], h[w]).ok_or(GraphError::CostOverflow { from: u, to: w })?;
            reweighted.link(u, w, reduced)?;
        }
    }
    Ok(reweighted)
}
