use proptest::prelude::*;
use wgraph::prelude::*;

/// Build a graph from `(u, w, cost)` triples; later duplicates overwrite
pub fn build(n: usize, edges: &[(usize, usize, i64)]) -> WeightedGraph<i64> {
    let mut g = WeightedGraph::new(n);
    for &(u, w, c) in edges {
        g.link(u, w, c).unwrap();
    }
    g
}

/// Link every edge in both directions
#[allow(dead_code)]
pub fn build_undirected(n: usize, edges: &[(usize, usize, i64)]) -> WeightedGraph<i64> {
    let mut g = WeightedGraph::new(n);
    for &(u, w, c) in edges {
        g.link(u, w, c).unwrap();
        g.link(w, u, c).unwrap();
    }
    g
}

/// Snapshot of adjacency order and costs, for detecting mutation
#[allow(dead_code)]
pub fn snapshot(g: &WeightedGraph<i64>) -> (usize, Vec<(usize, usize, i64)>) {
    (g.edge_count(), g.all_edges().collect())
}

/// Kruskal's minimum spanning forest weight over an undirected edge list
#[allow(dead_code)]
pub fn kruskal_weight(n: usize, edges: &[(usize, usize, i64)]) -> i64 {
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    let mut sorted = edges.to_vec();
    sorted.sort_by_key(|&(_, _, c)| c);

    let mut total = 0;
    for (u, w, c) in sorted {
        let (ru, rw) = (find(&mut parent, u), find(&mut parent, w));
        if ru != rw {
            parent[ru] = rw;
            total += c;
        }
    }
    total
}

/// Random graph with node count in `nodes` and costs in `costs`
#[allow(dead_code)]
pub fn arb_graph(
    nodes: std::ops::Range<usize>,
    costs: std::ops::Range<i64>,
    max_edges: usize,
) -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>)> {
    nodes.prop_flat_map(move |n| {
        let edge = (0..n, 0..n, costs.clone());
        (Just(n), prop::collection::vec(edge, 0..max_edges))
    })
}
