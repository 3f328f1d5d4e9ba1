//! Path reconstruction from predecessor structures

use crate::graph::types::NodeId;

/// Walk back from `target` to `source` using `predecessor`, returning the
/// path in forward order.
///
/// Returns `None` when the chain breaks before reaching `source`, or when it
/// runs longer than `node_count` steps (a cycle in the predecessor data).
pub fn walk_predecessors<F>(
    source: NodeId,
    target: NodeId,
    node_count: usize,
    mut predecessor: F,
) -> Option<Vec<NodeId>>
where
    F: FnMut(NodeId) -> Option<NodeId>,
{
    let mut path = vec![target];
    let mut current = target;

    while current != source {
        if path.len() > node_count {
            return None;
        }
        current = predecessor(current)?;
        path.push(current);
    }

    path.reverse();
    Some(path)
}
