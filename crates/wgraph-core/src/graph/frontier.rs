//! Priority frontier with decrease-key
//!
//! An indexed binary min-heap over node ids, ordered by `(key, node)`. The
//! position of every queued node is tracked, so lowering a key is a sift-up
//! in place. Keys only change through [`Frontier::relax`], which inserts or
//! decreases in one step and never lets a key go up.

use crate::graph::types::{NodeId, Weight};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Frontier<W: Weight> {
    heap: Vec<NodeId>,
    position: Vec<Option<usize>>,
    key: Vec<Option<W>>,
}

impl<W: Weight> Frontier<W> {
    /// Create an empty frontier able to hold nodes `0..node_count`
    pub fn new(node_count: usize) -> Self {
        Self {
            heap: Vec::new(),
            position: vec![None; node_count],
            key: vec![None; node_count],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.position[node].is_some()
    }

    /// Current key of a queued node
    pub fn key(&self, node: NodeId) -> Option<W> {
        self.position[node].and(self.key[node])
    }

    /// Insert `node` with `key`, or lower its key if already queued.
    ///
    /// Returns `true` when the frontier changed. A key that is not strictly
    /// lower than the queued one is ignored.
    pub fn relax(&mut self, node: NodeId, key: W) -> bool {
        match self.position[node] {
            Some(pos) => {
                let current = self.key[node];
                if current.is_some_and(|k| key.order(&k) != Ordering::Less) {
                    return false;
                }
                self.key[node] = Some(key);
                self.sift_up(pos);
            }
            None => {
                self.key[node] = Some(key);
                self.heap.push(node);
                let pos = self.heap.len() - 1;
                self.position[node] = Some(pos);
                self.sift_up(pos);
            }
        }
        true
    }

    /// Remove and return the node with the smallest `(key, node)`
    pub fn pop(&mut self) -> Option<(NodeId, W)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let node = self.heap.pop()?;
        self.position[node] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        let key = self.key[node].take()?;
        Some((node, key))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (na, nb) = (self.heap[a], self.heap[b]);
        let ordering = match (self.key[na], self.key[nb]) {
            (Some(ka), Some(kb)) => ka.order(&kb),
            _ => Ordering::Equal,
        };
        ordering.then(na.cmp(&nb)) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
