//! Max-priority frontier with an explicit total order
//!
//! Entries compare by score (higher first), then path length (shorter first),
//! then the name of the last reagent (smaller first), then insertion order
//! (earlier first).

use crate::search::node::SearchNode;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct FrontierEntry {
    score: f64,
    sequence: u64,
    node: SearchNode,
}

impl FrontierEntry {
    fn last_name(&self) -> &str {
        self.node.path.last().unwrap_or_default()
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.node.depth().cmp(&self.node.depth()))
            .then_with(|| other.last_name().cmp(self.last_name()))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Best-first frontier of scored nodes
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode, score: f64) {
        let sequence = self.pushed;
        self.pushed += 1;
        self.heap.push(FrontierEntry {
            score,
            sequence,
            node,
        });
    }

    /// Remove the best node
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
