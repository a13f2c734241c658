//! Exhaustive breadth-first search
//!
//! FIFO traversal from a single start reagent. The first node dequeued whose
//! compound equals the target is returned, so the result is a shortest path
//! by reagent count among paths within the depth limit. The search stops with
//! no solution when the queue empties or a dequeued path exceeds the limit.
//!
//! The root has no previous reagent, so the start may be applied to itself
//! as the first step (`B -> B` is a valid path).

use crate::error::SearchError;
use crate::reagent::{Atom, ReagentTable};
use crate::search::cancel::CancelFlag;
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::node::SearchNode;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::SearchAlgorithm;
use std::collections::VecDeque;
use std::time::Instant;

/// Breadth-first search over combination paths
pub struct BfsSearch {
    statistics: SearchStatistics,
}

impl BfsSearch {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::Bfs),
        }
    }
}

impl Default for BfsSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAlgorithm for BfsSearch {
    fn search(
        &mut self,
        start: &str,
        reagents: &ReagentTable,
        target: &[Atom],
        config: &SearchConfig,
        cancel: &CancelFlag,
    ) -> Result<SearchResult, SearchError> {
        self.reset();
        let start_time = Instant::now();

        let start = reagents
            .get(start)
            .ok_or_else(|| SearchError::UnknownStart(start.to_string()))?;

        let mut queue = VecDeque::new();
        queue.push_back(SearchNode::root(start));

        let outcome = loop {
            let Some(node) = queue.pop_front() else {
                break None;
            };

            if cancel.is_cancelled() {
                self.statistics.elapsed_time = start_time.elapsed();
                return Err(SearchError::Cancelled);
            }

            if node.depth() > config.depth_limit {
                break None;
            }
            self.statistics.max_depth_reached = self.statistics.max_depth_reached.max(node.depth());

            if node.compound == target {
                break Some(node.path);
            }

            // Children of a node at the limit could only trip the cutoff
            if node.depth() == config.depth_limit {
                continue;
            }

            self.statistics.nodes_expanded += 1;
            for reagent in reagents.iter().filter(|r| node.can_apply(r)) {
                queue.push_back(node.child(reagent));
                self.statistics.nodes_generated += 1;
            }
        };

        self.statistics.elapsed_time = start_time.elapsed();
        tracing::trace!(
            start = start.name(),
            expanded = self.statistics.nodes_expanded,
            generated = self.statistics.nodes_generated,
            found = outcome.is_some(),
            "bfs finished"
        );

        Ok(match outcome {
            Some(path) => SearchResult::solved(path, self.statistics.clone()),
            None => SearchResult::no_solution(self.statistics.clone()),
        })
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::Bfs);
    }
}
