//! Heuristic best-first search
//!
//! Pops the highest-scoring node and expands it against every reagent except
//! the one applied last. A child whose compound equals the target is returned
//! immediately, regardless of its score. The search ends with no solution when
//! the popped node is at the depth limit, the expansion cap is hit, or the
//! frontier runs dry. Termination is guaranteed; optimality is not.

pub mod frontier;
pub mod score;

pub use frontier::Frontier;
pub use score::alignment_score;

use crate::error::SearchError;
use crate::reagent::{Atom, ReagentTable};
use crate::search::SearchAlgorithm;
use crate::search::cancel::CancelFlag;
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::node::SearchNode;
use crate::search::result::{SearchResult, SearchStatistics};
use std::time::Instant;

/// Best-first search guided by [`alignment_score`]
pub struct HeuristicSearch {
    statistics: SearchStatistics,
}

impl HeuristicSearch {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::Heuristic),
        }
    }
}

impl Default for HeuristicSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAlgorithm for HeuristicSearch {
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

        let root = SearchNode::root(start);
        if root.compound == target {
            self.statistics.max_depth_reached = 1;
            self.statistics.elapsed_time = start_time.elapsed();
            return Ok(SearchResult::solved(root.path, self.statistics.clone()));
        }

        let mut frontier = Frontier::new();
        let root_score = alignment_score(&root.compound, target, root.depth());
        frontier.push(root, root_score);

        let outcome = loop {
            let Some(node) = frontier.pop() else {
                break None;
            };

            if cancel.is_cancelled() {
                self.statistics.elapsed_time = start_time.elapsed();
                return Err(SearchError::Cancelled);
            }

            if node.depth() >= config.depth_limit
                || self.statistics.nodes_expanded >= config.max_expansions as u64
            {
                break None;
            }

            self.statistics.nodes_expanded += 1;
            self.statistics.max_depth_reached = self.statistics.max_depth_reached.max(node.depth());

            let mut solved = None;
            for reagent in reagents.iter().filter(|r| node.can_apply(r)) {
                let child = node.child(reagent);
                self.statistics.nodes_generated += 1;

                if child.compound == target {
                    solved = Some(child.path);
                    break;
                }

                let score = alignment_score(&child.compound, target, child.depth());
                frontier.push(child, score);
            }

            if let Some(path) = solved {
                self.statistics.max_depth_reached = self.statistics.max_depth_reached.max(path.len());
                break Some(path);
            }
        };

        self.statistics.elapsed_time = start_time.elapsed();
        tracing::trace!(
            start = start.name(),
            expanded = self.statistics.nodes_expanded,
            frontier = frontier.len(),
            found = outcome.is_some(),
            "heuristic search finished"
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
        self.statistics = SearchStatistics::new(Algorithm::Heuristic);
    }
}
