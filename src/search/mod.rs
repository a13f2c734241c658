//! Search strategies over reagent combination paths
//!
//! This module provides two strategies that search from a single start reagent:
//! - Bfs: exhaustive breadth-first search, shortest path within the depth limit
//! - Heuristic: best-first search on a positional alignment score
//!
//! The `parallel` submodule runs one search per start reagent on a worker pool.

pub mod bfs;
pub mod cancel;
pub mod config;
pub mod heuristic;
pub mod node;
pub mod parallel;
pub mod ranking;
pub mod result;

pub use bfs::BfsSearch;
pub use cancel::CancelFlag;
pub use config::{Algorithm, SearchConfig};
pub use heuristic::HeuristicSearch;
pub use parallel::{
    CompletionPolicy, MultiStartResult, ParallelConfig, StartSelection, TaskOutcome, TaskReport,
    run_multi_start, run_single_start,
};
pub use ranking::{StartCandidate, rank_start_candidates};
pub use result::{SearchResult, SearchStatistics};

use crate::error::SearchError;
use crate::reagent::{Atom, ReagentTable};

/// Trait for strategies that search for a path from one start reagent to the target
pub trait SearchAlgorithm {
    /// Search for a path from `start` whose realized compound equals `target`
    ///
    /// # Arguments
    /// * `start` - Name of the start reagent; must be in `reagents`
    /// * `reagents` - The pruned reagent table, read-only
    /// * `target` - The exact atom sequence to reach
    /// * `config` - Depth and expansion limits
    /// * `cancel` - Checked once per dequeued node
    ///
    /// # Returns
    /// A SearchResult holding the path (if any) and statistics, or an error for
    /// an unknown start or an observed cancellation
    fn search(
        &mut self,
        start: &str,
        reagents: &ReagentTable,
        target: &[Atom],
        config: &SearchConfig,
        cancel: &CancelFlag,
    ) -> Result<SearchResult, SearchError>;

    /// Get statistics from the most recent search
    fn statistics(&self) -> SearchStatistics;

    /// Reset the search state for a new search
    fn reset(&mut self);
}

/// Build the strategy selected by `algorithm`
pub fn searcher_for(algorithm: Algorithm) -> Box<dyn SearchAlgorithm + Send> {
    match algorithm {
        Algorithm::Bfs => Box::new(BfsSearch::new()),
        Algorithm::Heuristic => Box::new(HeuristicSearch::new()),
    }
}
