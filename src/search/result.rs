//! Search result types and statistics

use crate::reagent::ReagentPath;
use crate::search::config::Algorithm;
use std::time::Duration;

/// Result of one search from one start reagent
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The path reaching the target, if one was found within limits
    pub path: Option<ReagentPath>,
    /// Statistics from the search
    pub statistics: SearchStatistics,
}

impl SearchResult {
    pub fn solved(path: ReagentPath, statistics: SearchStatistics) -> Self {
        Self {
            path: Some(path),
            statistics,
        }
    }

    pub fn no_solution(statistics: SearchStatistics) -> Self {
        Self {
            path: None,
            statistics,
        }
    }

    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Statistics from a search operation
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Algorithm used for the search
    pub algorithm: Algorithm,
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Nodes taken off the frontier and expanded
    pub nodes_expanded: u64,
    /// Child nodes created
    pub nodes_generated: u64,
    /// Longest path length seen on the frontier
    pub max_depth_reached: usize,
}

impl SearchStatistics {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Nodes generated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.nodes_generated as f64 / secs
        }
    }

    /// Add another run's counters into this one
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.nodes_expanded += other.nodes_expanded;
        self.nodes_generated += other.nodes_generated;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Algorithm: {}\n", self.algorithm));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Nodes expanded: {}\n", self.nodes_expanded));
        s.push_str(&format!("Nodes generated: {}\n", self.nodes_generated));
        s.push_str(&format!("Max depth reached: {}\n", self.max_depth_reached));
        s.push_str(&format!("Throughput: {:.0} nodes/sec\n", self.throughput()));
        s
    }
}
