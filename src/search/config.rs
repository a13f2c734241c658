//! Configuration types for search strategies

/// Default maximum path length, in reagents
pub const DEFAULT_DEPTH_LIMIT: usize = 6;

/// Default cap on node expansions for the heuristic search
pub const DEFAULT_MAX_EXPANSIONS: usize = 2500;

/// Search strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Exhaustive breadth-first search
    #[default]
    Bfs,
    /// Best-first search guided by a positional alignment score
    Heuristic,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "bfs"),
            Algorithm::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" | "breadth-first" | "exhaustive" => Ok(Algorithm::Bfs),
            "heuristic" | "best-first" | "astar" => Ok(Algorithm::Heuristic),
            _ => Err(format!(
                "Unknown algorithm: '{}'. Valid options: bfs, heuristic",
                s
            )),
        }
    }
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search strategy to use
    pub algorithm: Algorithm,
    /// Longest path, in reagents, a search may return
    pub depth_limit: usize,
    /// Maximum node expansions (heuristic search only)
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl SearchConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}
