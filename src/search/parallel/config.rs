//! Configuration for multi-start parallel search.

/// Upper bound on the default pool size.
pub const MAX_DEFAULT_WORKERS: usize = 8;

/// When the coordinator stops waiting on tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Stop at the first solved task and cancel the rest.
    FirstSuccess,
    /// Wait for every task and report each outcome.
    #[default]
    CollectAll,
}

/// Which reagents become start tasks, and in what submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartSelection {
    /// Every reagent in the pruned table, in table order.
    #[default]
    All,
    /// Viable reagents by descending target-prefix overlap, optionally only the top `limit`.
    Ranked { limit: Option<usize> },
}

/// Configuration for multi-start parallel search.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads in the pool.
    pub num_workers: usize,
    /// Completion policy.
    pub policy: CompletionPolicy,
    /// Start task selection.
    pub start_selection: StartSelection,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get().clamp(1, MAX_DEFAULT_WORKERS),
            policy: CompletionPolicy::default(),
            start_selection: StartSelection::default(),
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the number of workers from an Option, keeping the default on `None`.
    pub fn with_workers_option(self, num_workers: Option<usize>) -> Self {
        match num_workers {
            Some(n) => self.with_workers(n),
            None => self,
        }
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_start_selection(mut self, selection: StartSelection) -> Self {
        self.start_selection = selection;
        self
    }

    /// Pool size for `tasks` tasks; never more workers than tasks.
    pub fn workers_for(&self, tasks: usize) -> usize {
        self.num_workers.min(tasks).max(1)
    }
}
