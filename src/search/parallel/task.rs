//! Task handles: poll, cancel and outcome types for one start reagent.

use crate::reagent::ReagentPath;
use crate::search::cancel::CancelFlag;
use crate::search::result::SearchStatistics;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const FINISHED: u8 = 2;
const CANCELLED: u8 = 3;

/// Lifecycle of a task: `Pending -> Running -> Finished`, or `Pending -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Finished,
    Cancelled,
}

/// What a cancellation request achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelRequest {
    /// The task had not started and never will.
    Prevented,
    /// The task is running; its search will stop at its next checkpoint.
    Requested,
    /// The task already completed or was already cancelled.
    TooLate,
}

/// Shared handle to one scheduled search task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: usize,
    start: Arc<str>,
    state: Arc<AtomicU8>,
    cancel: CancelFlag,
}

impl TaskHandle {
    pub fn new(id: usize, start: Arc<str>) -> Self {
        Self {
            id,
            start,
            state: Arc::new(AtomicU8::new(PENDING)),
            cancel: CancelFlag::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Poll the current status.
    pub fn status(&self) -> TaskStatus {
        match self.state.load(Ordering::SeqCst) {
            PENDING => TaskStatus::Pending,
            RUNNING => TaskStatus::Running,
            FINISHED => TaskStatus::Finished,
            _ => TaskStatus::Cancelled,
        }
    }

    /// Claim the task for execution. Returns false if it was cancelled first.
    pub fn try_begin(&self) -> bool {
        self.state
            .compare_exchange(PENDING, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Mark a running task as completed.
    pub fn finish(&self) {
        let _ = self
            .state
            .compare_exchange(RUNNING, FINISHED, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Request cancellation; best effort once the task is running.
    pub fn cancel(&self) -> CancelRequest {
        match self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => CancelRequest::Prevented,
            Err(RUNNING) => {
                self.cancel.cancel();
                CancelRequest::Requested
            }
            Err(_) => CancelRequest::TooLate,
        }
    }
}

/// Outcome of one start task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// A path reaching the target.
    Solved(ReagentPath),
    /// The search ran to its limits without reaching the target.
    NoSolution,
    /// The task was cancelled before or during its search.
    Cancelled,
    /// The task failed; siblings are unaffected.
    Failed(String),
}

impl TaskOutcome {
    pub fn path(&self) -> Option<&ReagentPath> {
        match self {
            TaskOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, TaskOutcome::Solved(_))
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Solved(path) => write!(f, "solution {}", path),
            TaskOutcome::NoSolution => write!(f, "no solution within limits"),
            TaskOutcome::Cancelled => write!(f, "cancelled"),
            TaskOutcome::Failed(cause) => write!(f, "failed: {}", cause),
        }
    }
}

/// Report for one completed start task.
#[derive(Debug, Clone)]
pub struct TaskReport {
    /// Submission index.
    pub task_id: usize,
    /// Start reagent name.
    pub start: String,
    pub outcome: TaskOutcome,
    pub statistics: SearchStatistics,
}
