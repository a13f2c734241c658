//! Job queue and result channel between the coordinator and pool workers.

use crate::search::parallel::task::{TaskHandle, TaskReport};
use crossbeam_channel::{Receiver, Sender, unbounded};

/// A scheduled start task.
#[derive(Debug, Clone)]
pub struct Job {
    pub handle: TaskHandle,
}

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker claimed a task and is searching.
    Started { worker_id: usize, task_id: usize },
    /// Worker is done with a task, whatever the outcome.
    Finished { worker_id: usize, report: TaskReport },
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Shared job queue; closes once the coordinator has submitted everything.
    pub jobs: Receiver<Job>,
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Submit jobs to the pool.
    pub jobs: Sender<Job>,
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
}

/// Create channels for a pool with the given number of workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    // Both directions unbounded: submission never blocks and workers never wait on the coordinator
    let (job_tx, job_rx) = unbounded();
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            jobs: job_rx.clone(),
            to_coordinator: worker_tx.clone(),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        jobs: job_tx,
        from_workers: coordinator_rx,
    };

    (coordinator, worker_channels)
}
