//! Multi-start parallel search.
//!
//! One independent search task runs per candidate start reagent, on a
//! fixed-size pool of worker threads.
//!
//! # Architecture
//!
//! The system consists of:
//! - A **coordinator** that submits one job per start, collects reports in
//!   completion order and applies the completion policy
//! - **Workers** that pull jobs from a shared queue and run the configured strategy
//! - A **channel system** carrying jobs out and reports back
//! - **Task handles** for polling and best-effort cancellation
//!
//! Tasks share only an immutable snapshot of the pruned table and the target.
//!
//! # Example
//!
//! ```ignore
//! use mutagen::search::parallel::{CompletionPolicy, ParallelConfig, run_multi_start};
//!
//! let config = ParallelConfig::default()
//!     .with_workers(4)
//!     .with_policy(CompletionPolicy::FirstSuccess);
//!
//! let result = run_multi_start(&table, &target, &search_config, &config, |report| {
//!     println!("{}: {}", report.start, report.outcome);
//! })?;
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod task;

pub use config::{CompletionPolicy, ParallelConfig, StartSelection};
pub use coordinator::{MultiStartResult, run_multi_start, run_single_start, select_starts};
pub use task::{TaskHandle, TaskOutcome, TaskReport, TaskStatus};
