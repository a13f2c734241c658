//! Multi-start coordinator that runs one search per start reagent on a worker pool.

use crate::error::{MutagenError, SearchError};
use crate::reagent::{Atom, ReagentTable};
use crate::search::cancel::CancelFlag;
use crate::search::config::SearchConfig;
use crate::search::parallel::channel::{
    CoordinatorChannels, Job, WorkerChannels, WorkerMessage, create_channels,
};
use crate::search::parallel::config::{CompletionPolicy, ParallelConfig, StartSelection};
use crate::search::parallel::task::{CancelRequest, TaskHandle, TaskOutcome, TaskReport};
use crate::search::ranking::rank_start_candidates;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::{SearchAlgorithm, searcher_for};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Builds a fresh strategy instance for a worker.
pub type SearcherFactory = Arc<dyn Fn() -> Box<dyn SearchAlgorithm + Send> + Send + Sync>;

/// Result from multi-start execution.
#[derive(Debug)]
pub struct MultiStartResult {
    /// Under FirstSuccess the first solved report; under CollectAll the
    /// shortest solution, earliest completion winning ties.
    pub solution: Option<TaskReport>,
    /// Accepted reports in completion order.
    pub reports: Vec<TaskReport>,
    /// Tasks that received a cancellation request.
    pub cancelled: usize,
    /// Statistics aggregated over accepted reports.
    pub total_statistics: SearchStatistics,
    pub elapsed: Duration,
}

/// Start reagents for the given selection, in submission order.
pub fn select_starts(
    reagents: &ReagentTable,
    target: &[Atom],
    selection: StartSelection,
) -> Vec<Arc<str>> {
    match selection {
        StartSelection::All => reagents.names().map(Arc::from).collect(),
        StartSelection::Ranked { limit } => {
            let ranked = rank_start_candidates(reagents, target);
            let limit = limit.unwrap_or(ranked.len());
            ranked
                .into_iter()
                .take(limit)
                .map(|c| Arc::from(c.name.as_str()))
                .collect()
        }
    }
}

/// Run one search per selected start reagent.
///
/// `on_report` sees each accepted report as it arrives, in completion order.
pub fn run_multi_start<F>(
    reagents: &ReagentTable,
    target: &[Atom],
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
    on_report: F,
) -> Result<MultiStartResult, MutagenError>
where
    F: FnMut(&TaskReport),
{
    let algorithm = search_config.algorithm;
    let factory: SearcherFactory = Arc::new(move || searcher_for(algorithm));
    run_multi_start_with(
        reagents,
        target,
        search_config,
        parallel_config,
        factory,
        on_report,
    )
}

/// [`run_multi_start`] with a caller-supplied strategy factory.
pub fn run_multi_start_with<F>(
    reagents: &ReagentTable,
    target: &[Atom],
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
    factory: SearcherFactory,
    mut on_report: F,
) -> Result<MultiStartResult, MutagenError>
where
    F: FnMut(&TaskReport),
{
    let start_time = Instant::now();
    let starts = select_starts(reagents, target, parallel_config.start_selection);
    if starts.is_empty() {
        return Err(MutagenError::NoViableStart);
    }

    let num_workers = parallel_config.workers_for(starts.len());
    tracing::info!(
        tasks = starts.len(),
        workers = num_workers,
        algorithm = %search_config.algorithm,
        policy = ?parallel_config.policy,
        "starting multi-start search"
    );

    let (coordinator, worker_channels) = create_channels(num_workers);
    let CoordinatorChannels { jobs, from_workers } = coordinator;

    let handles: Vec<TaskHandle> = starts
        .into_iter()
        .enumerate()
        .map(|(id, start)| TaskHandle::new(id, start))
        .collect();
    for handle in &handles {
        // Receivers live in `worker_channels`, so the queue is open
        let _ = jobs.send(Job {
            handle: handle.clone(),
        });
    }
    drop(jobs);

    // Read-only snapshot shared by every task
    let reagents = Arc::new(reagents.clone());
    let target: Arc<[Atom]> = Arc::from(target);
    let search_config = Arc::new(search_config.clone());

    let worker_handles: Vec<_> = worker_channels
        .into_iter()
        .enumerate()
        .map(|(worker_id, channels)| {
            let reagents = Arc::clone(&reagents);
            let target = Arc::clone(&target);
            let search_config = Arc::clone(&search_config);
            let factory = Arc::clone(&factory);

            std::thread::spawn(move || {
                run_worker(
                    worker_id,
                    &reagents,
                    &target,
                    &search_config,
                    factory.as_ref(),
                    channels,
                )
            })
        })
        .collect();

    let mut solution: Option<TaskReport> = None;
    let mut reports = Vec::with_capacity(handles.len());
    let mut cancelled = 0;
    let mut total_stats = SearchStatistics::new(search_config.algorithm);
    let mut finished = 0;
    let mut settled = false;

    while finished < handles.len() {
        let Ok(message) = from_workers.recv() else {
            // Every worker is gone
            break;
        };

        match message {
            WorkerMessage::Started { worker_id, task_id } => {
                tracing::debug!(worker_id, start = handles[task_id].start(), "task started");
            }
            WorkerMessage::Finished { worker_id, report } => {
                finished += 1;

                if settled {
                    tracing::debug!(
                        worker_id,
                        start = %report.start,
                        outcome = %report.outcome,
                        "result discarded after first success"
                    );
                    continue;
                }

                total_stats.absorb(&report.statistics);
                on_report(&report);

                if report.outcome.is_solved() {
                    match parallel_config.policy {
                        CompletionPolicy::FirstSuccess => {
                            settled = true;
                            for handle in &handles {
                                match handle.cancel() {
                                    CancelRequest::Prevented | CancelRequest::Requested => {
                                        tracing::info!(start = handle.start(), "cancelling");
                                        cancelled += 1;
                                    }
                                    CancelRequest::TooLate => {}
                                }
                            }
                            solution = Some(report.clone());
                        }
                        CompletionPolicy::CollectAll => {
                            if is_shorter(&report, solution.as_ref()) {
                                solution = Some(report.clone());
                            }
                        }
                    }
                }

                reports.push(report);
            }
        }
    }

    for handle in worker_handles {
        let _ = handle.join();
    }

    total_stats.elapsed_time = start_time.elapsed();
    Ok(MultiStartResult {
        solution,
        reports,
        cancelled,
        total_statistics: total_stats,
        elapsed: start_time.elapsed(),
    })
}

fn is_shorter(candidate: &TaskReport, current: Option<&TaskReport>) -> bool {
    let len = |r: &TaskReport| r.outcome.path().map_or(usize::MAX, |p| p.len());
    current.is_none_or(|current| len(candidate) < len(current))
}

/// Run a single search from a fixed start reagent, bypassing the pool.
pub fn run_single_start(
    reagents: &ReagentTable,
    target: &[Atom],
    start: &str,
    search_config: &SearchConfig,
) -> Result<TaskReport, MutagenError> {
    if !reagents.contains(start) {
        return Err(MutagenError::UnknownStart(start.to_string()));
    }

    let mut search = searcher_for(search_config.algorithm);
    let result = search.search(start, reagents, target, search_config, &CancelFlag::new());
    let (outcome, statistics) = into_outcome(result, search.as_ref());

    Ok(TaskReport {
        task_id: 0,
        start: start.to_string(),
        outcome,
        statistics,
    })
}

fn into_outcome(
    result: Result<SearchResult, SearchError>,
    search: &dyn SearchAlgorithm,
) -> (TaskOutcome, SearchStatistics) {
    match result {
        Ok(SearchResult {
            path: Some(path),
            statistics,
        }) => (TaskOutcome::Solved(path), statistics),
        Ok(SearchResult {
            path: None,
            statistics,
        }) => (TaskOutcome::NoSolution, statistics),
        Err(SearchError::Cancelled) => (TaskOutcome::Cancelled, search.statistics()),
        Err(err) => (TaskOutcome::Failed(err.to_string()), search.statistics()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("search panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("search panicked: {}", s)
    } else {
        "search panicked".to_string()
    }
}

/// Worker loop: pull jobs until the queue closes.
fn run_worker(
    worker_id: usize,
    reagents: &ReagentTable,
    target: &[Atom],
    config: &SearchConfig,
    factory: &(dyn Fn() -> Box<dyn SearchAlgorithm + Send> + Send + Sync),
    channels: WorkerChannels,
) {
    let mut search = factory();

    for job in channels.jobs.iter() {
        let handle = job.handle;

        let (outcome, statistics) = if !handle.try_begin() {
            (TaskOutcome::Cancelled, SearchStatistics::new(config.algorithm))
        } else {
            let _ = channels.to_coordinator.send(WorkerMessage::Started {
                worker_id,
                task_id: handle.id(),
            });

            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                search.search(
                    handle.start(),
                    reagents,
                    target,
                    config,
                    handle.cancel_flag(),
                )
            }));

            let done = match result {
                Ok(result) => into_outcome(result, search.as_ref()),
                Err(payload) => {
                    // State of a panicked strategy is unknown; start over
                    search = factory();
                    (
                        TaskOutcome::Failed(panic_message(payload.as_ref())),
                        SearchStatistics::new(config.algorithm),
                    )
                }
            };
            handle.finish();
            done
        };

        match &outcome {
            TaskOutcome::Failed(cause) => {
                tracing::error!(worker_id, start = handle.start(), %cause, "task failed");
            }
            other => {
                tracing::debug!(worker_id, start = handle.start(), outcome = %other, "task done");
            }
        }

        let report = TaskReport {
            task_id: handle.id(),
            start: handle.start().to_string(),
            outcome,
            statistics,
        };
        if channels
            .to_coordinator
            .send(WorkerMessage::Finished { worker_id, report })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reagent::{Reagent, atoms};
    use crate::search::config::Algorithm;
    use crate::search::parallel::task::TaskOutcome;

    fn sample() -> (ReagentTable, Vec<Atom>) {
        let table = [
            Reagent::new("A", atoms("p")),
            Reagent::new("B", atoms("-p q")),
        ]
        .into_iter()
        .collect();
        (table, atoms("q"))
    }

    #[test]
    fn test_collect_all_reports_every_start() {
        let (table, target) = sample();
        let config = SearchConfig::default().with_depth_limit(2);
        let parallel = ParallelConfig::default().with_workers(2);

        let mut seen = Vec::new();
        let result = run_multi_start(&table, &target, &config, &parallel, |r| {
            seen.push(r.start.clone())
        })
        .unwrap();

        assert_eq!(result.reports.len(), 2);
        assert_eq!(seen.len(), 2);
        assert_eq!(result.cancelled, 0);

        let by_start = |name: &str| {
            result
                .reports
                .iter()
                .find(|r| r.start == name)
                .unwrap()
                .outcome
                .clone()
        };
        assert_eq!(
            by_start("A").path().unwrap().to_names(),
            vec!["A", "B"]
        );
        // The root has no previous reagent, so B may follow itself
        assert_eq!(
            by_start("B").path().unwrap().to_names(),
            vec!["B", "B"]
        );
        assert_eq!(result.solution.unwrap().outcome.path().unwrap().len(), 2);
    }

    #[test]
    fn test_first_success_is_final() {
        let (table, target) = sample();
        let config = SearchConfig::default().with_depth_limit(2);
        let parallel = ParallelConfig::default()
            .with_workers(1)
            .with_policy(CompletionPolicy::FirstSuccess);

        let result = run_multi_start(&table, &target, &config, &parallel, |_| {}).unwrap();
        let solution = result.solution.unwrap();
        assert_eq!(solution.start, "A");
        // Whatever B does after A's success is discarded
        assert_eq!(result.reports.len(), 1);
    }

    /// Solves from `A`; any other start spins until cancelled.
    struct WaitsForCancel;

    impl SearchAlgorithm for WaitsForCancel {
        fn search(
            &mut self,
            start: &str,
            reagents: &ReagentTable,
            target: &[Atom],
            config: &SearchConfig,
            cancel: &CancelFlag,
        ) -> Result<SearchResult, SearchError> {
            if start == "A" {
                return crate::search::BfsSearch::new()
                    .search(start, reagents, target, config, cancel);
            }
            let deadline = Instant::now() + Duration::from_secs(10);
            while Instant::now() < deadline {
                if cancel.is_cancelled() {
                    return Err(SearchError::Cancelled);
                }
                std::thread::sleep(Duration::from_millis(1));
            }
            Ok(SearchResult::no_solution(SearchStatistics::default()))
        }

        fn statistics(&self) -> SearchStatistics {
            SearchStatistics::new(Algorithm::Bfs)
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_first_success_cancels_pending_and_running() {
        let table: ReagentTable = [
            Reagent::new("A", atoms("p")),
            Reagent::new("B", atoms("-p q")),
            Reagent::new("C", atoms("r -r")),
        ]
        .into_iter()
        .collect();
        let config = SearchConfig::default().with_depth_limit(2);
        let parallel = ParallelConfig::default()
            .with_workers(1)
            .with_policy(CompletionPolicy::FirstSuccess);
        let factory: SearcherFactory = Arc::new(|| Box::new(WaitsForCancel));

        let start_time = Instant::now();
        let result =
            run_multi_start_with(&table, &atoms("q"), &config, &parallel, factory, |_| {})
                .unwrap();

        assert_eq!(result.solution.unwrap().start, "A");
        // B is running or queued, C is queued; both get a request
        assert_eq!(result.cancelled, 2);
        assert_eq!(result.reports.len(), 1);
        assert!(start_time.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_ranked_selection() {
        let table: ReagentTable = [
            Reagent::new("Far", atoms("z")),
            Reagent::new("Near", atoms("a b")),
            Reagent::new("Half", atoms("a")),
        ]
        .into_iter()
        .collect();
        let target = atoms("a b");

        let all = select_starts(&table, &target, StartSelection::All);
        assert_eq!(all.len(), 3);

        let ranked = select_starts(&table, &target, StartSelection::Ranked { limit: None });
        let names: Vec<&str> = ranked.iter().map(|s| s.as_ref()).collect();
        assert_eq!(names, vec!["Near", "Half"]);

        let top = select_starts(&table, &target, StartSelection::Ranked { limit: Some(1) });
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_no_viable_start() {
        let table: ReagentTable = [Reagent::new("Far", atoms("z"))].into_iter().collect();
        let parallel =
            ParallelConfig::default().with_start_selection(StartSelection::Ranked { limit: None });
        let err = run_multi_start(&table, &atoms("a"), &SearchConfig::default(), &parallel, |_| {})
            .unwrap_err();
        assert!(matches!(err, MutagenError::NoViableStart));
    }

    struct PanicsOn(&'static str);

    impl SearchAlgorithm for PanicsOn {
        fn search(
            &mut self,
            start: &str,
            reagents: &ReagentTable,
            target: &[Atom],
            config: &SearchConfig,
            cancel: &CancelFlag,
        ) -> Result<SearchResult, SearchError> {
            if start == self.0 {
                panic!("invalid state for {}", start);
            }
            crate::search::BfsSearch::new().search(start, reagents, target, config, cancel)
        }

        fn statistics(&self) -> SearchStatistics {
            SearchStatistics::new(Algorithm::Bfs)
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_task_failure_does_not_abort_siblings() {
        let (table, target) = sample();
        let config = SearchConfig::default().with_depth_limit(2);
        let parallel = ParallelConfig::default().with_workers(1);
        let factory: SearcherFactory = Arc::new(|| Box::new(PanicsOn("A")));

        let result =
            run_multi_start_with(&table, &target, &config, &parallel, factory, |_| {}).unwrap();

        assert_eq!(result.reports.len(), 2);
        let failed = result.reports.iter().find(|r| r.start == "A").unwrap();
        match &failed.outcome {
            TaskOutcome::Failed(cause) => assert!(cause.contains("invalid state for A")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        let sibling = result.reports.iter().find(|r| r.start == "B").unwrap();
        assert!(sibling.outcome.is_solved());
        assert_eq!(result.solution.unwrap().start, "B");
    }

    #[test]
    fn test_single_start() {
        let (table, target) = sample();
        let config = SearchConfig::default().with_algorithm(Algorithm::Heuristic);
        let report = run_single_start(&table, &target, "A", &config).unwrap();
        assert_eq!(report.outcome.path().unwrap().to_names(), vec!["A", "B"]);

        let err = run_single_start(&table, &target, "Nope", &config).unwrap_err();
        assert!(matches!(err, MutagenError::UnknownStart(name) if name == "Nope"));
    }
}
