use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mutagen::reagent::{DEFAULT_EXITUS_NAME, format_atoms, load_puzzle, validate_target};
use mutagen::report::SolutionTrace;
use mutagen::search::config::{
    Algorithm, DEFAULT_DEPTH_LIMIT, DEFAULT_MAX_EXPANSIONS, SearchConfig,
};
use mutagen::search::parallel::{
    CompletionPolicy, ParallelConfig, StartSelection, TaskOutcome, TaskReport, run_multi_start,
    run_single_start,
};
use mutagen::search::result::SearchStatistics;
use mutagen::{Atom, ReagentTable, prune_reagents};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "mutagen")]
#[command(about = "mutagen - finds a reagent combination path reaching the Exitus")]
#[command(version)]
struct Args {
    /// Path to the reagents file
    #[arg(long)]
    reagents: PathBuf,

    /// Maximum path length, in reagents
    #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    depth: usize,

    /// Search strategy
    #[arg(long, value_enum, default_value = "bfs")]
    algorithm: CliAlgorithm,

    /// Maximum node expansions for the heuristic search
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,

    /// Stop at the first solution and cancel the remaining searches
    #[arg(long)]
    first: bool,

    /// Search only from this starting reagent
    #[arg(long)]
    start: Option<String>,

    /// Order start reagents by target-prefix overlap and skip non-viable ones
    #[arg(long)]
    ranked: bool,

    /// Only search from the N best-ranked start reagents (implies --ranked)
    #[arg(long)]
    top: Option<usize>,

    /// Number of worker threads
    #[arg(long, short = 'j')]
    cores: Option<usize>,

    /// Name of the target entry in the reagents file
    #[arg(long, default_value = DEFAULT_EXITUS_NAME)]
    exitus_name: String,

    /// Print a step-by-step replay of each solution
    #[arg(long)]
    verbose_solution: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// CLI algorithm selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    /// Exhaustive breadth-first search
    Bfs,
    /// Best-first search on an alignment score
    Heuristic,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(cli: CliAlgorithm) -> Self {
        match cli {
            CliAlgorithm::Bfs => Algorithm::Bfs,
            CliAlgorithm::Heuristic => Algorithm::Heuristic,
        }
    }
}

fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "mutagen=info",
            1 => "mutagen=debug",
            _ => "mutagen=trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Route panic messages through tracing instead of the default stderr hook.
///
/// Search panics are caught by the worker pool and reported as failed tasks,
/// so the default hook's output would read like a crash.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown cause");
        let location = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_default();
        error!(%location, "panic: {}", message);
    }));
}

// --- Reporting ---

fn print_report(
    report: &TaskReport,
    reagents: &ReagentTable,
    target: &[Atom],
    verbose_solution: bool,
) {
    match &report.outcome {
        TaskOutcome::Solved(path) => {
            info!(start = %report.start, len = path.len(), "solution found");
            println!("Solution found for starter node {}: {}", report.start, path);
            if verbose_solution {
                if let Some(trace) = SolutionTrace::build(reagents, target, path) {
                    println!("{}", trace);
                }
            }
        }
        TaskOutcome::NoSolution => {
            warn!(start = %report.start, "no solution within limits");
            println!("No solution found for starter node {}", report.start);
        }
        TaskOutcome::Cancelled => {
            info!(start = %report.start, "cancelled");
        }
        TaskOutcome::Failed(cause) => {
            error!(start = %report.start, %cause, "task failed");
            println!("{} generated an error: {}", report.start, cause);
        }
    }
}

fn print_search_statistics(stats: &SearchStatistics) {
    for line in stats.format_summary().lines() {
        debug!("{}", line);
    }
}

// --- Pipeline ---

fn run(args: Args) -> Result<()> {
    info!("Parsing reagents...");
    let puzzle = load_puzzle(&args.reagents, &args.exitus_name)
        .with_context(|| format!("loading reagents from {}", args.reagents.display()))?;
    validate_target(&puzzle.reagents, &puzzle.target)?;
    info!(
        reagents = puzzle.reagents.len(),
        target = %format_atoms(&puzzle.target),
        "parsed"
    );

    info!("Filtering useless reagents...");
    let pruned = prune_reagents(puzzle.reagents, &puzzle.target);
    info!(
        kept = pruned.table.len(),
        removed = pruned.removed.len(),
        passes = pruned.passes,
        "pruning done"
    );
    if !pruned.removed.is_empty() {
        debug!(removed = ?pruned.removed, "pruned reagents");
    }
    for reagent in pruned.table.iter() {
        debug!("\t{}", reagent);
    }
    validate_target(&pruned.table, &puzzle.target).context("after pruning")?;

    let reagents = pruned.table;
    let target = puzzle.target;

    let search_config = SearchConfig::default()
        .with_algorithm(args.algorithm.into())
        .with_depth_limit(args.depth)
        .with_max_expansions(args.max_expansions);

    info!("Searching...");
    if let Some(start) = args.start.as_deref() {
        let report = run_single_start(&reagents, &target, start, &search_config)?;
        print_report(&report, &reagents, &target, args.verbose_solution);
        print_search_statistics(&report.statistics);
        return Ok(());
    }

    let start_selection = if args.ranked || args.top.is_some() {
        StartSelection::Ranked { limit: args.top }
    } else {
        StartSelection::All
    };
    let policy = if args.first {
        CompletionPolicy::FirstSuccess
    } else {
        CompletionPolicy::CollectAll
    };
    let parallel_config = ParallelConfig::default()
        .with_workers_option(args.cores)
        .with_policy(policy)
        .with_start_selection(start_selection);

    let result = run_multi_start(&reagents, &target, &search_config, &parallel_config, |report| {
        print_report(report, &reagents, &target, args.verbose_solution)
    })?;

    if result.solution.is_some() && policy == CompletionPolicy::FirstSuccess {
        info!(cancelled = result.cancelled, "Exiting...");
    }
    if result.solution.is_none() {
        warn!("no start reagent reached the target");
    }
    print_search_statistics(&result.total_statistics);

    Ok(())
}

// --- Main Function ---
fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);
    install_panic_hook();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
