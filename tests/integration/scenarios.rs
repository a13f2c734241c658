use mutagen::reagent::{DEFAULT_EXITUS_NAME, load_puzzle, parse_puzzle, validate_target};
use mutagen::search::config::{Algorithm, SearchConfig};
use mutagen::search::parallel::{
    CompletionPolicy, ParallelConfig, StartSelection, TaskOutcome, run_multi_start,
    run_single_start,
};
use mutagen::{MutagenError, prune_reagents};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("reagents.txt")
}

const MINIMAL: &str = "\
Exitus-1 q
A p
B -p q
";

#[test]
fn test_minimal_end_to_end() {
    let puzzle = parse_puzzle(MINIMAL, DEFAULT_EXITUS_NAME).unwrap();
    validate_target(&puzzle.reagents, &puzzle.target).unwrap();

    let pruned = prune_reagents(puzzle.reagents, &puzzle.target);
    assert!(pruned.removed.is_empty());
    assert_eq!(pruned.table.len(), 2);

    let config = SearchConfig::default().with_depth_limit(2);
    let from_a = run_single_start(&pruned.table, &puzzle.target, "A", &config).unwrap();
    assert_eq!(
        from_a.outcome.path().unwrap().to_names(),
        vec!["A", "B"]
    );

    let shallow = SearchConfig::default().with_depth_limit(1);
    let from_b = run_single_start(&pruned.table, &puzzle.target, "B", &shallow).unwrap();
    assert_eq!(from_b.outcome, TaskOutcome::NoSolution);
}

#[test]
fn test_sample_file_pruning_and_bfs() {
    let puzzle = load_puzzle(&sample_path(), DEFAULT_EXITUS_NAME).unwrap();
    validate_target(&puzzle.reagents, &puzzle.target).unwrap();

    let pruned = prune_reagents(puzzle.reagents, &puzzle.target);
    assert_eq!(pruned.removed, vec!["Sulfur", "Nebula"]);
    assert_eq!(pruned.passes, 3);

    let config = SearchConfig::default();
    let report = run_single_start(&pruned.table, &puzzle.target, "Ferrum", &config).unwrap();
    let path = report.outcome.path().unwrap();
    assert_eq!(path.to_names(), vec!["Ferrum", "Aqua", "Glacies"]);
    assert_eq!(path.realize(&pruned.table), Some(puzzle.target.clone()));
}

#[test]
fn test_every_reported_solution_is_valid() {
    let puzzle = load_puzzle(&sample_path(), DEFAULT_EXITUS_NAME).unwrap();
    let pruned = prune_reagents(puzzle.reagents, &puzzle.target);

    for algorithm in [Algorithm::Bfs, Algorithm::Heuristic] {
        let config = SearchConfig::default()
            .with_algorithm(algorithm)
            .with_depth_limit(4);
        let parallel = ParallelConfig::default().with_workers(3);

        let result =
            run_multi_start(&pruned.table, &puzzle.target, &config, &parallel, |_| {}).unwrap();
        assert_eq!(result.reports.len(), pruned.table.len());

        for report in &result.reports {
            if let Some(path) = report.outcome.path() {
                assert!(path.len() <= 4, "{} exceeds depth limit", path);
                assert_eq!(path.realize(&pruned.table), Some(puzzle.target.clone()));
                assert_eq!(path.steps()[0].as_ref(), report.start);
            } else {
                assert!(matches!(report.outcome, TaskOutcome::NoSolution));
            }
        }
        if algorithm == Algorithm::Bfs {
            assert!(result.solution.is_some());
        }
    }
}

#[test]
fn test_first_success_with_ranking() {
    let puzzle = load_puzzle(&sample_path(), DEFAULT_EXITUS_NAME).unwrap();
    let pruned = prune_reagents(puzzle.reagents, &puzzle.target);

    let parallel = ParallelConfig::default()
        .with_workers(2)
        .with_policy(CompletionPolicy::FirstSuccess)
        .with_start_selection(StartSelection::Ranked { limit: None });

    let mut solved_seen = 0;
    let result = run_multi_start(
        &pruned.table,
        &puzzle.target,
        &SearchConfig::default(),
        &parallel,
        |report| {
            if report.outcome.is_solved() {
                solved_seen += 1;
            }
        },
    )
    .unwrap();

    assert_eq!(solved_seen, 1);
    let solution = result.solution.unwrap();
    let path = solution.outcome.path().unwrap();
    assert_eq!(path.realize(&pruned.table), Some(puzzle.target.clone()));
}

#[test]
fn test_unreachable_target_atom() {
    let puzzle = parse_puzzle("Exitus-1 q z\nA q\n", DEFAULT_EXITUS_NAME).unwrap();
    match validate_target(&puzzle.reagents, &puzzle.target) {
        Err(MutagenError::UnreachableTargetAtom { atom }) => assert_eq!(atom, "z"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_unknown_start_is_fatal() {
    let puzzle = parse_puzzle(MINIMAL, DEFAULT_EXITUS_NAME).unwrap();
    let err = run_single_start(
        &puzzle.reagents,
        &puzzle.target,
        "Missing",
        &SearchConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MutagenError::UnknownStart(_)));
}

#[test]
fn test_heuristic_respects_expansion_cap() {
    // No reagent carries `z`
    let text = "Exitus-1 z\nA q -r\nB p -q r\nC -p r\n";
    let puzzle = parse_puzzle(text, DEFAULT_EXITUS_NAME).unwrap();
    let config = SearchConfig::default()
        .with_algorithm(Algorithm::Heuristic)
        .with_depth_limit(100)
        .with_max_expansions(50);
    let report = run_single_start(&puzzle.reagents, &puzzle.target, "B", &config).unwrap();
    assert_eq!(report.outcome, TaskOutcome::NoSolution);
    assert!(report.statistics.nodes_expanded <= 50);
}
