use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const PUZZLE: &str = "\
# two-step puzzle
Exitus-1 q
A p
B -p q
";

fn puzzle_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn mutagen(file: &NamedTempFile, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mutagen"))
        .arg("--reagents")
        .arg(file.path())
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_collect_all() {
    let file = puzzle_file(PUZZLE);
    let output = mutagen(&file, &["--depth", "2", "-j", "2"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Solution found for starter node A: A -> B"), "{}", out);
    assert!(out.contains("Solution found for starter node B: B -> B"), "{}", out);
}

#[test]
fn test_cli_first_success() {
    let file = puzzle_file(PUZZLE);
    let output = mutagen(&file, &["--first", "--ranked"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert_eq!(out.matches("Solution found").count(), 1, "{}", out);
}

#[test]
fn test_cli_single_start_no_solution() {
    let file = puzzle_file(PUZZLE);
    let output = mutagen(&file, &["--start", "A", "--depth", "1"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No solution found for starter node A"));
}

#[test]
fn test_cli_unknown_start() {
    let file = puzzle_file(PUZZLE);
    let output = mutagen(&file, &["--start", "Nope"]);

    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("Nope"), "{}", err);
}

#[test]
fn test_cli_missing_target() {
    let file = puzzle_file("A p\nB -p q\n");
    let output = mutagen(&file, &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Exitus-1"));
}

#[test]
fn test_cli_verbose_solution() {
    let file = puzzle_file(PUZZLE);
    let output = mutagen(
        &file,
        &["--start", "A", "--algorithm", "heuristic", "--verbose-solution"],
    );

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Path: A -> B"), "{}", out);
    assert!(out.contains("<-p> +q   [B]"), "{}", out);
    assert!(out.contains("Target reached."), "{}", out);
}

#[test]
fn test_cli_unreachable_target_atom() {
    let file = puzzle_file("Exitus-1 q w\nA q\n");
    let output = mutagen(&file, &[]);

    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("'w'"), "{}", err);
    assert!(!err.contains("after pruning"), "{}", err);
}

#[test]
fn test_cli_target_lost_after_pruning() {
    // `z` strands A, the only reagent carrying `q`; B saves itself with `-p`
    let file = puzzle_file("Exitus-1 q\nA q z\nB p -p\n");
    let output = mutagen(&file, &[]);

    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("after pruning"), "{}", err);
    assert!(err.contains("'q'"), "{}", err);
    assert!(stdout(&output).is_empty());
}
