//! CLI contract tests
//!
//! Spawns the built binary and checks source selection, the exit codes,
//! and the name-prefixed single-line diagnostic.

use std::io::Write as _;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_konamicode");

fn run_cli(args: &[&str], piped_program: &[u8]) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interpreter");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(piped_program)
        .unwrap();
    child.wait_with_output().expect("failed to collect output")
}

#[test]
fn test_piped_success_is_silent() {
    let output = run_cli(&[], b"up b");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, [1]);
    assert!(output.stderr.is_empty(), "stderr: {:?}", output.stderr);
}

#[test]
fn test_piped_program_wins_over_file_argument() {
    // A piped program is the source even when a file is also given;
    // the file argument only applies at an interactive terminal.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "up b").unwrap();
    let path = file.path().to_str().unwrap().to_owned();

    let output = run_cli(&[&path], b"down b");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, "\u{ff}".as_bytes());
}

#[test]
fn test_compile_error_prefixed_diagnostic_exit_one() {
    let output = run_cli(&[], b"up bogus");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr:?}");
    assert!(stderr.starts_with("konamicode: "), "stderr: {stderr:?}");
    assert!(stderr.contains("Invalid identifier 'bogus'"));
}

#[test]
fn test_runtime_error_prefixed_diagnostic_exit_one() {
    let output = run_cli(&[], b"left");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("konamicode: "), "stderr: {stderr:?}");
    assert!(stderr.contains("Data pointer out of bounds: -1"));
}

#[test]
fn test_dump_prints_listing_without_executing() {
    let output = run_cli(&["--dump"], b"up b");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("IncrementCell"));
    assert!(stdout.contains("WriteByte"));
    // listing only; the program itself never ran
    assert!(!stdout.as_bytes().contains(&1u8));
}
