//! End-to-end execution tests
//!
//! Compile word-token source and run it on a VM with in-memory I/O,
//! checking the observable output and terminal status.

use std::io::Cursor;
use std::io::Write as _;

use konamicode::frontend::compile;
use konamicode::vm::{VMError, VM};
use proptest::prelude::*;

/// Compile `source` and run it with `input`, returning the output bytes
fn run_with_input(source: &str, input: &[u8]) -> Result<Vec<u8>, VMError> {
    let program = compile(source).expect("source should compile");
    let mut vm = VM::new(Cursor::new(input.to_vec()), Vec::new());
    vm.run(&program)?;
    Ok(vm.output().clone())
}

#[test]
fn test_echo_single_byte() {
    // 'a b' with input byte 65 prints exactly "A"
    let output = run_with_input("a b", b"A").unwrap();
    assert_eq!(output, b"A");
}

#[test]
fn test_echo_empty_input_prints_nul() {
    // End of input leaves the cell at its initial 0; not an error
    let output = run_with_input("a b", &[]).unwrap();
    assert_eq!(output, [0]);
}

#[test]
fn test_loop_executes_exactly_once() {
    let program = compile("up start down select").unwrap();
    let mut vm = VM::new(Cursor::new(Vec::new()), Vec::new());
    vm.run(&program).unwrap();
    assert_eq!(vm.tape()[0], 0);
    assert!(vm.output().is_empty());
}

#[test]
fn test_decrement_from_zero_prints_255() {
    let output = run_with_input("down b", &[]).unwrap();
    assert_eq!(output, "\u{ff}".as_bytes());
}

#[test]
fn test_left_from_origin_is_fatal_before_any_effect() {
    let err = run_with_input("left b b b", &[]).unwrap_err();
    match err {
        VMError::DataPointerOutOfBounds(dp) => assert_eq!(dp, -1),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_countdown_loop_output() {
    // Set the cell to 3, then print-and-decrement until zero
    let output = run_with_input("up up up start b down select", &[]).unwrap();
    assert_eq!(output, [3, 2, 1]);
}

#[test]
fn test_multiplication_by_repeated_addition() {
    // 3 * 2: the loop counts cell 0 down and adds 2 to cell 1 each pass
    let source = "up up up \
                  start right up up left down select \
                  right b";
    let output = run_with_input(source, &[]).unwrap();
    assert_eq!(output, [6]);
}

#[test]
fn test_run_reader_executes_io_free_program() {
    // Reader-sourced mode; the program touches no streams itself
    konamicode::run_reader(&b"up start down select"[..]).unwrap();
}

#[test]
fn test_run_reader_reports_compile_errors() {
    let err = konamicode::run_reader(&b"up bogus"[..]).unwrap_err();
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_run_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "up start down select").unwrap();
    konamicode::run_file(file.path()).unwrap();
}

#[test]
fn test_run_file_reports_compile_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "up konami").unwrap();
    let err = konamicode::run_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("konami"));
}

#[test]
fn test_run_file_missing_file() {
    let err = konamicode::run_file(std::path::Path::new("no/such/file.kc")).unwrap_err();
    assert!(err.to_string().contains("no/such/file.kc"));
}

proptest! {
    #[test]
    fn prop_increments_wrap_modulo_256(n in 0usize..1024) {
        // n ups then b prints n mod 256
        let mut source = "up ".repeat(n);
        source.push('b');
        let output = run_with_input(&source, &[]).unwrap();
        let expected: String = char::from((n % 256) as u8).to_string();
        prop_assert_eq!(output, expected.into_bytes());
    }

    #[test]
    fn prop_echo_forwards_any_byte(byte in any::<u8>()) {
        let output = run_with_input("a b", &[byte]).unwrap();
        let expected: String = char::from(byte).to_string();
        prop_assert_eq!(output, expected.into_bytes());
    }
}
