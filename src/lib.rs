//! Konami Code Esoteric Language
//!
//! An interpreter for a stack-tape language whose entire syntax is eight
//! whitespace-separated words: `up`, `down`, `left`, `right`, `a`, `b`,
//! `start`, `select`. Each word compiles to one opcode of a classic
//! tape-and-pointer machine with `start`/`select` looping.
//!
//! # Example
//!
//! ```konamicode
//! a start b a select
//! ```
//!
//! Pipeline: source text → [`frontend::compile`] → [`middle::Program`] →
//! [`vm::VM::run`].

#![doc(html_root_url = "https://docs.rs/konamicode")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;
pub mod middle;
pub mod vm;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::frontend::Identifier;
use crate::middle::Program;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "konamicode";

/// Compile and run a program, wiring it to process stdin/stdout.
///
/// # Example
///
/// ```no_run
/// use konamicode::{run, Result};
///
/// fn main() -> Result<()> {
///     run("up up b")?;
///     Ok(())
/// }
/// ```
pub fn run(source: &str) -> Result<()> {
    let program = frontend::compile(source)?;
    execute(&program)
}

/// Compile a program from any reader, then run it on process stdin/stdout.
///
/// This is the piped-source mode: the reader is fully consumed during
/// compilation, so when it was itself stdin, program-time reads start at
/// end-of-input.
pub fn run_reader<R: io::Read>(reader: R) -> Result<()> {
    let program = frontend::compile_reader(reader)?;
    execute(&program)
}

/// Compile and run a program file
pub fn run_file(path: &Path) -> Result<()> {
    debug!("Running file: {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    run(&source)
}

fn execute(program: &Program) -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::BufWriter::new(io::stdout().lock());
    let mut vm = vm::VM::new(stdin, stdout);
    vm.run(program)?;
    Ok(())
}

/// Compile a program and print its instruction listing instead of running it
pub fn dump(source: &str) -> Result<()> {
    let program = frontend::compile(source)?;

    println!("=== Program ({} instructions) ===", program.len());
    for (pc, &op) in program.ops().iter().enumerate() {
        println!(
            "  [{:4}] 0x{:02X} {:<13} {}",
            pc,
            op as u8,
            op.name(),
            Identifier::from_opcode(op)
        );
    }

    Ok(())
}
