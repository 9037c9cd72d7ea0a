//! Compiler frontend
//!
//! Turns program text into an executable [`Program`] in two small steps:
//! the [`lexer`] splits the source into whitespace-delimited words, and
//! [`compile`] resolves each word against the vocabulary while checking
//! that `start`/`select` branches pair up. The only structure the
//! language has is that pairing, so there is no AST in between; words
//! map straight onto opcodes.

pub mod lexer;

use std::io::Read;

use thiserror::Error;
use tracing::{debug, trace};

use crate::middle::bytecode::Program;
use crate::util::span::Position;

pub use lexer::{Identifier, Lexer, Word};

/// Errors reported while compiling program text
#[derive(Debug, Error)]
pub enum CompileError {
    /// A word that is not part of the vocabulary
    #[error("Invalid identifier '{word}' at {position}")]
    UnknownIdentifier {
        /// The offending word, exactly as written
        word: String,
        /// Where the word starts
        position: Position,
    },

    /// A `select` with no `start` still open
    #[error("Unexpected 'select' at {position}: no matching 'start'")]
    UnmatchedLoopEnd {
        /// Where the stray `select` starts
        position: Position,
    },

    /// One or more `start` words never closed
    #[error("Missing 'select' for {count} open branch(es), first 'start' at {position}")]
    UnclosedLoopStart {
        /// How many branches are still open at end of input
        count: usize,
        /// Where the first unclosed `start` was opened
        position: Position,
    },

    /// The source could not be read
    #[error("Failed to read program source")]
    Io(#[from] std::io::Error),
}

/// Compile program text into an executable program.
///
/// Every word must belong to the vocabulary and every `start` must pair
/// with a later `select`. Compilation stops at the first offending word.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    debug!("Compiling source ({} bytes)", source.len());

    let mut ops = Vec::new();
    let mut open_branches: Vec<Position> = Vec::new();

    let mut lexer = Lexer::new(source);
    while let Some(word) = lexer.next_word() {
        let ident =
            Identifier::parse(&word.text).ok_or_else(|| CompileError::UnknownIdentifier {
                word: word.text.clone(),
                position: word.span.start,
            })?;
        trace!("word '{}' at {} -> {}", word.text, word.span, ident.opcode());

        match ident {
            Identifier::Start => open_branches.push(word.span.start),
            Identifier::Select => {
                if open_branches.pop().is_none() {
                    return Err(CompileError::UnmatchedLoopEnd {
                        position: word.span.start,
                    });
                }
            }
            _ => {}
        }
        ops.push(ident.opcode());
    }

    if let Some(&position) = open_branches.first() {
        return Err(CompileError::UnclosedLoopStart {
            count: open_branches.len(),
            position,
        });
    }

    debug!("Compiled {} instructions", ops.len());
    Ok(Program::new(ops))
}

/// Compile program text from any reader.
///
/// The source is slurped up front; programs are tiny and the branch
/// check needs the whole text anyway.
pub fn compile_reader<R: Read>(mut reader: R) -> Result<Program, CompileError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    compile(&source)
}

/// Render a compiled program back to canonical source text.
///
/// The result is a single line of lowercase words; compiling it again
/// yields the same program.
pub fn disassemble(program: &Program) -> String {
    program
        .ops()
        .iter()
        .map(|&op| Identifier::from_opcode(op).as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
