//! Bytecode for the Konami Code virtual machine
//!
//! This module defines the compiled form of a program - the interface
//! between the compiler frontend and the execution backend. The executor
//! depends on these types only, never on the frontend itself.
//!
//! The instruction set is closed: eight opcodes, one per surface
//! identifier, with no operands. Loops carry no precomputed jump targets;
//! the executor resolves them at run time with its control stack.

use std::fmt;

/// Bytecode opcode
///
/// One variant per surface identifier. Discriminants are stable so a
/// program listing can show the raw encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Add 1 to the cell at the data pointer (wrapping)
    IncrementCell = 0x00,

    /// Subtract 1 from the cell at the data pointer (wrapping)
    DecrementCell = 0x01,

    /// Move the data pointer one cell left
    MoveLeft = 0x02,

    /// Move the data pointer one cell right
    MoveRight = 0x03,

    /// Read one byte from program input into the current cell
    /// (end of input leaves the cell unchanged)
    ReadByte = 0x04,

    /// Write the current cell to program output as one character
    WriteByte = 0x05,

    /// Enter the loop body if the current cell is nonzero,
    /// otherwise skip to just past the matching LoopEnd
    LoopStart = 0x06,

    /// Re-enter the loop body if the current cell is nonzero,
    /// otherwise leave the loop
    LoopEnd = 0x07,
}

impl Opcode {
    /// Get the opcode name
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::IncrementCell => "IncrementCell",
            Opcode::DecrementCell => "DecrementCell",
            Opcode::MoveLeft => "MoveLeft",
            Opcode::MoveRight => "MoveRight",
            Opcode::ReadByte => "ReadByte",
            Opcode::WriteByte => "WriteByte",
            Opcode::LoopStart => "LoopStart",
            Opcode::LoopEnd => "LoopEnd",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Opcode::IncrementCell),
            0x01 => Ok(Opcode::DecrementCell),
            0x02 => Ok(Opcode::MoveLeft),
            0x03 => Ok(Opcode::MoveRight),
            0x04 => Ok(Opcode::ReadByte),
            0x05 => Ok(Opcode::WriteByte),
            0x06 => Ok(Opcode::LoopStart),
            0x07 => Ok(Opcode::LoopEnd),
            _ => Err(()),
        }
    }
}

/// Compiled program: an ordered, 0-indexed opcode sequence
///
/// Length is fixed once compilation succeeds. The compile pipeline
/// guarantees loop balance (every `LoopStart` has its matching later
/// `LoopEnd` and vice versa); hand-built values bypass that guarantee
/// and rely on the executor's runtime bounds checks instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    ops: Vec<Opcode>,
}

impl Program {
    /// Create a program from an opcode sequence
    #[inline]
    pub fn new(ops: Vec<Opcode>) -> Self {
        Self { ops }
    }

    /// Number of instructions
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check whether the program has no instructions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Get the opcode at a program-counter position
    #[inline]
    pub fn get(&self, pc: usize) -> Option<Opcode> {
        self.ops.get(pc).copied()
    }

    /// View the full instruction sequence
    #[inline]
    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }
}

impl From<Vec<Opcode>> for Program {
    fn from(ops: Vec<Opcode>) -> Self {
        Self::new(ops)
    }
}
