//! 虚拟机错误类型

use thiserror::Error;

/// Errors raised while a program is executing.
///
/// Any of these aborts the run; the machine stays in its failed state
/// so callers can inspect it afterwards.
#[derive(Debug, Error)]
pub enum VMError {
    /// The program counter left the program (a skip ran off the end)
    #[error("Program counter out of bounds: {0}")]
    ProgramCounterOutOfBounds(usize),

    /// The data pointer moved off the tape
    #[error("Data pointer out of bounds: {0}")]
    DataPointerOutOfBounds(isize),

    /// A branch close with no recorded open.
    ///
    /// Compiled programs always balance their branches, so this only
    /// comes up for instruction sequences assembled by hand.
    #[error("Control stack underflow: branch close with no open branch")]
    ControlStackUnderflow,

    /// Reading a byte from the input failed
    #[error("Failed to read input")]
    InputRead(#[source] std::io::Error),

    /// Writing a cell to the output failed
    #[error("Failed to write output")]
    OutputWrite(#[source] std::io::Error),
}

/// 虚拟机统一返回类型
pub type VMResult<T> = Result<T, VMError>;
