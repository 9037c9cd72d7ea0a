//! Shared compiled-program representation
//!
//! This module holds the types the compiler produces and the executor
//! consumes, keeping the two phases decoupled.

pub mod bytecode;

pub use bytecode::{Opcode, Program};
