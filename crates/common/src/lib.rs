//! AMN common contracts.
//!
//! This crate defines what every abstract machine in the workspace agrees on:
//!
//! - [`InstructionSet`]: parse a line, parse a program, classify instructions
//! - [`Machine`]: execute one instruction, reset, describe the state
//! - [`Program`]: a parsed, immutable instruction sequence
//! - [`ParseError`], [`ProgramError`], [`RuntimeError`]: the error taxonomy
//!
//! Concrete sets live in `amn-am0` and `amn-am1`; the execution loop that
//! works over any of them lives in `amn-vm`.

pub mod error;
pub mod instruction;
pub mod machine;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::{ParseError, ProgramError, RuntimeError};
pub use instruction::InstructionSet;
pub use machine::Machine;
pub use program::Program;
