//! Errors raised by sessions and the instruction-set registry.
//!
//! Parse and runtime errors come from `amn-common`; this module only wraps
//! them together with the I/O failures a tracer can hit.

use amn_common::{ParseError, ProgramError, RuntimeError};
use thiserror::Error;

/// Anything that can go wrong while a session loads or runs code.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A single instruction line failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A program failed to parse; nothing was executed.
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Execution stopped on a failing instruction.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Writing a trace snapshot failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to select an instruction set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown instruction set '{name}' (available: {})", .available.join(", "))]
    UnknownInstructionSet {
        name: String,
        available: Vec<&'static str>,
    },
}
