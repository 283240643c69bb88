//! Error taxonomy shared by every AMN instruction set.
//!
//! Parse errors are detected eagerly, before a program runs. Runtime errors
//! carry the counter of the instruction that raised them (`at`).

use thiserror::Error;

/// Errors from parsing a single instruction line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The opcode name is not a member of the instruction set.
    #[error("unknown instruction '{token}'")]
    UnknownInstruction { token: String },

    /// A payload is present but is not a valid operand.
    #[error("invalid payload '{token}'")]
    InvalidPayload { token: String },
}

/// A [`ParseError`] located at a 1-based line of program text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {source}")]
pub struct ProgramError {
    pub line: usize,
    #[source]
    pub source: ParseError,
}

/// Errors that stop the execution of an instruction.
///
/// A machine validates these conditions before mutating any state, so the
/// machine is left exactly as it was before the failing instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The instruction needs more operands than the stack holds.
    #[error("stack underflow at instruction {at}: needs {needed} value(s), found {found}")]
    StackUnderflow { at: i64, needed: usize, found: usize },

    /// A memory address was read before anything was stored there.
    #[error("missing memory address {address} at instruction {at}")]
    MissingAddress { at: i64, address: i64 },

    /// READ requested a value but the input yielded none.
    #[error("input exhausted at instruction {at}")]
    InputExhausted { at: i64 },

    /// DIV or MOD with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: i64 },

    /// A runtime stack would grow past its slot limit.
    #[error("stack overflow at instruction {at}: limit is {limit} slots")]
    StackOverflow { at: i64, limit: usize },
}
