//! The machine contract: state that executes one instruction at a time.

use crate::error::RuntimeError;
use crate::instruction::InstructionSet;

/// An abstract machine for one instruction set.
///
/// `Default` builds the initial state. The engine in `amn-vm` drives any
/// implementation through this trait alone.
pub trait Machine: Default {
    /// The instruction set this machine executes.
    type Instruction: InstructionSet;

    /// Index of the next instruction to execute.
    fn counter(&self) -> i64;

    /// Move the instruction counter, e.g. to restart a program.
    fn set_counter(&mut self, counter: i64);

    /// Apply one instruction.
    ///
    /// Consumes from `input` only for instructions that read. Returns the
    /// produced value for instructions that write. On success the counter has
    /// advanced by one (after any jump bias). On error nothing has changed.
    fn execute_instruction(
        &mut self,
        instruction: &Self::Instruction,
        input: &mut dyn Iterator<Item = i64>,
    ) -> Result<Option<i64>, RuntimeError>;

    /// Restore the default state in place.
    fn reset(&mut self);

    /// Multi-line status dump for the interactive shell.
    fn status(&self) -> String;

    /// One-line configuration snapshot for step tracing, given the input not
    /// yet consumed and the output produced so far.
    fn state(&self, input: &[i64], output: &[i64]) -> String;
}

/// Set the counter so that, after the universal increment, instruction
/// number `target` (1-based) is fetched next.
pub fn jump_bias(target: i64) -> i64 {
    target.saturating_sub(2)
}

/// Advance a counter by the universal single step.
pub fn advance(counter: i64) -> i64 {
    counter.saturating_add(1)
}
