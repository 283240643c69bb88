//! Sessions: one machine bundled with the parser for its instruction set.
//!
//! The shell and the batch commands pick an instruction set at runtime, so
//! they talk to machines through the object-safe [`Session`] trait rather
//! than the generic [`Machine`] one.

use std::io::Write;

use amn_common::{InstructionSet, Machine};
use tracing::debug;

use crate::error::SessionError;
use crate::execute::Execution;
use crate::trace::trace_program;

/// Text-level access to a machine.
pub trait Session {
    /// Name of the instruction set, e.g. `AM0`.
    fn name(&self) -> &'static str;

    /// Parse and execute one instruction against the current state.
    fn execute_line(
        &mut self,
        line: &str,
        input: &mut dyn Iterator<Item = i64>,
    ) -> Result<Option<i64>, SessionError>;

    /// Parse `source` as a whole and run it from its first instruction,
    /// handing each output to `on_output` as soon as it is produced.
    fn run(
        &mut self,
        source: &str,
        input: &mut dyn Iterator<Item = i64>,
        on_output: &mut dyn FnMut(i64),
    ) -> Result<(), SessionError>;

    /// Parse and run `source`, writing a state snapshot around every
    /// instruction to `out`. Returns the outputs.
    fn trace(
        &mut self,
        source: &str,
        input: Vec<i64>,
        out: &mut dyn Write,
    ) -> Result<Vec<i64>, SessionError>;

    fn reset(&mut self);

    fn status(&self) -> String;
}

/// A [`Session`] over any [`Machine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engine<M> {
    machine: M,
}

impl<M: Machine> Engine<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }
}

impl<M: Machine> Session for Engine<M> {
    fn name(&self) -> &'static str {
        M::Instruction::NAME
    }

    fn execute_line(
        &mut self,
        line: &str,
        input: &mut dyn Iterator<Item = i64>,
    ) -> Result<Option<i64>, SessionError> {
        let instruction = M::Instruction::parse(line.trim())?;
        Ok(self.machine.execute_instruction(&instruction, input)?)
    }

    fn run(
        &mut self,
        source: &str,
        input: &mut dyn Iterator<Item = i64>,
        on_output: &mut dyn FnMut(i64),
    ) -> Result<(), SessionError> {
        let program = M::Instruction::parse_program(source)?;
        debug!(set = self.name(), len = program.len(), "running program");
        for value in Execution::new(&mut self.machine, &program, input) {
            on_output(value?);
        }
        Ok(())
    }

    fn trace(
        &mut self,
        source: &str,
        input: Vec<i64>,
        out: &mut dyn Write,
    ) -> Result<Vec<i64>, SessionError> {
        let program = M::Instruction::parse_program(source)?;
        debug!(set = self.name(), len = program.len(), "tracing program");
        trace_program(&mut self.machine, &program, input, out)
    }

    fn reset(&mut self) {
        self.machine.reset();
    }

    fn status(&self) -> String {
        self.machine.status()
    }
}
