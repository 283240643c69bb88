//! Step tracing: a configuration snapshot around every instruction.

use std::io::Write;

use amn_common::{Machine, Program};

use crate::error::SessionError;
use crate::execute::Execution;

/// Fixed input list that hands out values from its end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceInput {
    values: Vec<i64>,
}

impl TraceInput {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Values not read yet, in the order they were given.
    pub fn remaining(&self) -> &[i64] {
        &self.values
    }
}

impl Iterator for TraceInput {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.values.pop()
    }
}

/// Run `program` with a fixed input list, writing one snapshot line to `out`
/// before the first instruction and after each executed one.
///
/// Inputs are consumed from the end of the list, so the last value feeds the
/// first READ. Returns the produced outputs.
pub fn trace_program<M, W>(
    machine: &mut M,
    program: &Program<M::Instruction>,
    input: Vec<i64>,
    out: &mut W,
) -> Result<Vec<i64>, SessionError>
where
    M: Machine,
    W: Write + ?Sized,
{
    let mut outputs = Vec::new();
    let mut run = Execution::new(machine, program, TraceInput::new(input));

    writeln!(out, "{}", run.machine().state(run.input().remaining(), &outputs))?;
    while let Some(result) = run.step() {
        outputs.extend(result?);
        writeln!(out, "{}", run.machine().state(run.input().remaining(), &outputs))?;
    }

    Ok(outputs)
}
