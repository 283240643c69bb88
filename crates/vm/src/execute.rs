//! The lazy execution loop shared by every machine.

use amn_common::{InstructionSet, Machine, Program, RuntimeError};
use tracing::{debug, trace};

/// A program run in progress.
///
/// Each call to [`Iterator::next`] executes instructions until one of them
/// writes a value, an instruction fails, or the counter leaves the program.
/// Nothing runs ahead of the caller: dropping the iterator stops the machine
/// right after the last value that was pulled.
///
/// After an error the iterator is fused and yields `None`.
pub struct Execution<'a, M: Machine, I> {
    machine: &'a mut M,
    program: &'a Program<M::Instruction>,
    input: I,
    finished: bool,
}

impl<'a, M, I> Execution<'a, M, I>
where
    M: Machine,
    I: Iterator<Item = i64>,
{
    /// Start running `program` from its first instruction. The operand stack
    /// and memory are left as they are.
    pub fn new(machine: &'a mut M, program: &'a Program<M::Instruction>, input: I) -> Self {
        machine.set_counter(0);
        Self {
            machine,
            program,
            input,
            finished: false,
        }
    }

    /// Execute a single instruction.
    ///
    /// Returns `None` once the program has halted or failed, otherwise the
    /// result of the instruction that just ran.
    pub fn step(&mut self) -> Option<Result<Option<i64>, RuntimeError>> {
        if self.finished {
            return None;
        }

        let at = self.machine.counter();
        let Some(instruction) = self.program.fetch(at) else {
            debug!(counter = at, "halted");
            self.finished = true;
            return None;
        };

        let result = self.machine.execute_instruction(instruction, &mut self.input);
        match &result {
            Ok(output) => {
                trace!(counter = at, instruction = %instruction, ?output, "executed");
                if instruction.is_jump() {
                    debug!(from = at, to = self.machine.counter(), "jump");
                }
            }
            Err(err) => {
                debug!(counter = at, instruction = %instruction, error = %err, "failed");
                self.finished = true;
            }
        }
        Some(result)
    }

    pub fn machine(&self) -> &M {
        self.machine
    }

    /// The input not yet consumed.
    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<M, I> Iterator for Execution<'_, M, I>
where
    M: Machine,
    I: Iterator<Item = i64>,
{
    type Item = Result<i64, RuntimeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step()? {
                Ok(Some(value)) => return Some(Ok(value)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Run `program` on `machine`, yielding outputs lazily.
///
/// The counter is set to 0 before the first instruction; the rest of the
/// machine state carries over, so re-running without a reset sees the
/// memory of the previous run.
pub fn execute_program<'a, M, I>(
    machine: &'a mut M,
    program: &'a Program<M::Instruction>,
    input: I,
) -> Execution<'a, M, I::IntoIter>
where
    M: Machine,
    I: IntoIterator<Item = i64>,
{
    Execution::new(machine, program, input.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use amn_am0::{Instruction, Machine as Am0};

    fn program(source: &str) -> Program<Instruction> {
        Instruction::parse_program(source).unwrap()
    }

    #[test]
    fn step_reports_each_instruction() {
        let program = program("LIT 1\nSTORE 0\nWRITE 0");
        let mut machine = Am0::default();
        let mut run = execute_program(&mut machine, &program, std::iter::empty::<i64>());
        assert_eq!(run.step(), Some(Ok(None)));
        assert_eq!(run.step(), Some(Ok(None)));
        assert_eq!(run.step(), Some(Ok(Some(1))));
        assert_eq!(run.step(), None);
        assert!(run.is_finished());
    }

    #[test]
    fn fused_after_error() {
        let program = program("ADD\nLIT 1");
        let mut machine = Am0::default();
        let mut run = execute_program(&mut machine, &program, std::iter::empty::<i64>());
        assert!(matches!(run.next(), Some(Err(RuntimeError::StackUnderflow { .. }))));
        assert_eq!(run.next(), None);
        assert_eq!(machine.counter(), 0);
    }

    #[test]
    fn empty_program_halts_immediately() {
        let program = program("");
        let mut machine = Am0::default();
        assert_eq!(execute_program(&mut machine, &program, std::iter::empty::<i64>()).count(), 0);
    }

    #[test]
    fn restart_resets_counter_only() {
        let program = program("LIT 5\nSTORE 1");
        let mut machine = Am0::default();
        execute_program(&mut machine, &program, std::iter::empty::<i64>()).for_each(drop);
        machine.set_counter(7);

        let run = execute_program(&mut machine, &program, std::iter::empty::<i64>());
        assert_eq!(run.machine().counter(), 0);
        assert_eq!(run.machine().memory().get(&1), Some(&5));
    }

    #[test]
    fn input_left_over() {
        let program = program("READ 0");
        let mut machine = Am0::default();
        let mut run = execute_program(&mut machine, &program, vec![1, 2, 3]);
        while run.next().is_some() {}
        assert_eq!(run.input().as_slice(), &[2, 3]);
    }
}
