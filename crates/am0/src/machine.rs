//! AM0 machine state and instruction dispatch.

use std::collections::BTreeMap;

use amn_common::machine::{advance, jump_bias};
use amn_common::RuntimeError;

use crate::arith::BinaryOp;
use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// The AM0 machine: instruction counter, operand stack and sparse memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    /// Index of the next instruction.
    pub(crate) counter: i64,
    /// Operand stack, top = last element.
    pub(crate) stack: Vec<i64>,
    /// Address → value. Absent addresses are errors, not zeros.
    pub(crate) memory: BTreeMap<i64, i64>,
}

impl Machine {
    /// Create a machine in an arbitrary state.
    pub fn new(counter: i64, stack: Vec<i64>, memory: BTreeMap<i64, i64>) -> Self {
        Self {
            counter,
            stack,
            memory,
        }
    }

    /// The operand stack, bottom first.
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    /// The memory map.
    pub fn memory(&self) -> &BTreeMap<i64, i64> {
        &self.memory
    }

    /// Fail unless the stack holds at least `needed` values.
    fn require(&self, needed: usize) -> Result<(), RuntimeError> {
        if self.stack.len() < needed {
            return Err(RuntimeError::StackUnderflow {
                at: self.counter,
                needed,
                found: self.stack.len(),
            });
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<i64, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow {
            at: self.counter,
            needed: 1,
            found: 0,
        })
    }

    fn read_memory(&self, address: i64) -> Result<i64, RuntimeError> {
        self.memory
            .get(&address)
            .copied()
            .ok_or(RuntimeError::MissingAddress {
                at: self.counter,
                address,
            })
    }

    fn exec_binary(&mut self, op: BinaryOp) -> Result<(), RuntimeError> {
        self.require(2)?;
        let len = self.stack.len();
        let (a, b) = (self.stack[len - 2], self.stack[len - 1]);
        let result = op
            .apply(a, b)
            .ok_or(RuntimeError::DivisionByZero { at: self.counter })?;
        self.stack.truncate(len - 2);
        self.stack.push(result);
        Ok(())
    }
}

impl amn_common::Machine for Machine {
    type Instruction = Instruction;

    fn counter(&self) -> i64 {
        self.counter
    }

    fn set_counter(&mut self, counter: i64) {
        self.counter = counter;
    }

    fn execute_instruction(
        &mut self,
        instruction: &Instruction,
        input: &mut dyn Iterator<Item = i64>,
    ) -> Result<Option<i64>, RuntimeError> {
        let payload = instruction.payload;
        let mut output = None;

        match instruction.opcode {
            Opcode::Add => self.exec_binary(BinaryOp::Add)?,
            Opcode::Mul => self.exec_binary(BinaryOp::Mul)?,
            Opcode::Sub => self.exec_binary(BinaryOp::Sub)?,
            Opcode::Div => self.exec_binary(BinaryOp::Div)?,
            Opcode::Mod => self.exec_binary(BinaryOp::Mod)?,
            Opcode::Eq => self.exec_binary(BinaryOp::Eq)?,
            Opcode::Ne => self.exec_binary(BinaryOp::Ne)?,
            Opcode::Lt => self.exec_binary(BinaryOp::Lt)?,
            Opcode::Gt => self.exec_binary(BinaryOp::Gt)?,
            Opcode::Le => self.exec_binary(BinaryOp::Le)?,
            Opcode::Ge => self.exec_binary(BinaryOp::Ge)?,

            Opcode::Load => {
                let value = self.read_memory(payload)?;
                self.stack.push(value);
            }
            Opcode::Store => {
                let value = self.pop()?;
                self.memory.insert(payload, value);
            }
            Opcode::Lit => self.stack.push(payload),

            Opcode::Jmp => self.counter = jump_bias(payload),
            Opcode::Jmc => {
                if self.pop()? == 0 {
                    self.counter = jump_bias(payload);
                }
            }

            Opcode::Write => output = Some(self.read_memory(payload)?),
            Opcode::Read => {
                let value = input
                    .next()
                    .ok_or(RuntimeError::InputExhausted { at: self.counter })?;
                self.memory.insert(payload, value);
            }
        }

        self.counter = advance(self.counter);
        Ok(output)
    }

    fn reset(&mut self) {
        self.counter = 0;
        self.stack.clear();
        self.memory.clear();
    }

    /// Counter, stack and a memory dump whose entries follow `Memory:` on
    /// their own lines. An empty memory leaves a blank line after the header.
    fn status(&self) -> String {
        let memory: Vec<String> = self
            .memory
            .iter()
            .map(|(address, value)| format!("\t{address} := {value}"))
            .collect();
        format!(
            "Counter: {}\nStack: {:?}\nMemory:\n{}",
            self.counter,
            self.stack,
            memory.join("\n")
        )
    }

    fn state(&self, input: &[i64], output: &[i64]) -> String {
        format!(
            "({}, {:?}, {:?}, {:?}, {:?})",
            self.counter, self.stack, self.memory, input, output
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amn_common::Machine as _;

    fn exec(
        machine: &mut Machine,
        opcode: Opcode,
        payload: i64,
    ) -> Result<Option<i64>, RuntimeError> {
        let instr = Instruction::new(opcode, payload);
        machine.execute_instruction(&instr, &mut std::iter::empty::<i64>())
    }

    fn with_stack(stack: &[i64]) -> Machine {
        Machine::new(0, stack.to_vec(), BTreeMap::new())
    }

    // ---- Binary operators ----

    #[test]
    fn add_replaces_two_operands_with_sum() {
        let mut m = with_stack(&[1, 3, 4]);
        assert_eq!(exec(&mut m, Opcode::Add, 0), Ok(None));
        assert_eq!(m.stack(), &[1, 7]);
        assert_eq!(m.counter(), 1);
    }

    #[test]
    fn sub_uses_below_minus_top() {
        let mut m = with_stack(&[10, 4]);
        exec(&mut m, Opcode::Sub, 0).unwrap();
        assert_eq!(m.stack(), &[6]);
    }

    #[test]
    fn div_and_mod_floor() {
        let mut m = with_stack(&[-7, 2]);
        exec(&mut m, Opcode::Div, 0).unwrap();
        assert_eq!(m.stack(), &[-4]);

        let mut m = with_stack(&[-7, 2]);
        exec(&mut m, Opcode::Mod, 0).unwrap();
        assert_eq!(m.stack(), &[1]);
    }

    #[test]
    fn comparison_pushes_flag() {
        let mut m = with_stack(&[2, 5]);
        exec(&mut m, Opcode::Lt, 0).unwrap();
        assert_eq!(m.stack(), &[1]);
    }

    #[test]
    fn binary_underflow_leaves_state_untouched() {
        let mut m = with_stack(&[9]);
        assert_eq!(
            exec(&mut m, Opcode::Mul, 0),
            Err(RuntimeError::StackUnderflow {
                at: 0,
                needed: 2,
                found: 1
            })
        );
        assert_eq!(m, with_stack(&[9]));
    }

    #[test]
    fn division_by_zero_leaves_state_untouched() {
        let mut m = with_stack(&[9, 0]);
        assert_eq!(
            exec(&mut m, Opcode::Div, 0),
            Err(RuntimeError::DivisionByZero { at: 0 })
        );
        assert_eq!(m, with_stack(&[9, 0]));
    }

    // ---- Memory ----

    #[test]
    fn store_then_load() {
        let mut m = with_stack(&[5]);
        exec(&mut m, Opcode::Store, 3).unwrap();
        assert!(m.stack().is_empty());
        assert_eq!(m.memory().get(&3), Some(&5));

        exec(&mut m, Opcode::Load, 3).unwrap();
        assert_eq!(m.stack(), &[5]);
        assert_eq!(m.counter(), 2);
    }

    #[test]
    fn load_missing_address() {
        let mut m = Machine::default();
        assert_eq!(
            exec(&mut m, Opcode::Load, 7),
            Err(RuntimeError::MissingAddress { at: 0, address: 7 })
        );
        assert_eq!(m.counter(), 0);
    }

    #[test]
    fn store_on_empty_stack() {
        let mut m = Machine::default();
        assert!(matches!(
            exec(&mut m, Opcode::Store, 0),
            Err(RuntimeError::StackUnderflow { needed: 1, found: 0, .. })
        ));
        assert!(m.memory().is_empty());
    }

    #[test]
    fn store_overwrites() {
        let mut m = with_stack(&[1, 2]);
        exec(&mut m, Opcode::Store, 0).unwrap();
        exec(&mut m, Opcode::Store, 0).unwrap();
        assert_eq!(m.memory().get(&0), Some(&1));
    }

    #[test]
    fn lit_pushes_payload() {
        let mut m = Machine::default();
        exec(&mut m, Opcode::Lit, -3).unwrap();
        assert_eq!(m.stack(), &[-3]);
    }

    // ---- Control flow ----

    #[test]
    fn jmp_makes_target_the_next_index() {
        let mut m = Machine::default();
        exec(&mut m, Opcode::Jmp, 5).unwrap();
        assert_eq!(m.counter(), 4);
    }

    #[test]
    fn jmc_jumps_on_zero() {
        let mut m = with_stack(&[0]);
        exec(&mut m, Opcode::Jmc, 5).unwrap();
        assert_eq!(m.counter(), 4);
        assert!(m.stack().is_empty());
    }

    #[test]
    fn jmc_falls_through_on_nonzero() {
        let mut m = with_stack(&[-1]);
        exec(&mut m, Opcode::Jmc, 5).unwrap();
        assert_eq!(m.counter(), 1);
        assert!(m.stack().is_empty());
    }

    #[test]
    fn jmc_on_empty_stack() {
        let mut m = Machine::default();
        assert!(matches!(
            exec(&mut m, Opcode::Jmc, 1),
            Err(RuntimeError::StackUnderflow { .. })
        ));
        assert_eq!(m.counter(), 0);
    }

    // ---- I/O ----

    #[test]
    fn write_returns_memory_without_touching_stack() {
        let mut m = Machine::new(0, vec![1], BTreeMap::from([(0, 7)]));
        assert_eq!(exec(&mut m, Opcode::Write, 0), Ok(Some(7)));
        assert_eq!(m.stack(), &[1]);
    }

    #[test]
    fn write_missing_address() {
        let mut m = with_stack(&[7]);
        assert_eq!(
            exec(&mut m, Opcode::Write, 0),
            Err(RuntimeError::MissingAddress { at: 0, address: 0 })
        );
    }

    #[test]
    fn read_consumes_exactly_one_value() {
        let mut m = Machine::default();
        let mut input = vec![42, 43].into_iter();
        let result = m.execute_instruction(&Instruction::new(Opcode::Read, 2), &mut input);
        assert_eq!(result, Ok(None));
        assert_eq!(m.memory().get(&2), Some(&42));
        assert_eq!(input.as_slice(), &[43]);
    }

    #[test]
    fn read_from_exhausted_input() {
        let mut m = Machine::default();
        assert_eq!(
            exec(&mut m, Opcode::Read, 0),
            Err(RuntimeError::InputExhausted { at: 0 })
        );
    }

    // ---- Reset and introspection ----

    #[test]
    fn reset_restores_default() {
        let mut m = Machine::new(9, vec![1, 2], BTreeMap::from([(0, 1)]));
        m.reset();
        assert_eq!(m, Machine::default());
        m.reset();
        assert_eq!(m, Machine::default());
    }

    #[test]
    fn status_lists_memory() {
        let m = Machine::new(3, vec![7], BTreeMap::from([(0, 7), (2, -1)]));
        assert_eq!(
            m.status(),
            "Counter: 3\nStack: [7]\nMemory:\n\t0 := 7\n\t2 := -1"
        );
    }

    #[test]
    fn status_with_empty_memory_ends_in_newline() {
        let m = Machine::new(1, vec![4], BTreeMap::new());
        assert_eq!(m.status(), "Counter: 1\nStack: [4]\nMemory:\n");
    }

    #[test]
    fn state_snapshot() {
        let m = Machine::new(2, vec![3, 4], BTreeMap::new());
        assert_eq!(m.state(&[42], &[]), "(2, [3, 4], {}, [42], [])");
    }
}
