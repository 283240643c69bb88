//! AM1 machine state and instruction dispatch.
//!
//! The runtime stack is addressed from 1. A procedure frame looks like
//!
//! ```text
//! ... | param 1 .. param n | return | saved ref | local 1 ..
//!                                      ^ reference
//! ```
//!
//! so parameters sit at negative local offsets and locals at positive ones.

use amn_common::machine::{advance, jump_bias};
use amn_common::RuntimeError;

use amn_am0::BinaryOp;

use crate::instruction::Instruction;
use crate::operand::{Address, Base};

/// Maximum number of runtime-stack slots.
pub const MAX_RUNTIME_STACK: usize = 1 << 20;

/// The AM1 machine: counter, operand stack, runtime stack and reference pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    pub(crate) counter: i64,
    pub(crate) stack: Vec<i64>,
    pub(crate) runtime: Vec<i64>,
    /// Runtime-stack address of the current frame's saved reference.
    pub(crate) reference: i64,
}

impl Machine {
    /// Create a machine in an arbitrary state.
    pub fn new(counter: i64, stack: Vec<i64>, runtime: Vec<i64>, reference: i64) -> Self {
        Self {
            counter,
            stack,
            runtime,
            reference,
        }
    }

    /// The operand stack, bottom first.
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    /// The runtime stack, address 1 first.
    pub fn runtime(&self) -> &[i64] {
        &self.runtime
    }

    /// Runtime-stack address of the current frame, 0 outside any procedure.
    pub fn reference(&self) -> i64 {
        self.reference
    }

    /// Resolve an operand to an absolute runtime-stack address.
    fn resolve(&self, address: Address) -> i64 {
        match address.base {
            Base::Global => address.offset,
            Base::Local => self.reference.saturating_add(address.offset),
        }
    }

    /// Vector index of a runtime-stack address.
    fn slot(&self, address: i64) -> Result<usize, RuntimeError> {
        usize::try_from(address)
            .ok()
            .filter(|&a| a >= 1 && a <= self.runtime.len())
            .map(|a| a - 1)
            .ok_or(RuntimeError::MissingAddress {
                at: self.counter,
                address,
            })
    }

    /// Slot named by the pointer stored at local offset `offset`.
    fn indirect(&self, offset: i64) -> Result<usize, RuntimeError> {
        let pointer = self.slot(self.reference.saturating_add(offset))?;
        self.slot(self.runtime[pointer])
    }

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

    /// Fail unless the runtime stack has room for `extra` more slots.
    fn reserve(&mut self, extra: usize) -> Result<(), RuntimeError> {
        let overflow = RuntimeError::StackOverflow {
            at: self.counter,
            limit: MAX_RUNTIME_STACK,
        };
        match self.runtime.len().checked_add(extra) {
            Some(len) if len <= MAX_RUNTIME_STACK => {
                self.runtime.try_reserve(extra).map_err(|_| overflow)
            }
            _ => Err(overflow),
        }
    }

    fn pop(&mut self) -> Result<i64, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow {
            at: self.counter,
            needed: 1,
            found: 0,
        })
    }

    fn exec_binary(&mut self, op: BinaryOp) -> Result<(), RuntimeError> {
        self.require(2)?;
        let len = self.stack.len();
        let result = op
            .apply(self.stack[len - 2], self.stack[len - 1])
            .ok_or(RuntimeError::DivisionByZero { at: self.counter })?;
        self.stack.truncate(len - 2);
        self.stack.push(result);
        Ok(())
    }

    /// Pop the operand stack into a runtime slot.
    fn store(&mut self, slot: usize) -> Result<(), RuntimeError> {
        self.runtime[slot] = self.pop()?;
        Ok(())
    }

    fn read(
        &mut self,
        slot: usize,
        input: &mut dyn Iterator<Item = i64>,
    ) -> Result<(), RuntimeError> {
        self.runtime[slot] = input
            .next()
            .ok_or(RuntimeError::InputExhausted { at: self.counter })?;
        Ok(())
    }

    fn ret(&mut self, params: i64) -> Result<(), RuntimeError> {
        let frame = self.reference;
        let ret_slot = self.slot(frame.saturating_sub(1))?;
        let saved_slot = self.slot(frame)?;
        let keep = frame.saturating_sub(2).saturating_sub(params);
        let keep = usize::try_from(keep).map_err(|_| RuntimeError::MissingAddress {
            at: self.counter,
            address: keep,
        })?;

        let target = self.runtime[ret_slot];
        self.reference = self.runtime[saved_slot];
        self.runtime.truncate(keep);
        self.counter = jump_bias(target);
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
        let mut output = None;

        match *instruction {
            Instruction::Operator(op) => self.exec_binary(op)?,
            Instruction::Lit(n) => self.stack.push(n),

            Instruction::Load(a) => {
                let slot = self.slot(self.resolve(a))?;
                self.stack.push(self.runtime[slot]);
            }
            Instruction::Store(a) => {
                self.require(1)?;
                let slot = self.slot(self.resolve(a))?;
                self.store(slot)?;
            }
            Instruction::Write(a) => {
                let slot = self.slot(self.resolve(a))?;
                output = Some(self.runtime[slot]);
            }
            Instruction::Read(a) => {
                let slot = self.slot(self.resolve(a))?;
                self.read(slot, input)?;
            }
            Instruction::LoadA(a) => self.stack.push(self.resolve(a)),

            Instruction::LoadI(o) => {
                let slot = self.indirect(o)?;
                self.stack.push(self.runtime[slot]);
            }
            Instruction::StoreI(o) => {
                self.require(1)?;
                let slot = self.indirect(o)?;
                self.store(slot)?;
            }
            Instruction::WriteI(o) => {
                let slot = self.indirect(o)?;
                output = Some(self.runtime[slot]);
            }
            Instruction::ReadI(o) => {
                let slot = self.indirect(o)?;
                self.read(slot, input)?;
            }

            Instruction::Push => {
                self.require(1)?;
                self.reserve(1)?;
                let value = self.pop()?;
                self.runtime.push(value);
            }

            Instruction::Jmp(n) => self.counter = jump_bias(n),
            Instruction::Jmc(n) => {
                if self.pop()? == 0 {
                    self.counter = jump_bias(n);
                }
            }
            Instruction::Call(n) => {
                self.reserve(2)?;
                self.runtime.push(self.counter.saturating_add(2));
                self.runtime.push(self.reference);
                self.reference = self.runtime.len() as i64;
                self.counter = jump_bias(n);
            }
            Instruction::Init(n) => {
                let count = usize::try_from(n).unwrap_or(0);
                self.reserve(count)?;
                self.runtime.resize(self.runtime.len() + count, 0);
            }
            Instruction::Ret(n) => self.ret(n)?,
        }

        self.counter = advance(self.counter);
        Ok(output)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn status(&self) -> String {
        [
            format!("Counter: {}", self.counter),
            format!("Stack: {:?}", self.stack),
            format!("Runtime stack: {:?}", self.runtime),
            format!("Reference: {}", self.reference),
        ]
        .join("\n")
    }

    fn state(&self, input: &[i64], output: &[i64]) -> String {
        format!(
            "({}, {:?}, {:?}, {}, {:?}, {:?})",
            self.counter, self.stack, self.runtime, self.reference, input, output
        )
    }
}
