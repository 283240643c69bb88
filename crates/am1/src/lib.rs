//! The AM1 abstract machine.
//!
//! AM1 extends AM0 with procedures. Memory becomes a runtime stack addressed
//! from 1, operands name a `global` or `local` base, and a reference pointer
//! marks the current procedure frame.
//!
//! ```
//! use amn_am1::{Instruction, Machine};
//! use amn_common::{InstructionSet, Machine as _};
//!
//! let program = Instruction::parse_program("INIT 1\nLIT 6\nSTORE(global,1)\nWRITE(global,1)").unwrap();
//! let mut machine = Machine::default();
//! let mut input = std::iter::empty::<i64>();
//! let mut outputs = Vec::new();
//! while let Some(instr) = program.fetch(machine.counter()) {
//!     outputs.extend(machine.execute_instruction(instr, &mut input).unwrap());
//! }
//! assert_eq!(outputs, vec![6]);
//! ```

pub mod instruction;
pub mod machine;
pub mod operand;

pub use instruction::Instruction;
pub use machine::{Machine, MAX_RUNTIME_STACK};
pub use operand::{Address, Base};
