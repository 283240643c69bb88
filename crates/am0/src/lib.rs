//! The AM0 abstract machine.
//!
//! AM0 is the smallest teaching machine: an instruction counter, an operand
//! stack and a sparse memory, programmed with eighteen opcodes.
//!
//! ```
//! use amn_am0::{Instruction, Machine};
//! use amn_common::{InstructionSet, Machine as _};
//!
//! let program = Instruction::parse_program("LIT 3\nLIT 4\nADD\nSTORE 0\nWRITE 0").unwrap();
//! let mut machine = Machine::default();
//! let mut input = std::iter::empty::<i64>();
//! let mut outputs = Vec::new();
//! while let Some(instr) = program.fetch(machine.counter()) {
//!     if let Some(value) = machine.execute_instruction(instr, &mut input).unwrap() {
//!         outputs.push(value);
//!     }
//! }
//! assert_eq!(outputs, vec![7]);
//! ```

pub mod arith;
pub mod instruction;
pub mod machine;
pub mod opcode;

pub use arith::BinaryOp;
pub use instruction::Instruction;
pub use machine::Machine;
pub use opcode::Opcode;
