//! AMN execution engine.
//!
//! Everything here is written once against the [`amn_common::Machine`] and
//! [`amn_common::InstructionSet`] traits:
//!
//! - [`execute_program`] runs a parsed program lazily, one output at a time
//! - [`trace_program`] runs it while writing a snapshot per instruction
//! - [`Session`] and [`Registry`] select a machine by name at runtime
//!
//! # Usage
//!
//! ```
//! use amn_am0::{Instruction, Machine};
//! use amn_common::InstructionSet;
//! use amn_vm::execute_program;
//!
//! let program = Instruction::parse_program("READ 0\nLOAD 0\nLIT 2\nMUL\nSTORE 1\nWRITE 1").unwrap();
//! let mut machine = Machine::default();
//! let outputs: Result<Vec<i64>, _> = execute_program(&mut machine, &program, vec![21]).collect();
//! assert_eq!(outputs, Ok(vec![42]));
//! ```

pub mod error;
pub mod execute;
pub mod registry;
pub mod session;
pub mod trace;

pub use error::{RegistryError, SessionError};
pub use execute::{execute_program, Execution};
pub use registry::Registry;
pub use session::{Engine, Session};
pub use trace::{trace_program, TraceInput};
