//! AM0 instructions and their text form.
//!
//! ```text
//! OPCODE           payload defaults to 0
//! OPCODE INTEGER   optionally signed, base 10
//! ```

use std::fmt;

use amn_common::instruction::{parse_integer, split_instruction};
use amn_common::{InstructionSet, ParseError};

use crate::opcode::Opcode;

/// A single AM0 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Address, literal or jump target. 0 for opcodes that take none.
    pub payload: i64,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, payload: i64) -> Self {
        Self { opcode, payload }
    }

    /// Create an instruction that takes no payload.
    pub fn bare(opcode: Opcode) -> Self {
        Self { opcode, payload: 0 }
    }
}

impl InstructionSet for Instruction {
    const NAME: &'static str = "AM0";

    fn parse(line: &str) -> Result<Self, ParseError> {
        let (name, payload) = split_instruction(line);
        let opcode = Opcode::from_mnemonic(name).ok_or_else(|| ParseError::UnknownInstruction {
            token: name.to_string(),
        })?;

        let payload = match payload {
            Some(text) => parse_integer(text)?,
            None => 0,
        };

        // Bare opcodes accept a payload but keep 0.
        Ok(Self {
            opcode,
            payload: if opcode.has_payload() { payload } else { 0 },
        })
    }

    fn is_jump(&self) -> bool {
        self.opcode.is_jump()
    }

    fn has_payload(&self) -> bool {
        self.opcode.has_payload()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_payload() {
            write!(f, "{} {}", self.opcode.mnemonic(), self.payload)
        } else {
            f.write_str(self.opcode.mnemonic())
        }
    }
}
