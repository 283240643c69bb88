//! AM1 instructions and their text form.
//!
//! ```text
//! ADD … GE, PUSH           no operand
//! LIT n, JMP n, JMC n      integer (also accepted as NAME(n))
//! CALL n, INIT n, RET n
//! LOAD(b,o)  STORE(b,o)    b is global or local (alias lokal)
//! WRITE(b,o) READ(b,o)
//! LOADA(b,o)
//! LOADI(o)   STOREI(o)     indirect through the local slot o
//! WRITEI(o)  READI(o)
//! ```

use std::fmt;

use amn_am0::BinaryOp;
use amn_common::{InstructionSet, ParseError};

use crate::operand::{split_operand, Address};

/// A single AM1 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// One of the eleven AM0 binary operators.
    Operator(BinaryOp),
    /// Push a literal onto the operand stack.
    Lit(i64),

    Load(Address),
    Store(Address),
    Write(Address),
    Read(Address),
    /// Push the resolved address itself.
    LoadA(Address),

    LoadI(i64),
    StoreI(i64),
    WriteI(i64),
    ReadI(i64),

    /// Move the top of the operand stack onto the runtime stack.
    Push,

    Jmp(i64),
    Jmc(i64),
    /// Push the return instruction and reference pointer, then jump.
    Call(i64),
    /// Reserve slots on the runtime stack.
    Init(i64),
    /// Return from a procedure with this many parameters.
    Ret(i64),
}

impl Instruction {
    /// Returns the assembly mnemonic for this instruction.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Operator(op) => op.mnemonic(),
            Instruction::Lit(_) => "LIT",
            Instruction::Load(_) => "LOAD",
            Instruction::Store(_) => "STORE",
            Instruction::Write(_) => "WRITE",
            Instruction::Read(_) => "READ",
            Instruction::LoadA(_) => "LOADA",
            Instruction::LoadI(_) => "LOADI",
            Instruction::StoreI(_) => "STOREI",
            Instruction::WriteI(_) => "WRITEI",
            Instruction::ReadI(_) => "READI",
            Instruction::Push => "PUSH",
            Instruction::Jmp(_) => "JMP",
            Instruction::Jmc(_) => "JMC",
            Instruction::Call(_) => "CALL",
            Instruction::Init(_) => "INIT",
            Instruction::Ret(_) => "RET",
        }
    }
}

impl InstructionSet for Instruction {
    const NAME: &'static str = "AM1";

    fn parse(line: &str) -> Result<Self, ParseError> {
        let (name, operand) = split_operand(line);

        if let Some(op) = BinaryOp::from_mnemonic(name) {
            // Like AM0, a bare instruction ignores a well-formed payload.
            operand.integer()?;
            return Ok(Instruction::Operator(op));
        }

        let instr = match name {
            "LIT" => Instruction::Lit(operand.integer()?),
            "LOAD" => Instruction::Load(operand.address()?),
            "STORE" => Instruction::Store(operand.address()?),
            "WRITE" => Instruction::Write(operand.address()?),
            "READ" => Instruction::Read(operand.address()?),
            "LOADA" => Instruction::LoadA(operand.address()?),
            "LOADI" => Instruction::LoadI(operand.integer()?),
            "STOREI" => Instruction::StoreI(operand.integer()?),
            "WRITEI" => Instruction::WriteI(operand.integer()?),
            "READI" => Instruction::ReadI(operand.integer()?),
            "PUSH" => {
                operand.integer()?;
                Instruction::Push
            }
            "JMP" => Instruction::Jmp(operand.integer()?),
            "JMC" => Instruction::Jmc(operand.integer()?),
            "CALL" => Instruction::Call(operand.integer()?),
            "INIT" => Instruction::Init(operand.integer()?),
            "RET" => Instruction::Ret(operand.integer()?),
            _ => {
                return Err(ParseError::UnknownInstruction {
                    token: name.to_string(),
                })
            }
        };

        Ok(instr)
    }

    fn is_jump(&self) -> bool {
        matches!(
            self,
            Instruction::Jmp(_) | Instruction::Jmc(_) | Instruction::Call(_) | Instruction::Ret(_)
        )
    }

    fn has_payload(&self) -> bool {
        !matches!(self, Instruction::Operator(_) | Instruction::Push)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match self {
            Instruction::Operator(_) | Instruction::Push => f.write_str(m),
            Instruction::Load(a)
            | Instruction::Store(a)
            | Instruction::Write(a)
            | Instruction::Read(a)
            | Instruction::LoadA(a) => write!(f, "{m}({a})"),
            Instruction::LoadI(o)
            | Instruction::StoreI(o)
            | Instruction::WriteI(o)
            | Instruction::ReadI(o) => write!(f, "{m}({o})"),
            Instruction::Lit(n)
            | Instruction::Jmp(n)
            | Instruction::Jmc(n)
            | Instruction::Call(n)
            | Instruction::Init(n)
            | Instruction::Ret(n) => write!(f, "{m} {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Base;

    #[test]
    fn parse_operator() {
        assert_eq!(
            Instruction::parse("MOD"),
            Ok(Instruction::Operator(BinaryOp::Mod))
        );
    }

    #[test]
    fn parse_addressed() {
        assert_eq!(
            Instruction::parse("LOAD(lokal,-2)"),
            Ok(Instruction::Load(Address::local(-2)))
        );
        assert_eq!(
            Instruction::parse("STORE(global, 1)"),
            Ok(Instruction::Store(Address::global(1)))
        );
    }

    #[test]
    fn parse_integer_forms() {
        assert_eq!(Instruction::parse("CALL 7"), Ok(Instruction::Call(7)));
        assert_eq!(Instruction::parse("INIT(2)"), Ok(Instruction::Init(2)));
        assert_eq!(Instruction::parse("RET"), Ok(Instruction::Ret(0)));
        assert_eq!(Instruction::parse("LOADI(-3)"), Ok(Instruction::LoadI(-3)));
    }

    #[test]
    fn parse_push() {
        assert_eq!(Instruction::parse("PUSH"), Ok(Instruction::Push));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            Instruction::parse("LOADX(global,1)"),
            Err(ParseError::UnknownInstruction {
                token: "LOADX".to_string()
            })
        );
        assert!(matches!(
            Instruction::parse("push"),
            Err(ParseError::UnknownInstruction { .. })
        ));
    }

    #[test]
    fn unknown_name_reported_before_operand() {
        assert!(matches!(
            Instruction::parse("FOO(global"),
            Err(ParseError::UnknownInstruction { .. })
        ));
    }

    #[test]
    fn parse_address_required() {
        assert!(matches!(
            Instruction::parse("LOAD 1"),
            Err(ParseError::InvalidPayload { .. })
        ));
        assert!(matches!(
            Instruction::parse("WRITE(heap,1)"),
            Err(ParseError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn classification() {
        assert!(Instruction::Call(3).is_jump());
        assert!(Instruction::Ret(0).is_jump());
        assert!(!Instruction::Push.is_jump());
        assert!(!Instruction::Push.has_payload());
        assert!(!Instruction::Operator(BinaryOp::Add).has_payload());
        assert!(Instruction::Init(0).has_payload());
    }

    #[test]
    fn display_roundtrips() {
        let samples = [
            Instruction::Operator(BinaryOp::Ge),
            Instruction::Lit(-5),
            Instruction::Load(Address::global(1)),
            Instruction::Store(Address::local(-2)),
            Instruction::Write(Address::local(1)),
            Instruction::Read(Address::global(2)),
            Instruction::LoadA(Address::local(3)),
            Instruction::LoadI(-2),
            Instruction::StoreI(-3),
            Instruction::WriteI(1),
            Instruction::ReadI(2),
            Instruction::Push,
            Instruction::Jmp(0),
            Instruction::Jmc(4),
            Instruction::Call(9),
            Instruction::Init(2),
            Instruction::Ret(1),
        ];
        for instr in samples {
            assert_eq!(Instruction::parse(&instr.to_string()), Ok(instr), "{instr}");
        }
    }

    #[test]
    fn canonical_base_is_local() {
        let instr = Instruction::parse("LOAD(lokal,1)").unwrap();
        assert_eq!(instr.to_string(), "LOAD(local,1)");
        assert!(matches!(
            instr,
            Instruction::Load(Address {
                base: Base::Local,
                ..
            })
        ));
    }
}
