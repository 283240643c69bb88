//! The instruction-set contract.
//!
//! An instruction set is a closed family of opcodes that can parse itself from
//! one line of program text. Whole programs are parsed line by line with
//! [`InstructionSet::parse_program`], which every set gets for free.

use std::fmt;

use crate::error::{ParseError, ProgramError};
use crate::program::Program;

/// A closed set of instructions with a line-based text form.
pub trait InstructionSet: Sized + Copy + PartialEq + fmt::Debug + fmt::Display {
    /// Registry name of the set, e.g. `"AM0"`.
    const NAME: &'static str;

    /// Parse one instruction line.
    ///
    /// The opcode name is matched exactly (case-sensitive).
    fn parse(line: &str) -> Result<Self, ParseError>;

    /// True for instructions that may transfer control non-sequentially.
    fn is_jump(&self) -> bool;

    /// True for instructions whose operand is meaningful.
    fn has_payload(&self) -> bool;

    /// Parse a whole program.
    ///
    /// Empty and whitespace-only lines are skipped. The first failing line
    /// aborts parsing; its 1-based number is carried in the error.
    fn parse_program(source: &str) -> Result<Program<Self>, ProgramError> {
        let mut instructions = Vec::new();

        for (idx, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let instruction = Self::parse(line).map_err(|source| ProgramError {
                line: idx + 1,
                source,
            })?;
            instructions.push(instruction);
        }

        Ok(Program::new(instructions))
    }
}

/// Split `"NAME payload"` on the first space.
///
/// Returns the name and, if a space was present, the remainder.
pub fn split_instruction(line: &str) -> (&str, Option<&str>) {
    match line.split_once(' ') {
        Some((name, rest)) => (name, Some(rest)),
        None => (line, None),
    }
}

/// Parse a signed base-10 integer operand, ignoring surrounding whitespace.
pub fn parse_integer(token: &str) -> Result<i64, ParseError> {
    token
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidPayload {
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-instruction set used to exercise the provided methods.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Toy {
        Nop,
        Go(i64),
    }

    impl fmt::Display for Toy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Toy::Nop => write!(f, "NOP"),
                Toy::Go(n) => write!(f, "GO {n}"),
            }
        }
    }

    impl InstructionSet for Toy {
        const NAME: &'static str = "TOY";

        fn parse(line: &str) -> Result<Self, ParseError> {
            match split_instruction(line) {
                ("NOP", _) => Ok(Toy::Nop),
                ("GO", Some(payload)) => parse_integer(payload).map(Toy::Go),
                ("GO", None) => Ok(Toy::Go(0)),
                (name, _) => Err(ParseError::UnknownInstruction {
                    token: name.to_string(),
                }),
            }
        }

        fn is_jump(&self) -> bool {
            matches!(self, Toy::Go(_))
        }

        fn has_payload(&self) -> bool {
            matches!(self, Toy::Go(_))
        }
    }

    #[test]
    fn split_without_space() {
        assert_eq!(split_instruction("ADD"), ("ADD", None));
    }

    #[test]
    fn split_on_first_space_only() {
        assert_eq!(split_instruction("LIT 1 2"), ("LIT", Some("1 2")));
    }

    #[test]
    fn parse_integer_accepts_sign_and_padding() {
        assert_eq!(parse_integer("-7"), Ok(-7));
        assert_eq!(parse_integer("+7"), Ok(7));
        assert_eq!(parse_integer(" 12 "), Ok(12));
    }

    #[test]
    fn parse_integer_rejects_garbage() {
        assert_eq!(
            parse_integer("1x"),
            Err(ParseError::InvalidPayload {
                token: "1x".to_string()
            })
        );
        assert!(parse_integer("").is_err());
    }

    #[test]
    fn parse_program_skips_blank_lines() {
        let program = Toy::parse_program("NOP\n\n   \nGO 3\n").unwrap();
        assert_eq!(program.instructions, vec![Toy::Nop, Toy::Go(3)]);
    }

    #[test]
    fn parse_program_reports_one_based_line() {
        let err = Toy::parse_program("NOP\n\nFOO\nNOP").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(
            err.source,
            ParseError::UnknownInstruction {
                token: "FOO".to_string()
            }
        );
    }

    #[test]
    fn parse_program_stops_at_first_error() {
        let err = Toy::parse_program("GO x\nFOO").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.source, ParseError::InvalidPayload { .. }));
    }

    #[test]
    fn parse_program_accepts_crlf() {
        let program = Toy::parse_program("NOP\r\nGO 2\r\n").unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn empty_source_is_empty_program() {
        assert!(Toy::parse_program("").unwrap().is_empty());
    }
}
