//! AM1 operands: integers and `(base, offset)` addresses.

use std::fmt;

use amn_common::instruction::parse_integer;
use amn_common::ParseError;

/// Where an address offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    /// Offset is an absolute runtime-stack address.
    Global,
    /// Offset is relative to the reference pointer of the current frame.
    Local,
}

impl Base {
    /// Canonical lowercase name, as written in program text.
    pub fn name(&self) -> &'static str {
        match self {
            Base::Global => "global",
            Base::Local => "local",
        }
    }

    /// `lokal` is accepted as an alias of `local`.
    pub fn from_name(name: &str) -> Option<Base> {
        match name {
            "global" => Some(Base::Global),
            "local" | "lokal" => Some(Base::Local),
            _ => None,
        }
    }
}

/// A runtime-stack address written as `(base, offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub base: Base,
    pub offset: i64,
}

impl Address {
    /// Absolute runtime-stack address `offset`.
    pub fn global(offset: i64) -> Self {
        Self {
            base: Base::Global,
            offset,
        }
    }

    /// Address `offset` slots from the current frame's reference.
    pub fn local(offset: i64) -> Self {
        Self {
            base: Base::Local,
            offset,
        }
    }

    /// Parse the text between the parentheses, e.g. `global, 1`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidPayload {
            token: text.to_string(),
        };
        let (base, offset) = text.split_once(',').ok_or_else(invalid)?;
        let base = Base::from_name(base.trim()).ok_or_else(invalid)?;
        let offset = parse_integer(offset).map_err(|_| invalid())?;
        Ok(Self { base, offset })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.base.name(), self.offset)
    }
}

/// The raw operand text following a mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand<'a> {
    /// Nothing follows the mnemonic.
    Absent,
    /// `NAME text`
    Spaced(&'a str),
    /// `NAME(text)`, holding everything after the opening parenthesis.
    Grouped(&'a str),
}

/// Split a line into its mnemonic and operand.
pub(crate) fn split_operand(line: &str) -> (&str, Operand<'_>) {
    let end = line.find(|c: char| c == ' ' || c == '(').unwrap_or(line.len());
    let (name, rest) = line.split_at(end);

    let operand = if let Some(spaced) = rest.strip_prefix(' ') {
        Operand::Spaced(spaced)
    } else if let Some(grouped) = rest.strip_prefix('(') {
        Operand::Grouped(grouped)
    } else {
        Operand::Absent
    };

    (name, operand)
}

/// The text between the parentheses of a grouped operand.
fn ungroup(text: &str) -> Result<&str, ParseError> {
    text.trim_end()
        .strip_suffix(')')
        .ok_or_else(|| ParseError::InvalidPayload {
            token: text.to_string(),
        })
}

impl Operand<'_> {
    /// An integer operand in either form; absent means 0.
    pub(crate) fn integer(self) -> Result<i64, ParseError> {
        match self {
            Operand::Absent => Ok(0),
            Operand::Spaced(text) => parse_integer(text),
            Operand::Grouped(text) => parse_integer(ungroup(text)?),
        }
    }

    /// A `(base, offset)` operand. The parentheses are required.
    pub(crate) fn address(self) -> Result<Address, ParseError> {
        match self {
            Operand::Grouped(text) => Address::parse(ungroup(text)?),
            Operand::Absent => Err(ParseError::InvalidPayload {
                token: String::new(),
            }),
            Operand::Spaced(text) => Err(ParseError::InvalidPayload {
                token: text.to_string(),
            }),
        }
    }
}
