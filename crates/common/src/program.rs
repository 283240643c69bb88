//! Program representation: an immutable, 0-indexed instruction sequence.

use std::fmt;

/// A parsed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program<I> {
    /// The instruction stream.
    pub instructions: Vec<I>,
}

impl<I> Program<I> {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<I>) -> Self {
        Self { instructions }
    }

    /// Fetch the instruction a machine counter points at.
    ///
    /// Returns `None` when the counter is outside `[0, len)`, which is how a
    /// running program halts.
    pub fn fetch(&self, counter: i64) -> Option<&I> {
        usize::try_from(counter)
            .ok()
            .and_then(|index| self.instructions.get(index))
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Canonical text: one instruction per line.
impl<I: fmt::Display> fmt::Display for Program<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}
