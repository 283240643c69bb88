//! Interactive input for READ instructions.

use std::io::Write;

use tracing::warn;

use crate::lines::LineSource;

pub const INPUT_PROMPT: &str = "Input: ";

/// Prompts for one integer each time the machine reads.
///
/// Text that is not an integer is reported and asked for again. End of input
/// (or a failing terminal) ends the iterator, which the machine reports as
/// exhausted input.
pub struct PromptedInput<'a> {
    lines: &'a mut dyn LineSource,
    out: &'a mut dyn Write,
}

impl<'a> PromptedInput<'a> {
    pub fn new(lines: &'a mut dyn LineSource, out: &'a mut dyn Write) -> Self {
        Self { lines, out }
    }
}

impl Iterator for PromptedInput<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            let line = match self.lines.read_line(INPUT_PROMPT, &mut *self.out) {
                Ok(line) => line?,
                Err(err) => {
                    warn!(error = %err, "reading input failed");
                    return None;
                }
            };
            match line.trim().parse() {
                Ok(value) => return Some(value),
                Err(_) => {
                    if writeln!(self.out, "Error: invalid input '{}'", line.trim()).is_err() {
                        return None;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::BufferedLines;

    #[test]
    fn reprompts_until_integer() {
        let mut lines = BufferedLines::new(&b"seven\n 7 \n-2\n"[..]);
        let mut out = Vec::new();
        let values: Vec<i64> = PromptedInput::new(&mut lines, &mut out).collect();
        assert_eq!(values, vec![7, -2]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Input: Error: invalid input 'seven'\nInput: Input: Input: "
        );
    }

    #[test]
    fn end_of_input_is_exhausted() {
        let mut lines = BufferedLines::new(&b""[..]);
        let mut out = Vec::new();
        assert_eq!(PromptedInput::new(&mut lines, &mut out).next(), None);
    }
}
