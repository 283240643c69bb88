//! Where the shell gets its lines from.

use std::io::{self, BufRead, Write};

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

/// A source of user-entered lines.
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator.
    /// `Ok(None)` means the user is done (end of input).
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<Option<String>>;
}

/// Lines from any buffered reader. The prompt is written to `out`.
pub struct BufferedLines<R> {
    reader: R,
}

impl<R: BufRead> BufferedLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufferedLines<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<Option<String>> {
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Line editor for terminals.
pub struct ReedlineLines {
    editor: Reedline,
}

impl ReedlineLines {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }
}

impl Default for ReedlineLines {
    fn default() -> Self {
        Self::new()
    }
}

/// `"AM0 >> "` becomes `AM0`; reedline draws its own indicator.
fn prompt_label(prompt: &str) -> &str {
    prompt.trim_end_matches([' ', '>', ':'])
}

impl LineSource for ReedlineLines {
    fn read_line(&mut self, prompt: &str, _out: &mut dyn Write) -> io::Result<Option<String>> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(prompt_label(prompt).to_string()),
            DefaultPromptSegment::Empty,
        );
        match self.editor.read_line(&prompt)? {
            Signal::Success(buffer) => Ok(Some(buffer)),
            Signal::CtrlD | Signal::CtrlC => Ok(None),
        }
    }
}
