//! The interactive shell.
//!
//! ```text
//! exec <instruction>   run one instruction on the current state
//! reset                back to the initial state
//! status               dump the machine state
//! help                 list commands
//! exit                 leave (end of input does the same)
//! ```

use std::io::{self, Write};

use amn_vm::Session;
use tracing::debug;

use crate::input::PromptedInput;
use crate::lines::LineSource;

const HELP: &str = "\
Commands:
  exec <instruction>  execute one instruction
  reset               reset the machine
  status              print the machine state
  help                show this message
  exit                leave the shell";

pub struct Shell<'a, W: Write> {
    session: &'a mut dyn Session,
    lines: &'a mut dyn LineSource,
    out: W,
    prompt: String,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(session: &'a mut dyn Session, lines: &'a mut dyn LineSource, out: W) -> Self {
        let prompt = format!("{} >> ", session.name());
        Self {
            session,
            lines,
            out,
            prompt,
        }
    }

    /// Read and handle commands until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Welcome to the {} REPL, type 'help' for help",
            self.session.name()
        )?;

        while let Some(line) = self.lines.read_line(&self.prompt, &mut self.out)? {
            if !self.handle(line.trim())? {
                return Ok(());
            }
        }

        writeln!(self.out)?;
        self.exit()
    }

    /// Handle one command line. Returns false when the shell should stop.
    fn handle(&mut self, line: &str) -> io::Result<bool> {
        if line.is_empty() {
            return Ok(true);
        }

        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        debug!(command, arg, "shell command");
        match command {
            "exec" => self.exec(arg)?,
            "reset" => self.session.reset(),
            "status" => writeln!(self.out, "{}", self.session.status())?,
            "help" | "?" => writeln!(self.out, "{HELP}")?,
            "exit" => {
                self.exit()?;
                return Ok(false);
            }
            _ => writeln!(self.out, "*** Unknown command: {line}")?,
        }
        Ok(true)
    }

    fn exec(&mut self, arg: &str) -> io::Result<()> {
        let result = {
            let mut input = PromptedInput::new(&mut *self.lines, &mut self.out);
            self.session.execute_line(arg, &mut input)
        };
        match result {
            Ok(Some(value)) => writeln!(self.out, "Output: {value}"),
            Ok(None) => Ok(()),
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    fn exit(&mut self) -> io::Result<()> {
        writeln!(self.out, "Exiting REPL...")
    }
}
