//! CLI command implementations.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use amn_vm::{Registry, Session, SessionError};
use tracing::debug;

use crate::config::{Command, Config};
use crate::input::PromptedInput;
use crate::lines::{BufferedLines, ReedlineLines};
use crate::shell::Shell;

/// Select the instruction set and run the configured command.
pub fn run(config: &Config) -> Result<(), i32> {
    let registry = Registry::builtin();
    let mut session = registry.create(&config.instructions).map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;
    debug!(set = session.name(), command = ?config.command, "starting");

    match &config.command {
        Command::Repl => repl(session.as_mut()),
        Command::Exec { file } => exec(session.as_mut(), file.as_deref()),
        Command::Trace { file, input } => trace(session.as_mut(), file.as_deref(), input.clone()),
    }
}

/// Interactive shell on stdin/stdout.
pub fn repl(session: &mut dyn Session) -> Result<(), i32> {
    let stdout = io::stdout();
    let result = if atty::is(atty::Stream::Stdin) {
        let mut lines = ReedlineLines::new();
        Shell::new(session, &mut lines, stdout.lock()).run()
    } else {
        let mut lines = BufferedLines::new(io::stdin().lock());
        Shell::new(session, &mut lines, stdout.lock()).run()
    };

    result.map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Run a whole program, prompting for input on stdin.
pub fn exec(session: &mut dyn Session, file: Option<&Path>) -> Result<(), i32> {
    let source = read_source(file)?;

    let mut lines = BufferedLines::new(io::stdin().lock());
    let mut prompt_out = io::stdout();
    let mut input = PromptedInput::new(&mut lines, &mut prompt_out);

    session
        .run(&source, &mut input, &mut |value| println!("Output: {value}"))
        .map_err(report)
}

/// Run a whole program with fixed inputs, writing snapshots to stderr.
pub fn trace(session: &mut dyn Session, file: Option<&Path>, input: Vec<i64>) -> Result<(), i32> {
    let source = read_source(file)?;
    let stderr = io::stderr();
    session
        .trace(&source, input, &mut stderr.lock())
        .map(drop)
        .map_err(report)
}

/// Program text from `file`, or all of stdin when absent.
fn read_source(file: Option<&Path>) -> Result<String, i32> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: cannot read '{}': {e}", path.display());
            1
        }),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).map_err(|e| {
                eprintln!("error: cannot read stdin: {e}");
                1
            })?;
            Ok(source)
        }
    }
}

/// Print a session error and pick the exit code for it.
fn report(err: SessionError) -> i32 {
    match err {
        SessionError::Runtime(e) => {
            eprintln!("runtime error: {e}");
            3
        }
        SessionError::Parse(_) | SessionError::Program(_) | SessionError::Io(_) => {
            eprintln!("error: {err}");
            1
        }
    }
}
