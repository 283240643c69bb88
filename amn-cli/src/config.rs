//! Command-line arguments and the configuration built from them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AMN - run programs for the AM0 and AM1 abstract machines
#[derive(Parser, Debug)]
#[command(name = "amn", version)]
#[command(about = "Run programs for the AM0 and AM1 abstract machines", long_about = None)]
pub struct Cli {
    /// Instruction set to use (AM0, AM1)
    #[arg(short, long, default_value = "AM0")]
    pub instructions: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Start the interactive shell
    Repl,
    /// Execute a program
    Exec {
        /// File to read instructions from (omit for stdin)
        file: Option<PathBuf>,
    },
    /// Trace the execution of a program on stderr
    Trace {
        /// Input value for the program; repeat or separate with commas.
        /// READ takes the last value first
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        input: Vec<i64>,
        /// File to read instructions from (omit for stdin)
        file: Option<PathBuf>,
    },
}

/// What to run, decided once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instruction-set name as given; the registry ignores case.
    pub instructions: String,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Repl,
    Exec { file: Option<PathBuf> },
    Trace { file: Option<PathBuf>, input: Vec<i64> },
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let command = match cli.command {
            CliCommand::Repl => Command::Repl,
            CliCommand::Exec { file } => Command::Exec { file },
            CliCommand::Trace { input, file } => Command::Trace { file, input },
        };
        Self {
            instructions: cli.instructions,
            command,
        }
    }
}
