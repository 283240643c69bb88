//! AMN command-line front end: batch runner, step tracer and interactive shell.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input or parse error
//! - 2: Unknown instruction set
//! - 3: Runtime error

pub mod commands;
pub mod config;
pub mod input;
pub mod lines;
pub mod shell;

pub use config::{Cli, Command, Config};
