use std::process;

use amn_cli::{commands, Cli, Config};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // AMN_LOG controls the log level; default to warnings only.
    let filter = EnvFilter::try_from_env("AMN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::from(cli);
    if let Err(code) = commands::run(&config) {
        process::exit(code);
    }
}
