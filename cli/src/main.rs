//! `sw` binary
//!
//! Records elapsed times for the shell that runs it.

use clap::Parser;
use cli::{emit, run, Cli, Result};
use std::process::ExitCode;
use sw_core::{now_nanos, utils, Stopwatch};

fn execute(cli: &Cli, now: u64) -> Result<()> {
    let config = cli.config()?;
    config.ensure_data_dir()?;
    let stopwatch = Stopwatch::for_parent(&config);

    if let Some(text) = run(&stopwatch, cli.command.as_ref(), now)? {
        emit(&text, cli.stdout)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // Read the clock before anything else so startup cost is not timed
    let now = now_nanos();

    if let Err(e) = utils::init_default_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    match execute(&cli, now) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let program = std::env::args().next().unwrap_or_else(|| "sw".to_string());
            eprintln!("{}: {}", program, e);
            ExitCode::FAILURE
        }
    }
}
