//! Test utilities for CLI crate integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the `sw` binary as a child of the test process with an isolated data dir.
///
/// # Panics
///
/// Panics if the binary cannot be spawned.
pub fn run_sw(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sw"))
        .args(args)
        .env("SW_DATA_DIR", data_dir)
        .env_remove("SW_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn sw")
}

/// Stdout of a successful run, trimmed.
///
/// # Panics
///
/// Panics if the run failed.
pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "sw failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
