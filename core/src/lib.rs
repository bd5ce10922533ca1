//! Core functionality for `sw`
//!
//! This crate contains the parent process resolver, the on-disk stopwatch
//! keyed by it, and the configuration shared with the CLI.

pub mod config;
pub mod error;
pub mod process;
pub mod stopwatch;

pub use config::Config;
pub use error::{CoreError, Result};
pub use process::{get_parent_process_id, parent_process_id, ProcessId, INVALID_PROCESS_ID};
pub use stopwatch::{now_nanos, Stopwatch, Time};

/// Core utilities and helper functions
pub mod utils {
    use crate::config::{DEFAULT_LOG_LEVEL, LOG_ENV};
    use tracing::debug;

    /// Initialize tracing for the application
    ///
    /// The filter comes from `SW_LOG`, then `RUST_LOG`, then `level`. Output goes
    /// to stderr so it never mixes with results printed on stdout.
    pub fn init_tracing(level: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| crate::CoreError::InitializationError(e.to_string()))?;

        debug!("Tracing initialized with default level: {}", level);
        Ok(())
    }

    /// Initialize tracing with the default `warn` level
    pub fn init_default_tracing() -> crate::Result<()> {
        init_tracing(DEFAULT_LOG_LEVEL)
    }
}
