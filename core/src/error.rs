//! Core error types and utilities

use thiserror::Error;

/// Core-specific error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Stopwatch already running")]
    AlreadyRunning,

    #[error("No running stopwatch")]
    NotRunning,

    #[error("Invalid label {0}")]
    InvalidLabel(String),

    #[error("Corrupt stopwatch file: {0}")]
    CorruptStore(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CoreError {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::AlreadyRunning => "CORE001",
            CoreError::NotRunning => "CORE002",
            CoreError::InvalidLabel(_) => "CORE003",
            CoreError::CorruptStore(_) => "CORE004",
            CoreError::ConfigurationError(_) => "CORE005",
            CoreError::InitializationError(_) => "CORE006",
            CoreError::IoError(_) => "CORE007",
        }
    }
}

/// Core-specific result type
pub type Result<T> = std::result::Result<T, CoreError>;
