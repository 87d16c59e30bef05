//! CLI error types
//!
//! Every failure a command can report, with conversions from the library
//! and configuration errors it wraps.

use dual_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `dualdiff`
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] AnalyticalError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{failed} of {total} identities exceeded the tolerance")]
    CheckFailed { failed: usize, total: usize },
}

/// Result alias used by all commands
pub type Result<T> = std::result::Result<T, CliError>;
