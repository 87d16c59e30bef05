//! CLI configuration management
//!
//! Loads `dualdiff.toml`, then applies environment and command line
//! overrides.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Config file read when `--config` is not given. Absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "dualdiff.toml";

/// Largest useful number of decimals for an `f64`.
const MAX_PRECISION: usize = 17;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid precision: {0}. Must be at most 17")]
    InvalidPrecision(usize),

    #[error("Invalid tolerance: {0}. Must be positive and finite")]
    InvalidTolerance(f64),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted in the config file and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,
    /// Decimals printed in tables
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 6,
        }
    }
}

/// `[black]` section: defaults for the `black` command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlackConfig {
    /// Forward (f)
    pub forward: f64,
    /// Total volatility (s)
    pub volatility: f64,
    /// Strike (k)
    pub strike: f64,
}

impl Default for BlackConfig {
    fn default() -> Self {
        Self {
            forward: 100.0,
            volatility: 0.1,
            strike: 100.0,
        }
    }
}

/// `[check]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Largest accepted relative error for an identity
    pub tolerance: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { tolerance: 1e-12 }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Output settings
    pub output: OutputConfig,
    /// Black command defaults
    pub black: BlackConfig,
    /// Check command settings
    pub check: CheckConfig,
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load an explicitly requested file, or the default file if present.
    ///
    /// An explicit path must exist; the default path falls back to
    /// built-in defaults when missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.output.precision));
        }

        validate_tolerance(self.check.tolerance)?;

        Ok(())
    }

    /// Override the check tolerance with a command line value, applying
    /// the same rule as the config file.
    pub fn merge_tolerance(&mut self, tolerance: Option<f64>) -> Result<(), ConfigError> {
        if let Some(tol) = tolerance {
            validate_tolerance(tol)?;
            self.check.tolerance = tol;
        }
        Ok(())
    }

    /// Merge command line values (already combined with the environment
    /// by clap). An explicit level wins over `--verbose`.
    pub fn merge_with_cli(
        &mut self,
        log_level: Option<&str>,
        verbose: bool,
    ) -> Result<(), ConfigError> {
        match log_level {
            Some(level) => self.log_level = LogLevel::from_str(level)?,
            None if verbose => self.log_level = LogLevel::Debug,
            None => {}
        }
        Ok(())
    }
}

fn validate_tolerance(tol: f64) -> Result<(), ConfigError> {
    if tol.is_finite() && tol > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance(tol))
    }
}
