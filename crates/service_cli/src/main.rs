//! dualdiff - Command Line Front End for Dual-Number Differentiation
//!
//! # Commands
//!
//! - `dualdiff black` - Black forward put price with AD and closed-form Greeks
//! - `dualdiff derive --function <name> --at <x>` - AD derivative of a stock function
//! - `dualdiff check` - Evaluate the dual-number identities on sampled values
//!
//! # Configuration
//!
//! Settings come from `dualdiff.toml` (or `--config`), then the
//! `DUALDIFF_LOG_LEVEL` environment variable, then command line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::derive::{FunctionKind, Order};
use config::{CliConfig, OutputFormat};
pub use error::{CliError, Result};

/// Forward-mode differentiation with dual numbers
#[derive(Parser, Debug)]
#[command(name = "dualdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging unless --log-level is given)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML). Defaults to ./dualdiff.toml if present
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DUALDIFF_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a forward put and compare AD Greeks with closed forms
    Black {
        /// Forward (f)
        #[arg(short, long)]
        forward: Option<f64>,

        /// Total volatility (s)
        #[arg(short = 's', long)]
        volatility: Option<f64>,

        /// Strike (k)
        #[arg(short = 'k', long)]
        strike: Option<f64>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Differentiate a stock function at a point
    Derive {
        /// Function to differentiate
        #[arg(long, value_enum)]
        function: FunctionKind,

        /// Evaluation point
        #[arg(long, allow_negative_numbers = true)]
        at: f64,

        /// Derivative order (1 or 2)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
        order: u8,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check the algebraic identities of dual numbers
    Check {
        /// Relative tolerance, overriding the config file
        #[arg(long)]
        tolerance: Option<f64>,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.merge_with_cli(cli.log_level.as_deref(), cli.verbose)?;

    init_tracing(config.log_level.as_filter_str());
    info!("dualdiff v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration loaded");

    let precision = config.output.precision;

    match cli.command {
        Commands::Black {
            forward,
            volatility,
            strike,
            format,
        } => {
            let request = commands::black::BlackRequest {
                forward: forward.unwrap_or(config.black.forward),
                volatility: volatility.unwrap_or(config.black.volatility),
                strike: strike.unwrap_or(config.black.strike),
            };
            commands::black::run(&request, format.unwrap_or(config.output.format), precision)
        }
        Commands::Derive {
            function,
            at,
            order,
            format,
        } => {
            let order = if order == 2 { Order::Second } else { Order::First };
            commands::derive::run(
                function,
                at,
                order,
                format.unwrap_or(config.output.format),
                precision,
            )
        }
        Commands::Check { tolerance } => {
            config.merge_tolerance(tolerance)?;
            commands::check::run(config.check.tolerance)
        }
    }
}
