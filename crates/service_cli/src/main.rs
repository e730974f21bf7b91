//! Optiscope CLI - option valuation and P&L scenarios from the terminal
//!
//! # Commands
//!
//! - `optiscope price` - Fair value and Greeks of one contract
//! - `optiscope sweep-price` - P&L across underlying prices
//! - `optiscope sweep-time` - P&L as expiry approaches
//! - `optiscope heatmap` - P&L over prices and days to expiry
//! - `optiscope payoff` - Breakeven and P&L extremes at expiry
//! - `optiscope check` - Show configuration and verify the pricing kernel
//!
//! # Architecture
//!
//! The service layer on top of `pricer_core` (types and math),
//! `pricer_models` (Black-Scholes and positions) and `pricer_risk`
//! (scenario simulation). Logs go to stderr so results on stdout can be
//! piped as JSON or CSV.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::payoff::PayoffArgs;
use commands::{ContractArgs, PositionArgs};
use config::{build_config, CliArgs, LogLevel};
pub use error::{CliError, Result};

/// Option pricing and P&L scenario CLI
#[derive(Parser)]
#[command(name = "optiscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "OPTISCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Annualised risk-free rate (decimal)
    #[arg(long, global = true)]
    rate: Option<f64>,

    /// Annualised dividend yield (decimal)
    #[arg(long, global = true)]
    dividend_yield: Option<f64>,

    /// Units per contract
    #[arg(long, global = true)]
    multiplier: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a contract and report its Greeks
    Price {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Simulate P&L across underlying prices at today's days to expiry
    SweepPrice {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        position: PositionArgs,

        /// Half-width of the sweep as a fraction of spot (e.g. 0.5)
        #[arg(long)]
        range: Option<f64>,
    },

    /// Simulate P&L as expiry approaches at the current spot
    SweepTime {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// Build a P&L heat map over prices and days to expiry
    Heatmap {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        position: PositionArgs,

        /// Listed strikes used as rows (comma separated)
        #[arg(long, value_delimiter = ',')]
        strikes: Vec<f64>,

        /// Row band around spot, in percent
        #[arg(long)]
        otm: Option<f64>,
    },

    /// Breakeven and P&L extremes of a long option at expiry
    Payoff {
        #[command(flatten)]
        terms: PayoffArgs,
    },

    /// Check configuration and the pricing kernel
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let (price_range, otm_percentage) = match &self.command {
            Commands::SweepPrice { range, .. } => (*range, None),
            Commands::Heatmap { otm, .. } => (None, *otm),
            _ => (None, None),
        };

        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            risk_free_rate: self.rate,
            dividend_yield: self.dividend_yield,
            multiplier: self.multiplier,
            price_range,
            otm_percentage,
            output_format: self.format.clone(),
        }
    }
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    let level = if cli.verbose {
        config.log_level.min(LogLevel::Info)
    } else {
        config.log_level
    };
    init_tracing(level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!("Configuration loaded:");
    info!("  Risk-free rate: {}", config.risk_free_rate);
    info!("  Dividend yield: {}", config.dividend_yield);
    info!("  Multiplier: {}", config.multiplier);
    info!("  Output format: {}", config.output_format);

    match &cli.command {
        Commands::Price { contract } => commands::price::run(contract, &config),
        Commands::SweepPrice {
            contract, position, ..
        } => commands::sweep_price::run(contract, position, &config),
        Commands::SweepTime { contract, position } => {
            commands::sweep_time::run(contract, position, &config)
        }
        Commands::Heatmap {
            contract,
            position,
            strikes,
            ..
        } => commands::heatmap::run(contract, position, strikes, &config),
        Commands::Payoff { terms } => commands::payoff::run(terms, &config),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_heatmap_strikes() {
        let cli = Cli::try_parse_from([
            "optiscope", "heatmap", "--spot", "100", "--strike", "100", "--vol", "0.3",
            "--days", "30", "--premium", "3", "--strikes", "90,95,100", "--otm", "5",
        ])
        .unwrap();

        let args = cli.config_args();
        assert_eq!(args.otm_percentage, Some(5.0));
        match cli.command {
            Commands::Heatmap { strikes, .. } => assert_eq!(strikes, vec![90.0, 95.0, 100.0]),
            _ => panic!("expected heatmap"),
        }
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "optiscope", "sweep-price", "-s", "100", "-k", "105", "--vol", "0.25",
            "--type", "put", "-d", "45", "-p", "2.5", "--range", "0.3",
            "--format", "json", "--rate", "0.01",
        ])
        .unwrap();

        let args = cli.config_args();
        assert_eq!(args.price_range, Some(0.3));
        assert_eq!(args.output_format.as_deref(), Some("json"));
        assert_eq!(args.risk_free_rate, Some(0.01));
    }

    #[test]
    fn test_days_and_expiry_conflict() {
        let result = Cli::try_parse_from([
            "optiscope", "price", "-s", "100", "-k", "100", "--vol", "0.2",
            "-d", "30", "--expiry", "2030-01-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_option_type_rejected() {
        let result = Cli::try_parse_from([
            "optiscope", "payoff", "-k", "100", "-p", "5", "--type", "straddle",
        ]);
        assert!(result.is_err());
    }
}
