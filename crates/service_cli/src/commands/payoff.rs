//! Payoff command implementation
//!
//! Breakeven and P&L extremes of a long option held to expiry. No model
//! inputs are needed.

use std::io::{self, Write};

use clap::Args;
use pricer_core::types::OptionType;
use pricer_models::instruments::InstrumentError;
use pricer_risk::metrics::PayoffProfile;
use serde::Serialize;
use tracing::info;

use super::output::{money, write_csv, write_json, Table};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Contract terms and size for the payoff command
#[derive(Debug, Clone, Args)]
pub struct PayoffArgs {
    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Option type (call or put)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Premium paid per share
    #[arg(short, long)]
    pub premium: f64,

    /// Number of contracts
    #[arg(short = 'n', long, default_value_t = 1)]
    pub contracts: u32,
}

/// Payoff metrics in dollars
///
/// `max_profit` is `None` when the upside is unbounded, which JSON cannot
/// represent as a number.
#[derive(Debug, Clone, Serialize)]
pub struct PayoffReport {
    pub option_type: OptionType,
    pub strike: f64,
    pub premium: f64,
    pub contracts: u32,
    pub multiplier: f64,
    pub breakeven: f64,
    pub max_profit: Option<f64>,
    pub max_loss: f64,
    pub unlimited_profit: bool,
}

/// Computes the payoff metrics for `args`.
pub fn evaluate(args: &PayoffArgs, config: &CliConfig) -> Result<PayoffReport> {
    if !(args.strike.is_finite() && args.strike > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "strike must be positive, got {}",
            args.strike
        )));
    }
    if !(args.premium.is_finite() && args.premium > 0.0) {
        return Err(InstrumentError::InvalidPremium {
            premium: args.premium,
        }
        .into());
    }
    if args.contracts == 0 {
        return Err(InstrumentError::InvalidContracts { count: 0 }.into());
    }

    let scale = config.multiplier * args.contracts as f64;
    let profile = PayoffProfile::new(args.strike, args.premium, args.option_type, scale);

    Ok(PayoffReport {
        option_type: args.option_type,
        strike: args.strike,
        premium: args.premium,
        contracts: args.contracts,
        multiplier: config.multiplier,
        breakeven: profile.breakeven,
        max_profit: (!profile.has_unlimited_profit()).then_some(profile.max_profit),
        max_loss: profile.max_loss,
        unlimited_profit: profile.has_unlimited_profit(),
    })
}

/// Writes `report` in the requested format.
pub fn render<W: Write>(report: &PayoffReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv(out, [report]),
        OutputFormat::Table => {
            let max_profit = match report.max_profit {
                Some(value) => money(value),
                None => "unlimited".to_string(),
            };
            let mut table = Table::new(&["Metric", "Value"]);
            table.add_row(vec!["Breakeven".to_string(), format!("{:.2}", report.breakeven)]);
            table.add_row(vec!["Max profit".to_string(), max_profit]);
            table.add_row(vec!["Max loss".to_string(), money(report.max_loss)]);
            table.write_to(out)
        }
    }
}

/// Run the payoff command
pub fn run(args: &PayoffArgs, config: &CliConfig) -> Result<()> {
    info!(
        "Payoff for {} x {} K={} premium={}",
        args.contracts, args.option_type, args.strike, args.premium
    );

    let report = evaluate(args, config)?;
    render(&report, config.output_format, &mut io::stdout().lock())
}
