//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared argument
//! groups live here so every command reads contracts and positions the
//! same way.

pub mod check;
pub mod heatmap;
pub mod output;
pub mod payoff;
pub mod price;
pub mod sweep_price;
pub mod sweep_time;

use clap::Args;
use pricer_core::types::{days_to_expiry, ContractSpec, Date, MarketState, OptionType};
use pricer_models::instruments::Position;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Underlying, contract and expiry
#[derive(Debug, Clone, Args)]
pub struct ContractArgs {
    /// Underlying spot price
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Implied volatility as a decimal (e.g. 0.25)
    #[arg(long)]
    pub vol: f64,

    /// Option type (call or put)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Calendar days to expiry
    #[arg(short, long, conflicts_with = "expiry")]
    pub days: Option<u32>,

    /// Expiration date (YYYY-MM-DD)
    #[arg(short, long)]
    pub expiry: Option<String>,

    /// Valuation date (YYYY-MM-DD), defaults to today
    #[arg(long, requires = "expiry")]
    pub valuation_date: Option<String>,
}

impl ContractArgs {
    /// Calendar days left, from `--days` or the expiration date.
    pub fn days_to_expiry(&self) -> Result<u32> {
        match (self.days, &self.expiry) {
            (Some(days), _) => Ok(days),
            (None, Some(expiry)) => {
                let expiry = Date::parse(expiry)?;
                let valuation = match &self.valuation_date {
                    Some(date) => Date::parse(date)?,
                    None => Date::today(),
                };
                Ok(days_to_expiry(valuation, expiry)?)
            }
            (None, None) => Err(CliError::InvalidArgument(
                "either --days or --expiry is required".to_string(),
            )),
        }
    }

    /// Market snapshot with carry from the configuration.
    pub fn market(&self, config: &CliConfig) -> Result<MarketState> {
        Ok(MarketState::new(
            self.spot,
            config.risk_free_rate,
            config.dividend_yield,
        )?)
    }

    /// Contract with `days` calendar days left.
    pub fn contract(&self, days: u32) -> Result<ContractSpec> {
        Ok(ContractSpec::from_days(
            self.strike,
            self.option_type,
            self.vol,
            days as f64,
        )?)
    }
}

/// Premium paid and position size
#[derive(Debug, Clone, Args)]
pub struct PositionArgs {
    /// Premium paid per share
    #[arg(short, long)]
    pub premium: f64,

    /// Number of contracts
    #[arg(short = 'n', long, default_value_t = 1)]
    pub contracts: u32,
}

impl PositionArgs {
    /// Long position in `contract` sized by the configured multiplier.
    pub fn position(&self, contract: ContractSpec, config: &CliConfig) -> Result<Position> {
        Ok(Position::new(contract, self.premium)?
            .with_contracts(self.contracts)?
            .with_multiplier(config.multiplier)?)
    }
}
