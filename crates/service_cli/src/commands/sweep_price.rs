//! Price sweep command implementation
//!
//! P&L of a held position across underlying prices at the current days to
//! expiry, measured against the premium paid.

use std::io::{self, Write};

use pricer_risk::simulation::{generate_pnl_simulation, PriceSweepRequest, SimulationSeries};
use tracing::info;

use super::output::write_series;
use super::{ContractArgs, PositionArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Builds and runs the sweep for the given position.
pub fn simulate(
    contract: &ContractArgs,
    position: &PositionArgs,
    config: &CliConfig,
) -> Result<SimulationSeries> {
    let days = contract.days_to_expiry()?;
    let market = contract.market(config)?;
    let held = position.position(contract.contract(days)?, config)?;

    let request =
        PriceSweepRequest::from_position(&held, &market).with_price_range(config.price_range);
    request.validate()?;

    Ok(generate_pnl_simulation(&request))
}

/// Writes the sweep in the requested format.
pub fn render<W: Write>(series: &SimulationSeries, format: OutputFormat, out: &mut W) -> Result<()> {
    write_series(series, format, out)
}

/// Run the sweep-price command
pub fn run(contract: &ContractArgs, position: &PositionArgs, config: &CliConfig) -> Result<()> {
    info!("Starting price sweep...");
    info!("  Range: ±{:.0}% of spot", config.price_range * 100.0);

    let series = simulate(contract, position, config)?;
    if let (Some(best), Some(worst)) = (series.best(), series.worst()) {
        info!("  Best: {:.2} at {:.2}", best.dollar_pnl, best.stock_price);
        info!("  Worst: {:.2} at {:.2}", worst.dollar_pnl, worst.stock_price);
    }

    render(&series, config.output_format, &mut io::stdout().lock())
}
