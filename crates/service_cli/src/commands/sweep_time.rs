//! Time-decay command implementation
//!
//! P&L of a held position as expiry approaches with the underlying held at
//! spot, measured against the premium paid.

use std::io::{self, Write};

use pricer_risk::simulation::{
    generate_time_decay_simulation, SimulationSeries, TimeDecayRequest,
};
use tracing::info;

use super::output::write_series;
use super::{ContractArgs, PositionArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Builds and runs the decay sweep for the given position.
pub fn simulate(
    contract: &ContractArgs,
    position: &PositionArgs,
    config: &CliConfig,
) -> Result<SimulationSeries> {
    let days = contract.days_to_expiry()?;
    let market = contract.market(config)?;
    let held = position.position(contract.contract(days)?, config)?;

    let request = TimeDecayRequest::from_position(&held, &market, days);
    request.validate()?;

    Ok(generate_time_decay_simulation(&request))
}

/// Writes the sweep in the requested format.
pub fn render<W: Write>(series: &SimulationSeries, format: OutputFormat, out: &mut W) -> Result<()> {
    write_series(series, format, out)
}

/// Run the sweep-time command
pub fn run(contract: &ContractArgs, position: &PositionArgs, config: &CliConfig) -> Result<()> {
    info!("Starting time decay sweep...");

    let series = simulate(contract, position, config)?;
    info!("  Steps: {}", series.len());
    if let Some(expiry) = series.points().last() {
        info!("  P&L at expiry: {:.2}", expiry.dollar_pnl);
    }

    render(&series, config.output_format, &mut io::stdout().lock())
}
