//! Heat-map command implementation
//!
//! P&L of a held position over a grid of underlying prices and days to
//! expiry, measured against today's theoretical value.

use std::io::{self, Write};

use pricer_risk::grid::{build_heatmap, HeatmapRequest, PnLSeverity, SimulationGrid};
use serde::Serialize;
use tracing::info;

use super::output::{money, percent, write_csv, write_json, Table};
use super::{ContractArgs, PositionArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// One grid cell flattened for CSV output
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapRecord<'a> {
    pub stock_price: f64,
    pub column: &'a str,
    pub days_to_expiry: u32,
    pub option_price: f64,
    pub dollar_pnl: f64,
    pub percent_pnl: f64,
    pub severity: PnLSeverity,
}

/// Flattens `grid` into row-major records.
pub fn records(grid: &SimulationGrid) -> Vec<HeatmapRecord<'_>> {
    let columns = grid.columns();
    grid.iter_rows()
        .flat_map(|(price, cells)| {
            cells.iter().zip(columns).map(move |(cell, column)| HeatmapRecord {
                stock_price: price,
                column: &column.label,
                days_to_expiry: column.days,
                option_price: cell.point.option_price,
                dollar_pnl: cell.point.dollar_pnl,
                percent_pnl: cell.point.percent_pnl,
                severity: cell.severity,
            })
        })
        .collect()
}

/// Builds the grid for the given position.
///
/// Rows come from `strikes` within the configured band around spot, or
/// an evenly spaced price ladder when no strikes are given.
pub fn simulate(
    contract: &ContractArgs,
    position: &PositionArgs,
    strikes: &[f64],
    config: &CliConfig,
) -> Result<SimulationGrid> {
    let days = contract.days_to_expiry()?;
    let market = contract.market(config)?;
    let held = position.position(contract.contract(days)?, config)?;

    let mut request = HeatmapRequest::new(held, market)
        .with_days_to_expiry(days)
        .with_otm_percentage(config.otm_percentage);
    if !strikes.is_empty() {
        request = request.with_strikes(strikes.to_vec());
    }
    request.validate()?;

    Ok(build_heatmap(&request))
}

/// Writes the grid in the requested format.
pub fn render<W: Write>(grid: &SimulationGrid, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, grid),
        OutputFormat::Csv => write_csv(out, records(grid)),
        OutputFormat::Table => {
            let mut headers = vec!["Stock".to_string()];
            headers.extend(grid.columns().iter().map(ToString::to_string));
            let mut table = Table::new(&headers);

            for (price, cells) in grid.iter_rows() {
                let mut row = vec![format!("{price:.2}")];
                row.extend(cells.iter().map(|cell| {
                    format!(
                        "{} {}",
                        money(cell.point.dollar_pnl),
                        percent(cell.point.percent_pnl)
                    )
                }));
                table.add_row(row);
            }

            writeln!(
                out,
                "Baseline {:.4} with {} days left",
                grid.baseline_value(),
                grid.days_to_expiry()
            )?;
            table.write_to(out)
        }
    }
}

/// Run the heatmap command
pub fn run(
    contract: &ContractArgs,
    position: &PositionArgs,
    strikes: &[f64],
    config: &CliConfig,
) -> Result<()> {
    info!("Building P&L heat map...");
    info!("  Band: ±{}% of spot", config.otm_percentage);
    info!("  Listed strikes: {}", strikes.len());

    let grid = simulate(contract, position, strikes, config)?;
    info!(
        "  Grid: {} rows x {} columns",
        grid.rows().len(),
        grid.columns().len()
    );

    render(&grid, config.output_format, &mut io::stdout().lock())
}
