//! Heat-map grid: the held contract re-priced across price and time.
//!
//! Each cell answers "what would the held option be worth if the
//! underlying were at this row's price with this column's days left", and
//! reports the change against today's theoretical value of that same
//! option ([`PnLAnchor::Baseline`]), not against the premium paid.

use pricer_core::types::time::days_from_years;
use pricer_core::types::{years_from_days, MarketState};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::Position;
use tracing::debug;

use super::policy::{clean_prices, day_columns, price_ladder, strike_ladder, DayColumn};
use super::severity::PnLSeverity;
use crate::error::SimulationError;
use crate::parallel::ParallelConfig;
use crate::simulation::{validate_quote, validate_size, PnLAnchor, SimulationPoint};

/// Default band around spot for row selection, in percent.
pub const DEFAULT_OTM_PERCENTAGE: f64 = 10.0;

/// Rows on each side of spot when rows are synthesised.
pub const DEFAULT_LADDER_STEPS: usize = 7;

/// Inputs for [`build_heatmap`].
///
/// Rows come from, in order of preference: explicit rows, the strike
/// ladder over the listed strikes, or an evenly spaced ladder around spot.
/// Columns default to [`day_columns`] for the contract's days to expiry.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{ContractSpec, MarketState, OptionType};
/// use pricer_models::instruments::Position;
/// use pricer_risk::grid::{build_heatmap, HeatmapRequest};
///
/// let market = MarketState::new(100.0, 0.045, 0.0).unwrap();
/// let contract = ContractSpec::from_days(100.0, OptionType::Call, 0.25, 30.0).unwrap();
/// let position = Position::new(contract, 3.0).unwrap();
///
/// let request = HeatmapRequest::new(position, market)
///     .with_strikes(vec![90.0, 95.0, 100.0, 105.0, 110.0]);
/// let grid = build_heatmap(&request);
///
/// assert_eq!(grid.rows(), &[90.0, 95.0, 100.0, 105.0, 110.0]);
/// assert_eq!(grid.columns().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRequest {
    position: Position,
    market: MarketState,
    days_to_expiry: u32,
    strikes: Vec<f64>,
    otm_percentage: f64,
    rows: Option<Vec<f64>>,
    columns: Option<Vec<DayColumn>>,
    parallel: ParallelConfig,
}

impl HeatmapRequest {
    /// Grid for `position` in `market`, with days to expiry taken from the
    /// contract.
    pub fn new(position: Position, market: MarketState) -> Self {
        let days_to_expiry = days_from_years(position.contract().expiry()).round() as u32;
        Self {
            position,
            market,
            days_to_expiry,
            strikes: Vec::new(),
            otm_percentage: DEFAULT_OTM_PERCENTAGE,
            rows: None,
            columns: None,
            parallel: ParallelConfig::default(),
        }
    }

    /// Overrides the days to expiry used for the baseline and columns.
    pub fn with_days_to_expiry(mut self, days_to_expiry: u32) -> Self {
        self.days_to_expiry = days_to_expiry;
        self
    }

    /// Listed strikes to build the row ladder from.
    pub fn with_strikes(mut self, strikes: Vec<f64>) -> Self {
        self.strikes = strikes;
        self
    }

    /// Band around spot for row selection, in percent.
    pub fn with_otm_percentage(mut self, otm_percentage: f64) -> Self {
        self.otm_percentage = otm_percentage;
        self
    }

    /// Explicit row prices, bypassing the ladder policy.
    pub fn with_rows(mut self, rows: Vec<f64>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Explicit columns, bypassing the day-bucket policy.
    pub fn with_columns(mut self, columns: Vec<DayColumn>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Parallel evaluation settings.
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// The held position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The current market.
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// Days to expiry today.
    pub fn days_to_expiry(&self) -> u32 {
        self.days_to_expiry
    }

    /// Row prices, ascending.
    pub fn rows(&self) -> Vec<f64> {
        let spot = self.market.spot();
        match &self.rows {
            Some(rows) => clean_prices(rows),
            None if !self.strikes.is_empty() => {
                strike_ladder(&self.strikes, spot, self.otm_percentage)
            }
            None => clean_prices(&price_ladder(
                spot,
                self.otm_percentage,
                DEFAULT_LADDER_STEPS,
            )),
        }
    }

    /// Day columns, decreasing.
    pub fn columns(&self) -> Vec<DayColumn> {
        match &self.columns {
            Some(columns) => columns.clone(),
            None => day_columns(self.days_to_expiry),
        }
    }

    /// Checks the quote, the axes and the band before any pricing.
    ///
    /// Volatility must be positive whenever any column still has time left.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let contract = self.position.contract();
        let needs_volatility =
            self.days_to_expiry > 0 || self.columns().iter().any(|column| column.days > 0);
        validate_quote(
            self.market.spot(),
            contract.strike(),
            self.position.premium_paid(),
            contract.volatility(),
            needs_volatility,
        )?;
        validate_size(
            self.market.rate(),
            self.market.dividend_yield(),
            self.position.num_contracts(),
            self.position.multiplier(),
        )?;
        if !(self.otm_percentage.is_finite() && self.otm_percentage > 0.0) {
            return Err(SimulationError::InvalidRange(self.otm_percentage));
        }
        if self.rows().is_empty() {
            return Err(SimulationError::EmptyAxis("rows"));
        }
        if self.columns().is_empty() {
            return Err(SimulationError::EmptyAxis("columns"));
        }
        Ok(())
    }

    /// Theoretical value of the held contract today.
    pub fn baseline_value(&self) -> f64 {
        let contract = self.position.contract();
        BlackScholes::from_market(&self.market, contract).price(
            contract.strike(),
            years_from_days(self.days_to_expiry as f64),
            contract.option_type(),
        )
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// Re-priced scenario with baseline-anchored P&L.
    pub point: SimulationPoint,
    /// Band of `point.percent_pnl`.
    pub severity: PnLSeverity,
}

/// Rows × columns of re-priced cells, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationGrid {
    rows: Vec<f64>,
    columns: Vec<DayColumn>,
    cells: Vec<GridCell>,
    baseline_value: f64,
    days_to_expiry: u32,
}

impl SimulationGrid {
    /// A grid with no cells, returned for rejected requests.
    pub fn empty(baseline_value: f64, days_to_expiry: u32) -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            cells: Vec::new(),
            baseline_value,
            days_to_expiry,
        }
    }

    /// Row prices, ascending.
    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    /// Columns, decreasing days.
    pub fn columns(&self) -> &[DayColumn] {
        &self.columns
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Value every cell is compared against.
    pub fn baseline_value(&self) -> f64 {
        self.baseline_value
    }

    /// Days to expiry today.
    pub fn days_to_expiry(&self) -> u32 {
        self.days_to_expiry
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at (`row`, `column`).
    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        if row >= self.rows.len() || column >= self.columns.len() {
            return None;
        }
        self.cells.get(row * self.columns.len() + column)
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<&[GridCell]> {
        let width = self.columns.len();
        let start = row.checked_mul(width)?;
        let end = start.checked_add(width)?;
        self.cells.get(start..end).filter(|_| width > 0)
    }

    /// Iterates rows as `(price, cells)`.
    pub fn iter_rows(&self) -> impl Iterator<Item = (f64, &[GridCell])> {
        self.rows
            .iter()
            .copied()
            .zip(self.cells.chunks(self.columns.len().max(1)))
    }

    /// Cell with the highest dollar P&L.
    pub fn best_cell(&self) -> Option<&GridCell> {
        self.cells
            .iter()
            .max_by(|a, b| a.point.dollar_pnl.total_cmp(&b.point.dollar_pnl))
    }

    /// Cell with the lowest dollar P&L.
    pub fn worst_cell(&self) -> Option<&GridCell> {
        self.cells
            .iter()
            .min_by(|a, b| a.point.dollar_pnl.total_cmp(&b.point.dollar_pnl))
    }
}

/// Re-prices the held contract at every (row price, column days) pair.
///
/// Every cell keeps the contract's strike, kind and implied volatility and
/// the market's rate and dividend yield. P&L is measured against
/// [`HeatmapRequest::baseline_value`]. Cells are evaluated in parallel
/// once the grid reaches the configured threshold; the output is the same
/// either way. An invalid request yields an empty grid whose baseline is
/// zero unless the baseline itself could be priced.
pub fn build_heatmap(request: &HeatmapRequest) -> SimulationGrid {
    let dte = request.days_to_expiry;

    if let Err(err) = request.validate() {
        debug!(error = %err, "heatmap rejected");
        let baseline = Some(request.baseline_value())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        return SimulationGrid::empty(baseline, dte);
    }
    let baseline = request.baseline_value();

    let rows = request.rows();
    let columns = request.columns();
    let contract = request.position.contract();
    let model = BlackScholes::from_market(&request.market, contract);
    let anchor = PnLAnchor::Baseline(baseline);
    let scale = request.position.scale();
    let spot = request.market.spot();

    let coordinates: Vec<(f64, u32)> = rows
        .iter()
        .flat_map(|&price| columns.iter().map(move |c| (price, c.days)))
        .collect();

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        parallel = request.parallel.should_parallelize(coordinates.len()),
        "building heatmap"
    );

    let cells = request.parallel.map(&coordinates, |&(price, days)| {
        let value = model.with_spot(price).price(
            contract.strike(),
            years_from_days(days as f64),
            contract.option_type(),
        );
        let point = SimulationPoint::new(price, days as f64, value, anchor, scale, spot);
        GridCell {
            point,
            severity: PnLSeverity::classify(point.percent_pnl),
        }
    });

    SimulationGrid {
        rows,
        columns,
        cells,
        baseline_value: baseline,
        days_to_expiry: dte,
    }
}
