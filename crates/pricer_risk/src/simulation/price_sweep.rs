//! Price sweep: P&L across hypothetical underlying prices.

use pricer_core::types::time::days_from_years;
use pricer_core::types::{years_from_days, MarketState, OptionType};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{Position, DEFAULT_MULTIPLIER};
use tracing::debug;

use super::point::{PnLAnchor, SimulationPoint, SimulationSeries, SweepAxis};
use super::{validate_quote, validate_size};
use crate::error::SimulationError;

/// Number of prices in a sweep, both ends included.
pub const PRICE_SWEEP_POINTS: usize = 101;

/// Default half-width of the sweep as a fraction of spot (±50%).
pub const DEFAULT_PRICE_RANGE: f64 = 0.5;

/// Inputs for [`generate_pnl_simulation`].
///
/// Time to expiry, volatility and carry stay fixed while the underlying
/// price moves across `[spot·(1−range), spot·(1+range)]`.
///
/// # Examples
///
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_risk::simulation::{generate_pnl_simulation, PriceSweepRequest};
///
/// let request = PriceSweepRequest::new(100.0, 100.0, 3.0, 30.0 / 365.0, 0.25, OptionType::Call)
///     .with_rate(0.045);
/// let series = generate_pnl_simulation(&request);
///
/// assert_eq!(series.len(), 101);
/// assert_eq!(series.points()[0].stock_price, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceSweepRequest {
    /// Current underlying price.
    pub spot: f64,
    /// Strike of the held contract.
    pub strike: f64,
    /// Premium paid per unit.
    pub premium: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Implied volatility.
    pub volatility: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Risk-free rate.
    pub rate: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Contracts held.
    pub num_contracts: u32,
    /// Units per contract.
    pub multiplier: f64,
    /// Half-width of the sweep as a fraction of spot.
    pub price_range: f64,
}

impl PriceSweepRequest {
    /// Creates a request with zero carry, one contract and a ±50% range.
    pub fn new(
        spot: f64,
        strike: f64,
        premium: f64,
        expiry: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            premium,
            expiry,
            volatility,
            option_type,
            rate: 0.0,
            dividend_yield: 0.0,
            num_contracts: 1,
            multiplier: DEFAULT_MULTIPLIER,
            price_range: DEFAULT_PRICE_RANGE,
        }
    }

    /// Request for a held position in the given market.
    pub fn from_position(position: &Position, market: &MarketState) -> Self {
        let contract = position.contract();
        Self {
            spot: market.spot(),
            strike: contract.strike(),
            premium: position.premium_paid(),
            expiry: contract.expiry(),
            volatility: contract.volatility(),
            option_type: contract.option_type(),
            rate: market.rate(),
            dividend_yield: market.dividend_yield(),
            num_contracts: position.num_contracts(),
            multiplier: position.multiplier(),
            price_range: DEFAULT_PRICE_RANGE,
        }
    }

    /// Same request with the expiry given in calendar days.
    pub fn with_days_to_expiry(mut self, days: f64) -> Self {
        self.expiry = years_from_days(days);
        self
    }

    /// Sets the risk-free rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the contract count.
    pub fn with_contracts(mut self, num_contracts: u32) -> Self {
        self.num_contracts = num_contracts;
        self
    }

    /// Sets the contract multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the sweep half-width.
    pub fn with_price_range(mut self, price_range: f64) -> Self {
        self.price_range = price_range;
        self
    }

    /// Checks every input the sweep relies on.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.expiry.is_finite() && self.expiry >= 0.0) {
            return Err(SimulationError::InvalidExpiry(self.expiry));
        }
        validate_quote(
            self.spot,
            self.strike,
            self.premium,
            self.volatility,
            self.expiry > 0.0,
        )?;
        validate_size(
            self.rate,
            self.dividend_yield,
            self.num_contracts,
            self.multiplier,
        )?;
        if !(self.price_range > 0.0 && self.price_range < 1.0) {
            return Err(SimulationError::InvalidRange(self.price_range));
        }
        Ok(())
    }

    /// The swept prices in increasing order.
    pub fn price_axis(&self) -> Vec<f64> {
        let low = self.spot * (1.0 - self.price_range);
        let high = self.spot * (1.0 + self.price_range);
        let last = (PRICE_SWEEP_POINTS - 1) as f64;
        (0..PRICE_SWEEP_POINTS)
            .map(|i| low + (high - low) * i as f64 / last)
            .collect()
    }

    fn scale(&self) -> f64 {
        self.multiplier * self.num_contracts as f64
    }
}

/// Re-prices the held option at 101 evenly spaced underlying prices.
///
/// Points are ordered by increasing `stock_price` and carry P&L against the
/// premium paid. An invalid request yields an empty series.
pub fn generate_pnl_simulation(request: &PriceSweepRequest) -> SimulationSeries {
    let anchor = PnLAnchor::Premium(request.premium);

    if let Err(err) = request.validate() {
        debug!(error = %err, "price sweep rejected");
        return SimulationSeries::empty(SweepAxis::Price, anchor);
    }

    let model = BlackScholes::unchecked(
        request.spot,
        request.rate,
        request.dividend_yield,
        request.volatility,
    );
    let days = days_from_years(request.expiry);
    let scale = request.scale();

    let points = request
        .price_axis()
        .into_iter()
        .map(|price| {
            let value = model
                .with_spot(price)
                .price(request.strike, request.expiry, request.option_type);
            SimulationPoint::new(price, days, value, anchor, scale, request.spot)
        })
        .collect();

    SimulationSeries::new(SweepAxis::Price, anchor, points)
}
