//! Time-decay sweep: P&L as expiry approaches at a fixed underlying price.

use pricer_core::types::{years_from_days, MarketState, OptionType};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{Position, DEFAULT_MULTIPLIER};
use tracing::debug;

use super::point::{PnLAnchor, SimulationPoint, SimulationSeries, SweepAxis};
use super::{validate_quote, validate_size};
use crate::error::SimulationError;

/// Approximate number of steps for contracts with more than 30 days left.
pub const DECAY_TARGET_STEPS: u32 = 20;

/// Days up to which the decay sweep steps one day at a time.
const DAILY_STEP_LIMIT: u32 = 30;

/// Days-remaining schedule for a decay sweep, from `days_to_expiry` down to 0.
///
/// Steps one day at a time up to 30 days, otherwise
/// `ceil(days_to_expiry / 20)` days. Expiry is always the last entry.
///
/// # Examples
///
/// ```
/// use pricer_risk::simulation::decay_schedule;
///
/// assert_eq!(decay_schedule(3), vec![3, 2, 1, 0]);
/// assert_eq!(decay_schedule(50).first(), Some(&50));
/// assert_eq!(decay_schedule(50).last(), Some(&0));
/// ```
pub fn decay_schedule(days_to_expiry: u32) -> Vec<u32> {
    let step = if days_to_expiry > DAILY_STEP_LIMIT {
        days_to_expiry.div_ceil(DECAY_TARGET_STEPS)
    } else {
        1
    };

    let mut days: Vec<u32> = (0..=days_to_expiry).rev().step_by(step as usize).collect();
    if days.last() != Some(&0) {
        days.push(0);
    }
    days
}

/// Inputs for [`generate_time_decay_simulation`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDecayRequest {
    /// Underlying price, held fixed.
    pub spot: f64,
    /// Strike of the held contract.
    pub strike: f64,
    /// Premium paid per unit.
    pub premium: f64,
    /// Calendar days remaining today.
    pub days_to_expiry: u32,
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
}

impl TimeDecayRequest {
    /// Creates a request with zero carry and one contract.
    pub fn new(
        spot: f64,
        strike: f64,
        premium: f64,
        days_to_expiry: u32,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            premium,
            days_to_expiry,
            volatility,
            option_type,
            rate: 0.0,
            dividend_yield: 0.0,
            num_contracts: 1,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    /// Request for a held position with `days_to_expiry` days left.
    pub fn from_position(position: &Position, market: &MarketState, days_to_expiry: u32) -> Self {
        let contract = position.contract();
        Self {
            spot: market.spot(),
            strike: contract.strike(),
            premium: position.premium_paid(),
            days_to_expiry,
            volatility: contract.volatility(),
            option_type: contract.option_type(),
            rate: market.rate(),
            dividend_yield: market.dividend_yield(),
            num_contracts: position.num_contracts(),
            multiplier: position.multiplier(),
        }
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

    /// Checks every input the sweep relies on.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_quote(
            self.spot,
            self.strike,
            self.premium,
            self.volatility,
            self.days_to_expiry > 0,
        )?;
        validate_size(
            self.rate,
            self.dividend_yield,
            self.num_contracts,
            self.multiplier,
        )
    }
}

/// Re-prices the held option as days to expiry run down to zero.
///
/// The underlying stays at `spot`. Points are ordered by decreasing
/// `days_to_expiry`: index 0 is today and the last point is expiry. An
/// invalid request yields an empty series.
///
/// # Examples
///
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_risk::simulation::{generate_time_decay_simulation, TimeDecayRequest};
///
/// let request = TimeDecayRequest::new(100.0, 95.0, 7.0, 10, 0.3, OptionType::Call);
/// let series = generate_time_decay_simulation(&request);
///
/// assert_eq!(series.len(), 11);
/// assert_eq!(series.points()[10].option_price, 5.0);
/// ```
pub fn generate_time_decay_simulation(request: &TimeDecayRequest) -> SimulationSeries {
    let anchor = PnLAnchor::Premium(request.premium);

    if let Err(err) = request.validate() {
        debug!(error = %err, "time decay sweep rejected");
        return SimulationSeries::empty(SweepAxis::Time, anchor);
    }

    let model = BlackScholes::unchecked(
        request.spot,
        request.rate,
        request.dividend_yield,
        request.volatility,
    );
    let scale = request.multiplier * request.num_contracts as f64;

    let points = decay_schedule(request.days_to_expiry)
        .into_iter()
        .map(|days| {
            let days = days as f64;
            let value = model.price(request.strike, years_from_days(days), request.option_type);
            SimulationPoint::new(request.spot, days, value, anchor, scale, request.spot)
        })
        .collect();

    SimulationSeries::new(SweepAxis::Time, anchor, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // Schedule
    // ==========================================================

    #[test]
    fn test_schedule_daily_up_to_thirty() {
        let days = decay_schedule(30);
        assert_eq!(days.len(), 31);
        assert_eq!(days[0], 30);
        assert_eq!(days[30], 0);
    }

    #[test]
    fn test_schedule_steps_above_thirty() {
        // ceil(45 / 20) = 3 and 45 is a multiple of 3
        let days = decay_schedule(45);
        assert_eq!(days.len(), 16);
        assert!(days.windows(2).all(|w| w[0] - w[1] == 3));

        // ceil(50 / 20) = 3; 0 is appended after 2
        let days = decay_schedule(50);
        assert_eq!(&days[days.len() - 3..], &[5, 2, 0]);
    }

    #[test]
    fn test_schedule_long_dated() {
        let days = decay_schedule(365);
        assert_eq!(days[0], 365);
        assert_eq!(days[1], 346);
        assert_eq!(*days.last().unwrap(), 0);
        assert!(days.len() <= DECAY_TARGET_STEPS as usize + 2);
    }

    #[test]
    fn test_schedule_at_expiry() {
        assert_eq!(decay_schedule(0), vec![0]);
        assert_eq!(decay_schedule(1), vec![1, 0]);
    }

    // ==========================================================
    // Sweep
    // ==========================================================

    #[test]
    fn test_sweep_ordered_ending_at_expiry() {
        let request = TimeDecayRequest::new(100.0, 100.0, 3.0, 90, 0.25, OptionType::Call)
            .with_rate(0.045);
        let series = generate_time_decay_simulation(&request);

        assert_eq!(series.axis(), SweepAxis::Time);
        assert!(series
            .points()
            .windows(2)
            .all(|w| w[0].days_to_expiry > w[1].days_to_expiry));
        assert_eq!(series.points().last().map(|p| p.days_to_expiry), Some(0.0));
        assert!(series.iter().all(|p| p.stock_price == 100.0));
        assert!(series.iter().all(|p| p.price_change_percent == 0.0));
    }

    #[test]
    fn test_atm_value_decays_to_zero() {
        let request = TimeDecayRequest::new(100.0, 100.0, 3.0, 30, 0.25, OptionType::Call)
            .with_rate(0.045);
        let series = generate_time_decay_simulation(&request);

        assert_relative_eq!(series.points()[0].option_price, 3.0418, epsilon = 1e-3);
        assert!(series
            .points()
            .windows(2)
            .all(|w| w[0].option_price >= w[1].option_price));

        let expiry = series.points().last().unwrap();
        assert_eq!(expiry.option_price, 0.0);
        assert_relative_eq!(expiry.dollar_pnl, -300.0);
        assert_relative_eq!(expiry.percent_pnl, -100.0);
    }

    #[test]
    fn test_expired_contract_single_point() {
        let request = TimeDecayRequest::new(90.0, 100.0, 4.0, 0, 0.0, OptionType::Put);
        let series = generate_time_decay_simulation(&request);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].option_price, 10.0);
        assert_relative_eq!(series.points()[0].dollar_pnl, 600.0);
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_series() {
        let base = TimeDecayRequest::new(100.0, 100.0, 3.0, 30, 0.25, OptionType::Call);
        let cases = [
            TimeDecayRequest { spot: -1.0, ..base },
            TimeDecayRequest { strike: 0.0, ..base },
            TimeDecayRequest { premium: 0.0, ..base },
            TimeDecayRequest { volatility: 0.0, ..base },
            base.with_rate(f64::INFINITY),
            base.with_multiplier(-100.0),
        ];

        for request in cases {
            assert!(generate_time_decay_simulation(&request).is_empty());
        }
    }
}
