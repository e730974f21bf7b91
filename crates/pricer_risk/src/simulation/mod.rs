//! One-dimensional P&L sweeps.
//!
//! This module provides:
//! - [`generate_pnl_simulation`]: re-price across underlying prices
//! - [`generate_time_decay_simulation`]: re-price as days to expiry run down
//! - [`SimulationPoint`] / [`SimulationSeries`]: the ordered output
//!
//! Both sweeps measure P&L against the premium paid
//! ([`PnLAnchor::Premium`]). Requests that fail validation produce an empty
//! series and never reach the pricing kernel.

pub mod point;
pub mod price_sweep;
pub mod time_sweep;

pub use point::{PnLAnchor, SimulationPoint, SimulationSeries, SweepAxis};
pub use price_sweep::{
    generate_pnl_simulation, PriceSweepRequest, DEFAULT_PRICE_RANGE, PRICE_SWEEP_POINTS,
};
pub use time_sweep::{
    decay_schedule, generate_time_decay_simulation, TimeDecayRequest, DECAY_TARGET_STEPS,
};

use crate::error::{ensure_positive, SimulationError};

/// Checks the quote and contract inputs shared by both sweeps.
///
/// Volatility only matters while time remains, so `needs_volatility` is
/// false for a contract already at expiry.
pub(crate) fn validate_quote(
    spot: f64,
    strike: f64,
    premium: f64,
    volatility: f64,
    needs_volatility: bool,
) -> Result<(), SimulationError> {
    ensure_positive(spot, SimulationError::InvalidSpot)?;
    ensure_positive(strike, SimulationError::InvalidStrike)?;
    ensure_positive(premium, SimulationError::InvalidPremium)?;
    if needs_volatility {
        ensure_positive(volatility, SimulationError::InvalidVolatility)?;
    } else if !(volatility.is_finite() && volatility >= 0.0) {
        return Err(SimulationError::InvalidVolatility(volatility));
    }
    Ok(())
}

/// Checks carry and position-size inputs shared by both sweeps.
pub(crate) fn validate_size(
    rate: f64,
    dividend_yield: f64,
    num_contracts: u32,
    multiplier: f64,
) -> Result<(), SimulationError> {
    for value in [rate, dividend_yield] {
        if !value.is_finite() {
            return Err(SimulationError::InvalidRate(value));
        }
    }
    if num_contracts == 0 {
        return Err(SimulationError::InvalidContracts(
            "at least one contract required".to_string(),
        ));
    }
    if !(multiplier.is_finite() && multiplier > 0.0) {
        return Err(SimulationError::InvalidContracts(format!(
            "multiplier {multiplier} must be positive"
        )));
    }
    Ok(())
}
