//! Simulation error types.
//!
//! Raised by request validation. The generators themselves never fail:
//! a request that does not validate yields an empty result instead.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors detected while validating a simulation request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Spot price is not positive and finite.
    #[error("Invalid spot price: {0}")]
    InvalidSpot(f64),

    /// Strike is not positive and finite.
    #[error("Invalid strike: {0}")]
    InvalidStrike(f64),

    /// Premium paid is not positive and finite.
    #[error("Invalid premium: {0}")]
    InvalidPremium(f64),

    /// Implied volatility is not positive and finite.
    #[error("Invalid volatility: {0}")]
    InvalidVolatility(f64),

    /// Time to expiry is negative or not finite.
    #[error("Invalid time to expiry: {0}")]
    InvalidExpiry(f64),

    /// Rate or dividend yield is not finite.
    #[error("Invalid rate: {0}")]
    InvalidRate(f64),

    /// Price range fraction outside (0, 1).
    #[error("Invalid price range: {0} (expected 0 < range < 1)")]
    InvalidRange(f64),

    /// Contract count or multiplier does not describe a position.
    #[error("Invalid position size: {0}")]
    InvalidContracts(String),

    /// A grid axis has no usable entries.
    #[error("Empty grid axis: {0}")]
    EmptyAxis(&'static str),
}

impl From<SimulationError> for PricingError {
    fn from(err: SimulationError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Checks that `value` is positive and finite.
#[inline]
pub(crate) fn ensure_positive(
    value: f64,
    err: impl FnOnce(f64) -> SimulationError,
) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(err(value))
    }
}
