//! Instrument error types.
//!
//! This module provides structured error handling for position
//! construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidPremium`: Premium paid is non-positive or non-finite
/// - `InvalidContracts`: Contract count is zero
/// - `InvalidMultiplier`: Contract multiplier is non-positive or non-finite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidPremium { premium: -1.5 };
/// assert!(format!("{}", err).contains("-1.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Premium paid is not a positive finite amount.
    #[error("Invalid premium: {premium}")]
    InvalidPremium {
        /// The invalid premium value
        premium: f64,
    },

    /// Contract count must be at least one.
    #[error("Invalid contract count: {count}")]
    InvalidContracts {
        /// The invalid count
        count: u32,
    },

    /// Multiplier is not a positive finite amount.
    #[error("Invalid multiplier: {multiplier}")]
    InvalidMultiplier {
        /// The invalid multiplier
        multiplier: f64,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
