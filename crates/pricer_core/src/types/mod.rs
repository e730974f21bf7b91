//! Core value, time and error types.
//!
//! This module provides:
//! - `option_type`: Call/put discriminator
//! - `market`: `MarketState` (spot, rate, dividend yield) and `ContractSpec`
//!   (strike, kind, implied volatility, time to expiry)
//! - `time`: `Date` and ACT/365 day counting for expiries
//! - `error`: Structured error types for pricing and date operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod market;
pub mod option_type;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use market::{ContractSpec, MarketState};
pub use option_type::OptionType;
pub use time::{days_to_expiry, years_from_days, Date, DAYS_PER_YEAR};
