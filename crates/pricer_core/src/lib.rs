//! # pricer_core: Foundation Layer for Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Standard normal distribution functions (`math::distributions`)
//! - Option value types: `OptionType`, `MarketState`, `ContractSpec` (`types`)
//! - Calendar helpers: `Date`, days-to-expiry, ACT/365 year fractions (`types::time`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{ContractSpec, MarketState, OptionType};
//!
//! let market = MarketState::new(100.0, 0.045, 0.0).unwrap();
//! let contract = ContractSpec::from_days(105.0, OptionType::Call, 0.25, 30.0).unwrap();
//!
//! assert_eq!(market.spot(), 100.0);
//! assert!((contract.expiry() - 30.0 / 365.0).abs() < 1e-12);
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for value types and `Date`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
