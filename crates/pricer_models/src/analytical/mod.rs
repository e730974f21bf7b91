//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Theta, Vega, Rho)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports both `f64` and `f32`
//! - **Stateless**: every function is a pure function of its inputs
//! - **Explicit expiry branch**: `T <= 0` returns the intrinsic state and
//!   never divides by `√T`

pub mod black_scholes;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{
    bs_delta, bs_gamma, bs_price, bs_theta, greeks_for, price_contract, BlackScholes, Greeks,
};
pub use error::AnalyticalError;
