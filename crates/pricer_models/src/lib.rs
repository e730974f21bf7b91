//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option valuation and position bookkeeping.
//!
//! This crate provides:
//! - Black-Scholes-Merton pricing with continuous dividend yield
//! - Analytic Greeks (delta, gamma, theta per day, vega, rho)
//! - Long option positions with premium-based P&L
//!
//! ## Design Principles
//!
//! - **Generic kernel** over `num_traits::Float` for `f32`/`f64`
//! - **Total functions** at expiry: prices collapse to intrinsic value
//! - **Builder pattern** for positions with sensible defaults

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
