//! # Pricer Risk (L3: Simulation)
//!
//! P&L simulation for a held option, built on the Black-Scholes kernel.
//!
//! This crate provides:
//! - Price and time-decay sweeps against the premium paid
//! - A heat-map grid against today's theoretical value
//! - Column (day bucket) and row (strike ladder) policies for the grid
//! - Discrete severity bands for grid cells
//! - Closed-form breakeven, max profit and max loss
//! - Rayon-based parallel grid evaluation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L3)             │
//! ├─────────────────────────────────────────┤
//! │  simulation/ - price & time sweeps      │
//! │  grid/       - heat-map, axis policies, │
//! │                severity bands           │
//! │  metrics     - breakeven, max P&L       │
//! │  parallel/   - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes kernel, positions        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::OptionType;
//! use pricer_risk::simulation::{generate_time_decay_simulation, TimeDecayRequest};
//!
//! let request = TimeDecayRequest::new(100.0, 100.0, 3.0, 45, 0.25, OptionType::Call)
//!     .with_rate(0.045);
//! let series = generate_time_decay_simulation(&request);
//!
//! assert_eq!(series.points()[0].days_to_expiry, 45.0);
//! assert_eq!(series.points().last().map(|p| p.days_to_expiry), Some(0.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod grid;
pub mod metrics;
pub mod parallel;
pub mod simulation;

// Re-export commonly used types
pub use error::SimulationError;
pub use grid::{build_heatmap, DayColumn, GridCell, HeatmapRequest, PnLSeverity, SimulationGrid};
pub use metrics::PayoffProfile;
pub use parallel::ParallelConfig;
pub use simulation::{
    generate_pnl_simulation, generate_time_decay_simulation, PnLAnchor, PriceSweepRequest,
    SimulationPoint, SimulationSeries, SweepAxis, TimeDecayRequest,
};
