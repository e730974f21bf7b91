//! Two-dimensional P&L grid (heat-map).
//!
//! This module provides:
//! - [`day_columns`] / [`strike_ladder`]: the axis policies
//! - [`PnLSeverity`]: discrete bands for cell colouring
//! - [`build_heatmap`]: baseline-anchored cell evaluation over Rayon

pub mod heatmap;
pub mod policy;
pub mod severity;

pub use heatmap::{
    build_heatmap, GridCell, HeatmapRequest, SimulationGrid, DEFAULT_LADDER_STEPS,
    DEFAULT_OTM_PERCENTAGE,
};
pub use policy::{
    day_columns, price_ladder, strike_ladder, DayColumn, FALLBACK_STRIKE_COUNT, MAX_DAY_COLUMNS,
};
pub use severity::{PnLSeverity, SEVERITY_THRESHOLDS};
