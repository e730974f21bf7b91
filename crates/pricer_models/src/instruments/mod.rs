//! Held option positions.
//!
//! This module provides:
//! - [`Position`]: a long option with its cost basis and contract size
//! - [`InstrumentError`]: validation errors for position construction

pub mod error;
pub mod position;

pub use error::InstrumentError;
pub use position::{Position, DEFAULT_MULTIPLIER};
