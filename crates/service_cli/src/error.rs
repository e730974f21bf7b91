//! CLI error types.

use pricer_core::types::{DateError, PricingError};
use pricer_models::instruments::InstrumentError;
use pricer_risk::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `optiscope` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be built.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command-line argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A date could not be parsed or lies in the past.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Market or contract inputs were rejected.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Position inputs were rejected.
    #[error("Position error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Simulation request failed validation.
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
