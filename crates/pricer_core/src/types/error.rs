//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations and value-type validation
//! - `DateError`: Errors from date construction, parsing and expiry arithmetic

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or contract parameters
/// - `NumericalInstability`: Computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `ExpiryBeforeValuation`: Expiration date precedes the valuation date
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Expiration falls before the valuation date.
    #[error("Expiry {expiry} is before valuation date {valuation}")]
    ExpiryBeforeValuation {
        /// Valuation date (ISO 8601)
        valuation: String,
        /// Expiration date (ISO 8601)
        expiry: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let cases = [
            (PricingError::InvalidInput("spot".into()), "Invalid input: spot"),
            (
                PricingError::NumericalInstability("NaN".into()),
                "Numerical instability: NaN",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");

        let err = DateError::ExpiryBeforeValuation {
            valuation: "2024-06-15".to_string(),
            expiry: "2024-06-01".to_string(),
        };
        assert!(err.to_string().contains("before valuation"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidInput("test".to_string());
        let _: &dyn std::error::Error = &err;
        let err = DateError::ParseError("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
