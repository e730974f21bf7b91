//! Calendar types and ACT/365 day counting for option expiries.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `days_to_expiry`: Calendar days between valuation and expiration
//! - `years_from_days`: Calendar days to year fraction (days / 365)
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{days_to_expiry, years_from_days, Date};
//!
//! let today = Date::from_ymd(2024, 6, 3).unwrap();
//! let expiry = Date::from_ymd(2024, 6, 21).unwrap();
//!
//! let dte = days_to_expiry(today, expiry).unwrap();
//! assert_eq!(dte, 18);
//! assert!((years_from_days(dte as f64) - 18.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Calendar days per year used for every time-to-expiry conversion.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and day arithmetic.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert_eq!(Date::parse("2024-06-15").unwrap().year(), 2024);
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of calendar days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Calendar days from `valuation` to `expiry`.
///
/// An option expiring on the valuation date has zero days left.
///
/// # Errors
/// `DateError::ExpiryBeforeValuation` if the expiration has already passed.
pub fn days_to_expiry(valuation: Date, expiry: Date) -> Result<u32, DateError> {
    let days = expiry - valuation;
    u32::try_from(days).map_err(|_| DateError::ExpiryBeforeValuation {
        valuation: valuation.to_string(),
        expiry: expiry.to_string(),
    })
}

/// Converts calendar days to a year fraction (ACT/365).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::years_from_days;
///
/// assert_eq!(years_from_days(365.0), 1.0);
/// assert_eq!(years_from_days(0.0), 0.0);
/// ```
#[inline]
pub fn years_from_days(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// Converts a year fraction back to calendar days (ACT/365).
#[inline]
pub fn days_from_years(years: f64) -> f64 {
    years * DAYS_PER_YEAR
}
