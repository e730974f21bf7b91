//! Axis policies for the heat-map grid.
//!
//! Columns are day buckets derived from the days left on the contract;
//! rows are a ladder of underlying prices filtered around spot. Every grid
//! consumer builds its axes from these two functions.

use std::fmt;

/// Maximum number of day columns, expiry included.
pub const MAX_DAY_COLUMNS: usize = 8;

/// Strikes kept when none fall inside the OTM band.
pub const FALLBACK_STRIKE_COUNT: usize = 15;

/// Fractions of remaining days used for contracts with 8 to 30 days left.
const SHORT_DATED_FRACTIONS: [f64; 4] = [0.8, 0.6, 0.4, 0.2];

/// Fractions of remaining days used for contracts with more than 30 days left.
const LONG_DATED_FRACTIONS: [f64; 4] = [1.0, 0.75, 0.5, 0.25];

const SHORT_DATED_MILESTONES: [u32; 3] = [7, 3, 1];

const LONG_DATED_MILESTONES: [u32; 5] = [30, 14, 7, 3, 1];

/// One heat-map column: days remaining and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayColumn {
    /// Calendar days remaining.
    pub days: u32,
    /// "Now", "Expiry" or "<n>d".
    pub label: String,
}

impl DayColumn {
    /// Column for `days` on a contract with `days_to_expiry` days left.
    pub fn new(days: u32, days_to_expiry: u32) -> Self {
        let label = if days == 0 {
            "Expiry".to_string()
        } else if days == days_to_expiry {
            "Now".to_string()
        } else {
            format!("{days}d")
        };
        Self { days, label }
    }

    /// Whether this is the expiry column.
    #[inline]
    pub fn is_expiry(&self) -> bool {
        self.days == 0
    }
}

impl fmt::Display for DayColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Day buckets for a contract with `days_to_expiry` days left.
///
/// - 7 days or fewer: every day down to 1, then expiry.
/// - 8 to 30 days: 80/60/40/20 % of the remaining days and the 7/3/1-day
///   milestones, then expiry.
/// - More than 30 days: 100/75/50/25 % and the 30/14/7/3/1-day milestones,
///   capped at [`MAX_DAY_COLUMNS`] including expiry.
///
/// Columns are unique and ordered by decreasing days; the last one is
/// always expiry.
///
/// # Examples
///
/// ```
/// use pricer_risk::grid::day_columns;
///
/// let days: Vec<u32> = day_columns(3).iter().map(|c| c.days).collect();
/// assert_eq!(days, vec![3, 2, 1, 0]);
///
/// let labels: Vec<String> = day_columns(60).into_iter().map(|c| c.label).collect();
/// assert_eq!(labels, vec!["Now", "45d", "30d", "15d", "14d", "7d", "3d", "Expiry"]);
/// ```
pub fn day_columns(days_to_expiry: u32) -> Vec<DayColumn> {
    let dte = days_to_expiry;
    let fraction_of = |fractions: &[f64]| -> Vec<u32> {
        fractions
            .iter()
            .map(|f| (dte as f64 * f).round() as u32)
            .collect()
    };

    let mut days: Vec<u32> = if dte <= 7 {
        (1..=dte).collect()
    } else if dte <= 30 {
        let mut days = fraction_of(&SHORT_DATED_FRACTIONS);
        days.extend(SHORT_DATED_MILESTONES);
        days
    } else {
        let mut days = fraction_of(&LONG_DATED_FRACTIONS);
        days.extend(LONG_DATED_MILESTONES);
        days
    };

    days.retain(|&d| d > 0 && d <= dte);
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    days.truncate(MAX_DAY_COLUMNS - 1);
    days.push(0);

    days.into_iter().map(|d| DayColumn::new(d, dte)).collect()
}

/// Positive finite values, sorted ascending and de-duplicated.
pub(crate) fn clean_prices(prices: &[f64]) -> Vec<f64> {
    let mut prices: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();
    prices.sort_by(f64::total_cmp);
    prices.dedup();
    prices
}

/// Row prices for the grid: strikes within ±`otm_percentage` % of spot.
///
/// When no strike falls inside the band, the [`FALLBACK_STRIKE_COUNT`]
/// strikes nearest spot are used instead. Non-positive and non-finite
/// strikes are dropped; rows are unique and ascending.
///
/// # Examples
///
/// ```
/// use pricer_risk::grid::strike_ladder;
///
/// let strikes = [80.0, 90.0, 95.0, 100.0, 105.0, 110.0, 120.0];
/// assert_eq!(strike_ladder(&strikes, 100.0, 10.0), vec![90.0, 95.0, 100.0, 105.0, 110.0]);
/// assert_eq!(strike_ladder(&[150.0, 40.0], 100.0, 10.0), vec![40.0, 150.0]);
/// ```
pub fn strike_ladder(strikes: &[f64], spot: f64, otm_percentage: f64) -> Vec<f64> {
    let strikes = clean_prices(strikes);
    let band = spot * otm_percentage.max(0.0) / 100.0;

    let within: Vec<f64> = strikes
        .iter()
        .copied()
        .filter(|k| (k - spot).abs() <= band)
        .collect();
    if !within.is_empty() {
        return within;
    }

    let mut nearest = strikes;
    nearest.sort_by(|a, b| (a - spot).abs().total_cmp(&(b - spot).abs()));
    nearest.truncate(FALLBACK_STRIKE_COUNT);
    nearest.sort_by(f64::total_cmp);
    nearest
}

/// Evenly spaced prices across ±`otm_percentage` % of spot.
///
/// Yields `2 × steps_per_side + 1` prices with spot in the middle. Used for
/// rows when no listed strikes are available.
pub fn price_ladder(spot: f64, otm_percentage: f64, steps_per_side: usize) -> Vec<f64> {
    if steps_per_side == 0 {
        return vec![spot];
    }
    let step = spot * otm_percentage / 100.0 / steps_per_side as f64;
    let n = steps_per_side as f64;
    (0..=2 * steps_per_side)
        .map(|i| spot + (i as f64 - n) * step)
        .collect()
}
