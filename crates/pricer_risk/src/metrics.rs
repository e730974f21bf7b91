//! Closed-form payoff metrics for a long option held to expiry.

use pricer_core::types::OptionType;
use pricer_models::instruments::Position;

/// Breakeven and P&L extremes at expiry.
///
/// No pricing model is involved: these follow from the payoff alone.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{ContractSpec, OptionType};
/// use pricer_models::instruments::Position;
/// use pricer_risk::metrics::PayoffProfile;
///
/// let contract = ContractSpec::from_days(100.0, OptionType::Call, 0.25, 30.0).unwrap();
/// let profile = PayoffProfile::for_position(&Position::new(contract, 5.0).unwrap());
///
/// assert_eq!(profile.breakeven, 105.0);
/// assert_eq!(profile.max_loss, -500.0);
/// assert_eq!(profile.max_profit, f64::INFINITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffProfile {
    /// Underlying price at expiry where P&L is zero, floored at 0.
    ///
    /// A put bought for at least its strike never breaks even and reports 0.
    pub breakeven: f64,
    /// Best P&L at expiry in dollars; `f64::INFINITY` for calls.
    ///
    /// For a put this is the P&L at a zero settlement, which is a loss when
    /// the premium is at least the strike.
    pub max_profit: f64,
    /// Largest possible loss in dollars (negative): the premium paid.
    pub max_loss: f64,
}

impl PayoffProfile {
    /// Profile from raw terms.
    ///
    /// # Arguments
    ///
    /// * `strike` - Strike price
    /// * `premium` - Premium paid per unit
    /// * `option_type` - Call or put
    /// * `scale` - Multiplier times contract count
    pub fn new(strike: f64, premium: f64, option_type: OptionType, scale: f64) -> Self {
        match option_type {
            OptionType::Call => Self {
                breakeven: strike + premium,
                max_profit: f64::INFINITY,
                max_loss: -premium * scale,
            },
            OptionType::Put => Self {
                breakeven: (strike - premium).max(0.0),
                max_profit: (strike - premium) * scale,
                max_loss: -premium * scale,
            },
        }
    }

    /// Profile of a held position.
    pub fn for_position(position: &Position) -> Self {
        Self::new(
            position.strike(),
            position.premium_paid(),
            position.option_type(),
            position.scale(),
        )
    }

    /// Whether the upside is unbounded.
    #[inline]
    pub fn has_unlimited_profit(&self) -> bool {
        self.max_profit.is_infinite()
    }
}

/// Dollar P&L of `position` if the underlying settles at `spot_at_expiry`.
pub fn pnl_at_expiry(position: &Position, spot_at_expiry: f64) -> f64 {
    let payoff = match position.option_type() {
        OptionType::Call => spot_at_expiry - position.strike(),
        OptionType::Put => position.strike() - spot_at_expiry,
    };
    position.dollar_pnl_at(payoff.max(0.0))
}
