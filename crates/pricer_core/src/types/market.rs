//! Market and contract value types consumed by the pricing kernel.
//!
//! Both types validate on construction so that anything downstream of a
//! successful `new` can call the analytic formulas without re-checking.

use super::error::PricingError;
use super::option_type::OptionType;
use super::time::years_from_days;

/// Snapshot of the underlying market.
///
/// # Examples
/// ```
/// use pricer_core::types::MarketState;
///
/// let market = MarketState::new(100.0, 0.045, 0.01).unwrap();
/// assert_eq!(market.spot(), 100.0);
///
/// assert!(MarketState::new(0.0, 0.045, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMarketState"))]
pub struct MarketState {
    /// Spot price of the underlying (S)
    spot: f64,
    /// Annualised risk-free rate (r), decimal
    rate: f64,
    /// Annualised continuous dividend yield (q), decimal
    dividend_yield: f64,
}

impl MarketState {
    /// Creates a market snapshot.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if the spot is not a positive finite
    /// number or the rate/yield are not finite.
    pub fn new(spot: f64, rate: f64, dividend_yield: f64) -> Result<Self, PricingError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "spot must be positive, got {}",
                spot
            )));
        }
        if !rate.is_finite() || !dividend_yield.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "rate and dividend yield must be finite, got r = {}, q = {}",
                rate, dividend_yield
            )));
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield,
        })
    }

    /// Creates a market snapshot with zero dividend yield.
    pub fn without_dividends(spot: f64, rate: f64) -> Result<Self, PricingError> {
        Self::new(spot, rate, 0.0)
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Same market with the spot moved to `spot`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if `spot` is not a positive finite number.
    pub fn with_spot(self, spot: f64) -> Result<Self, PricingError> {
        Self::new(spot, self.rate, self.dividend_yield)
    }
}

/// Wire form of [`MarketState`], checked by [`MarketState::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMarketState {
    spot: f64,
    rate: f64,
    dividend_yield: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMarketState> for MarketState {
    type Error = PricingError;

    fn try_from(raw: RawMarketState) -> Result<Self, Self::Error> {
        Self::new(raw.spot, raw.rate, raw.dividend_yield)
    }
}

/// Contract terms of a single listed option.
///
/// # Examples
/// ```
/// use pricer_core::types::{ContractSpec, OptionType};
///
/// let contract = ContractSpec::new(100.0, OptionType::Call, 0.25, 0.5).unwrap();
/// assert_eq!(contract.strike(), 100.0);
/// assert!(!contract.is_expired());
///
/// // Zero implied volatility is rejected rather than priced
/// assert!(ContractSpec::new(100.0, OptionType::Call, 0.0, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawContractSpec"))]
pub struct ContractSpec {
    /// Strike price (K)
    strike: f64,
    /// Call or put
    option_type: OptionType,
    /// Implied volatility (σ), annualised decimal
    volatility: f64,
    /// Time to expiry in years (T)
    expiry: f64,
}

impl ContractSpec {
    /// Creates a contract.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if `strike <= 0`, `volatility <= 0`,
    /// `expiry < 0`, or any value is non-finite.
    pub fn new(
        strike: f64,
        option_type: OptionType,
        volatility: f64,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "strike must be positive, got {}",
                strike
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "implied volatility must be positive, got {}",
                volatility
            )));
        }
        if !(expiry.is_finite() && expiry >= 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "time to expiry must be non-negative, got {}",
                expiry
            )));
        }
        Ok(Self {
            strike,
            option_type,
            volatility,
            expiry,
        })
    }

    /// Creates a contract from calendar days to expiry (ACT/365).
    pub fn from_days(
        strike: f64,
        option_type: OptionType,
        volatility: f64,
        days: f64,
    ) -> Result<Self, PricingError> {
        Self::new(strike, option_type, volatility, years_from_days(days))
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Option kind.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Implied volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns `true` once no time value remains.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expiry <= 0.0
    }

    /// Same contract with a different time to expiry (negative clamps to 0).
    #[inline]
    pub fn with_expiry(self, expiry: f64) -> Self {
        Self {
            expiry: expiry.max(0.0),
            ..self
        }
    }
}

/// Wire form of [`ContractSpec`], checked by [`ContractSpec::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawContractSpec {
    strike: f64,
    option_type: OptionType,
    volatility: f64,
    expiry: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawContractSpec> for ContractSpec {
    type Error = PricingError;

    fn try_from(raw: RawContractSpec) -> Result<Self, Self::Error> {
        Self::new(raw.strike, raw.option_type, raw.volatility, raw.expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_state_valid() {
        let market = MarketState::new(150.0, 0.05, 0.02).unwrap();
        assert_eq!(market.spot(), 150.0);
        assert_eq!(market.rate(), 0.05);
        assert_eq!(market.dividend_yield(), 0.02);
    }

    #[test]
    fn test_market_state_rejects_bad_spot() {
        assert!(MarketState::new(-1.0, 0.05, 0.0).is_err());
        assert!(MarketState::new(0.0, 0.05, 0.0).is_err());
        assert!(MarketState::new(f64::NAN, 0.05, 0.0).is_err());
        assert!(MarketState::new(100.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_market_state_negative_rate_allowed() {
        assert!(MarketState::without_dividends(100.0, -0.01).is_ok());
    }

    #[test]
    fn test_with_spot_keeps_rates() {
        let market = MarketState::new(100.0, 0.05, 0.01)
            .unwrap()
            .with_spot(120.0)
            .unwrap();
        assert_eq!(market.spot(), 120.0);
        assert_eq!(market.rate(), 0.05);
        assert_eq!(market.dividend_yield(), 0.01);
    }

    #[test]
    fn test_with_spot_rejects_bad_spot() {
        let market = MarketState::new(100.0, 0.045, 0.0).unwrap();
        assert!(market.with_spot(-10.0).is_err());
        assert!(market.with_spot(0.0).is_err());
        assert!(market.with_spot(f64::NAN).is_err());
    }

    #[test]
    fn test_contract_validation() {
        assert!(ContractSpec::new(0.0, OptionType::Call, 0.2, 1.0).is_err());
        assert!(ContractSpec::new(100.0, OptionType::Call, -0.2, 1.0).is_err());
        assert!(ContractSpec::new(100.0, OptionType::Put, 0.2, -0.1).is_err());
        assert!(ContractSpec::new(100.0, OptionType::Put, f64::NAN, 1.0).is_err());
        assert!(ContractSpec::new(100.0, OptionType::Put, 0.2, 0.0).is_ok());
    }

    #[test]
    fn test_contract_from_days() {
        let contract = ContractSpec::from_days(100.0, OptionType::Call, 0.3, 73.0).unwrap();
        assert!((contract.expiry() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_contract_with_expiry_clamps() {
        let contract = ContractSpec::new(100.0, OptionType::Call, 0.3, 1.0).unwrap();
        assert_eq!(contract.with_expiry(-1.0).expiry(), 0.0);
        assert!(contract.with_expiry(0.0).is_expired());
    }

    // ==========================================================
    // Deserialisation goes through the validating constructors
    // ==========================================================

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_valid_values() {
        let market: MarketState =
            serde_json::from_str(r#"{"spot":100.0,"rate":0.045,"dividend_yield":0.0}"#).unwrap();
        assert_eq!(market, MarketState::new(100.0, 0.045, 0.0).unwrap());

        let contract = ContractSpec::new(100.0, OptionType::Put, 0.25, 0.5).unwrap();
        let json = serde_json::to_string(&contract).unwrap();
        let back: ContractSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contract);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_invalid_market() {
        let result: Result<MarketState, _> =
            serde_json::from_str(r#"{"spot":-10.0,"rate":0.045,"dividend_yield":0.0}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("spot must be positive"), "{err}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_zero_volatility() {
        let json = r#"{"strike":100.0,"option_type":"call","volatility":0.0,"expiry":0.082}"#;
        let result: Result<ContractSpec, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("implied volatility must be positive"), "{err}");

        let json = r#"{"strike":100.0,"option_type":"call","volatility":0.2,"expiry":-1.0}"#;
        assert!(serde_json::from_str::<ContractSpec>(json).is_err());
    }
}
